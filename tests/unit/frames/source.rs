use super::*;

fn fresh_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_frames").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &Path, name: &str, w: u32, h: u32, v: u8) {
    RgbImage::from_pixel(w, h, image::Rgb([v, v, v]))
        .save_with_format(dir.join(name), image::ImageFormat::Png)
        .unwrap();
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn collect_filters_extensions_case_insensitively_and_sorts() {
    let dir = fresh_dir("collect");
    write_png(&dir, "b.PNG", 2, 2, 0);
    write_png(&dir, "A.png", 2, 2, 0);
    write_png(&dir, "c.jpeg", 2, 2, 0);
    std::fs::write(dir.join("notes.txt"), b"skip me").unwrap();
    std::fs::create_dir_all(dir.join("sub.png")).unwrap();

    let files = collect_images(&dir).unwrap();
    assert_eq!(names(&files), vec!["A.png", "b.PNG", "c.jpeg"]);
}

#[test]
fn collect_rejects_missing_directory() {
    let err = collect_images(Path::new("target/unit_frames/does-not-exist")).unwrap_err();
    assert!(matches!(err, SlitScanError::Input(_)));
}

#[test]
fn select_uses_stride_from_first_file() {
    let files: Vec<PathBuf> = (0..10).map(|i| PathBuf::from(format!("f{i}.jpg"))).collect();
    assert_eq!(
        names(&select_frames(&files, 3, 3).unwrap()),
        vec!["f0.jpg", "f3.jpg", "f6.jpg"]
    );
    // 0 and 1 both mean "every file".
    assert_eq!(select_frames(&files, 4, 0).unwrap(), files[..4].to_vec());
    assert_eq!(select_frames(&files, 4, 1).unwrap(), files[..4].to_vec());
}

#[test]
fn select_fails_when_files_run_out() {
    let files: Vec<PathBuf> = (0..10).map(|i| PathBuf::from(format!("f{i}.jpg"))).collect();
    assert!(select_frames(&files, 4, 3).is_ok());
    let err = select_frames(&files, 5, 3).unwrap_err();
    assert!(matches!(err, SlitScanError::Config(_)));
    assert!(select_frames(&files, 11, 1).is_err());
    assert!(select_frames(&files, 0, 1).is_err());
    assert!(matches!(
        select_frames(&[], 1, 1).unwrap_err(),
        SlitScanError::Input(_)
    ));
}

#[test]
fn load_ordered_frames_decodes_in_name_order() {
    let dir = fresh_dir("load_order");
    write_png(&dir, "img_003.png", 6, 4, 30);
    write_png(&dir, "img_001.png", 6, 4, 10);
    write_png(&dir, "img_002.png", 6, 4, 20);

    let set = load_ordered_frames(&dir, 3, 1, &LoadOpts::default()).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.canvas(), Canvas::new(6, 4).unwrap());
    let firsts: Vec<u8> = set.frames().iter().map(|f| f.get_pixel(0, 0).0[0]).collect();
    assert_eq!(firsts, vec![10, 20, 30]);
}

#[test]
fn load_rejects_mismatched_dimensions_unless_resizing() {
    let dir = fresh_dir("load_mismatch");
    write_png(&dir, "a.png", 6, 4, 50);
    write_png(&dir, "b.png", 3, 2, 90);

    let err = load_ordered_frames(&dir, 2, 1, &LoadOpts::default()).unwrap_err();
    assert!(matches!(err, SlitScanError::Input(_)));
    assert!(err.to_string().contains("3x2"));

    let set = load_ordered_frames(
        &dir,
        2,
        1,
        &LoadOpts {
            resize_mismatched: true,
        },
    )
    .unwrap();
    assert_eq!(Canvas::of_image(&set.frames()[1]), Canvas::new(6, 4).unwrap());
    // A solid frame stays (nearly) solid under bilinear resampling.
    let v = set.frames()[1].get_pixel(5, 3).0[0];
    assert!((i16::from(v) - 90).abs() <= 1, "got {v}");
}

#[test]
fn load_frame_reports_undecodable_files() {
    let dir = fresh_dir("load_bad");
    std::fs::write(dir.join("broken.png"), b"not a png").unwrap();
    let err = load_ordered_frames(&dir, 1, 1, &LoadOpts::default()).unwrap_err();
    assert!(matches!(err, SlitScanError::Other(_)));
    assert!(err.to_string().contains("broken.png"));
}
