use super::*;

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_encode").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn gradient(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| image::Rgb([(x * 9) as u8, (y * 13) as u8, 77]))
}

fn sniff(path: &Path) -> ImageFormat {
    let bytes = std::fs::read(path).unwrap();
    image::guess_format(&bytes).unwrap()
}

#[test]
fn lossless_extensions_round_trip_exactly() {
    let dir = out_dir("lossless");
    let canvas = gradient(17, 11);
    for (name, format) in [
        ("out.png", ImageFormat::Png),
        ("out.bmp", ImageFormat::Bmp),
        ("out.tiff", ImageFormat::Tiff),
        ("out.TIF", ImageFormat::Tiff),
    ] {
        let path = dir.join(name);
        let report = write_canvas(&canvas, &path).unwrap();
        assert_eq!(report.format, format, "{name}");
        assert!(!report.fallback);
        assert_eq!(sniff(&path), format, "{name}");
        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back, canvas, "{name}");
    }
}

#[test]
fn jpeg_extension_writes_jpeg() {
    let dir = out_dir("jpeg");
    let canvas = gradient(32, 24);
    for name in ["out.jpg", "out.jpeg"] {
        let path = dir.join(name);
        let report = write_canvas(&canvas, &path).unwrap();
        assert_eq!(report.format, ImageFormat::Jpeg);
        assert_eq!(sniff(&path), ImageFormat::Jpeg);
        assert_eq!(image::open(&path).unwrap().to_rgb8().dimensions(), (32, 24));
    }
}

#[test]
fn unknown_extension_writes_png_under_requested_name() {
    let dir = out_dir("fallback");
    let canvas = gradient(5, 5);
    for name in ["mosaic.xyz", "mosaic"] {
        let path = dir.join(name);
        let report = write_canvas(&canvas, &path).unwrap();
        assert!(report.fallback, "{name}");
        assert_eq!(report.format, ImageFormat::Png);
        assert_eq!(report.path, path);
        assert_eq!(sniff(&path), ImageFormat::Png);
    }
}

#[test]
fn creates_missing_parent_directories() {
    let dir = out_dir("nested");
    let path = dir.join("a").join("b").join("out.png");
    write_canvas(&gradient(3, 2), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn oversized_icon_falls_back_to_png_without_leaving_debris() {
    let dir = out_dir("icon_fallback");
    let path = dir.join("mosaic.ico");
    let report = write_canvas(&gradient(300, 10), &path).unwrap();
    assert!(report.fallback);
    assert_eq!(report.format, ImageFormat::Png);
    assert_eq!(report.path, path);
    assert_eq!(sniff(&path), ImageFormat::Png);
    // The extension still says .ico, so decode by content.
    let back = image::load_from_memory(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(back.to_rgb8(), gradient(300, 10));
}

#[test]
fn encoding_happens_before_the_file_is_created() {
    let canvas = gradient(4, 3);
    let bytes = encode_to_vec(&canvas, ImageFormat::Png).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    assert!(encode_to_vec(&gradient(300, 10), ImageFormat::Ico).is_err());
}
