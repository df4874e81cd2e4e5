use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(
        Canvas::new(3, 2).unwrap(),
        Canvas {
            width: 3,
            height: 2
        }
    );
}

#[test]
fn corner_pixels_are_extreme_positions() {
    let c = Canvas::new(5, 4).unwrap();
    assert_eq!(c.corner_pixels(), [(0, 0), (4, 0), (0, 3), (4, 3)]);
    assert_eq!(c.pixel_count(), 20);
    assert!(c.contains(4, 3));
    assert!(!c.contains(5, 0));
}

#[test]
fn canvas_of_image_and_display() {
    let img = image::RgbImage::new(7, 9);
    let c = Canvas::of_image(&img);
    assert_eq!(c.to_string(), "7x9");
}

#[test]
fn canvas_json_shape_is_stable() {
    let c = Canvas::new(2, 1).unwrap();
    let s = serde_json::to_string(&c).unwrap();
    assert_eq!(s, r#"{"width":2,"height":1}"#);
}
