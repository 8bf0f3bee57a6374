use kurbo::{Rect, Shape};

use super::*;

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Rect::new(x0, y0, x1, y1).to_path(0.1)
}

fn paint(stroke_width: f32) -> CaptionPaint {
    CaptionPaint {
        background: Rgba8::BLACK,
        foreground: Rgba8::WHITE,
        stroke_width,
    }
}

fn px(img: &image::RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn over_blends_premultiplied_source() {
    assert_eq!(over([10, 20, 30, 255], [0, 0, 0, 0]), [10, 20, 30, 255]);
    assert_eq!(over([10, 20, 30, 255], [200, 100, 0, 255]), [200, 100, 0, 255]);
    // 50% white over opaque black.
    assert_eq!(over([0, 0, 0, 255], [128, 128, 128, 128]), [128, 128, 128, 255]);
}

#[test]
fn premultiply_roundtrip_is_exact_for_opaque_and_clear() {
    assert_eq!(unpremultiply(premultiply([1, 2, 3, 255])), [1, 2, 3, 255]);
    assert_eq!(unpremultiply([0, 0, 0, 0]), [0, 0, 0, 0]);
    assert_eq!(premultiply([200, 100, 50, 0]), [0, 0, 0, 0]);
}

#[test]
fn fill_covers_interior_and_leaves_outside_untouched() {
    let mut img = image::RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 255, 255]));
    composite_caption(&mut img, &square(8.0, 8.0, 24.0, 24.0), &paint(0.0)).unwrap();

    assert_eq!(px(&img, 16, 16), [255, 255, 255, 255]);
    assert_eq!(px(&img, 2, 2), [0, 0, 255, 255]);
    assert_eq!(px(&img, 6, 16), [0, 0, 255, 255]);
}

#[test]
fn stroke_adds_background_halo_around_fill() {
    let mut img = image::RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 255, 255]));
    composite_caption(&mut img, &square(8.0, 8.0, 24.0, 24.0), &paint(6.0)).unwrap();

    // Halo extends 3px outside the path, interior stays foreground.
    assert_eq!(px(&img, 6, 16), [0, 0, 0, 255]);
    assert_eq!(px(&img, 16, 16), [255, 255, 255, 255]);
    assert_eq!(px(&img, 2, 16), [0, 0, 255, 255]);
}

#[test]
fn transparent_image_receives_opaque_caption() {
    let mut img = image::RgbaImage::new(16, 16);
    composite_caption(&mut img, &square(4.0, 4.0, 12.0, 12.0), &paint(0.0)).unwrap();
    assert_eq!(px(&img, 8, 8), [255, 255, 255, 255]);
    assert_eq!(px(&img, 0, 0), [0, 0, 0, 0]);
}

#[test]
fn empty_path_is_a_no_op() {
    let mut img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 4]));
    let before = img.clone();
    composite_caption(&mut img, &BezPath::new(), &paint(3.0)).unwrap();
    assert_eq!(img, before);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(over_straight_in_place(&mut dst, &[0u8; 4]).is_err());
}
