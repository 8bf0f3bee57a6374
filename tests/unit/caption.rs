use super::*;
use crate::foundation::core::{Dpi, Position, Rgba8};

const FONT: &str = "tests/data/fonts/DejaVuSans.ttf";

fn gray(width: u32, height: u32) -> SourceImage {
    SourceImage::new(
        image::RgbaImage::from_pixel(width, height, image::Rgba([128, 128, 128, 255])),
        Dpi::DEFAULT,
    )
}

fn style(text: &str, position: Position) -> CaptionStyle {
    CaptionStyle::builder()
        .text(text)
        .font_family("DejaVu Sans")
        .font_size(25.0)
        .position(position)
        .font_file(FONT)
        .build()
        .unwrap()
}

#[test]
fn render_and_save_before_load_are_invalid_state() {
    let mut caption = Caption::new();
    assert!(!caption.is_loaded());

    let err = caption.render(&CaptionStyle::default()).unwrap_err();
    assert!(matches!(err, CaptionError::InvalidState(_)));

    let err = caption.save("target/never.png").unwrap_err();
    assert!(matches!(err, CaptionError::InvalidState(_)));

    let err = caption.encode(OutputFormat::Png).unwrap_err();
    assert!(matches!(err, CaptionError::InvalidState(_)));
}

#[test]
fn failed_load_keeps_previous_buffer() {
    let mut caption = Caption::from_image(gray(10, 10));
    assert!(caption.load_bytes(b"garbage").is_err());
    assert_eq!(caption.dimensions(), Some((10, 10)));
}

#[test]
fn render_changes_pixels_and_keeps_dimensions() {
    let mut caption = Caption::from_image(gray(320, 120));
    caption.render(&style("Hello", Position::Bottom)).unwrap();

    let img = caption.image().unwrap();
    assert_eq!((img.width(), img.height()), (320, 120));
    assert!(img.pixels.pixels().any(|p| p.0 == [255, 255, 255, 255]));
    assert!(img.pixels.pixels().any(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn render_reports_padding_and_bottom_placement() {
    let mut caption = Caption::from_image(gray(320, 120));
    caption.render(&style("Hello", Position::Bottom)).unwrap();

    let last = caption.last_render().unwrap();
    assert!((last.padding - 3.5 * 96.0 / 72.0).abs() < 1e-4);
    let bounds = last.glyph_bounds.unwrap();
    let gap = 120.0 - bounds.y1;
    assert!((gap - f64::from(last.padding)).abs() <= 1.0, "gap = {gap}");
    assert!(bounds.x0 >= f64::from(last.padding) && bounds.x0 < f64::from(last.padding) + 5.0);
}

#[test]
fn top_placement_keeps_nominal_origin() {
    let mut caption = Caption::from_image(gray(320, 120));
    caption.render(&style("Hello", Position::Top)).unwrap();

    let last = caption.last_render().unwrap();
    let p = f64::from(last.padding);
    assert_eq!(last.origin, Point::new(p, p));
    assert!(last.glyph_bounds.unwrap().y0 >= p);
}

#[test]
fn dpi_override_changes_padding() {
    let mut caption = Caption::from_image(gray(200, 80));
    let s = style("Hi", Position::Top)
        .to_builder()
        .dpi(Some(Dpi::new(144.0).unwrap()))
        .build()
        .unwrap();
    caption.render(&s).unwrap();
    assert_eq!(caption.last_render().unwrap().padding, 7.0);
}

#[test]
fn blank_text_leaves_image_unchanged() {
    let mut caption = Caption::from_image(gray(64, 64));
    caption.render(&style("  ", Position::Bottom)).unwrap();
    assert!(
        caption
            .image()
            .unwrap()
            .pixels
            .pixels()
            .all(|p| p.0 == [128, 128, 128, 255])
    );
    assert!(caption.last_render().unwrap().glyph_bounds.is_none());
}

#[test]
fn second_render_layers_over_first() {
    let mut caption = Caption::from_image(gray(320, 120));
    caption.render(&style("Hello", Position::Bottom)).unwrap();
    let once = caption.image().unwrap().pixels.clone();

    let red = style("Hello", Position::Bottom)
        .to_builder()
        .color(Rgba8::opaque(255, 0, 0))
        .build()
        .unwrap();
    caption.render(&red).unwrap();
    let twice = &caption.image().unwrap().pixels;

    assert_ne!(&once, twice);
    assert!(twice.pixels().any(|p| p.0 == [255, 0, 0, 255]));
}

#[test]
fn missing_font_file_is_reported() {
    let mut caption = Caption::from_image(gray(64, 64));
    let s = CaptionStyle::builder()
        .font_file("tests/data/fonts/none.ttf")
        .build()
        .unwrap();
    assert!(caption.render(&s).is_err());
}
