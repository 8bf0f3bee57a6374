use super::*;

#[test]
fn padding_scales_points_by_dpi() {
    let p = padding_px(3.5, Dpi::DEFAULT);
    assert!((p - 4.666_667).abs() < 1e-4);

    assert_eq!(padding_px(3.0, Dpi::new(144.0).unwrap()), 6.0);
    assert_eq!(padding_px(0.0, Dpi::DEFAULT), 0.0);
}

#[test]
fn layout_rect_starts_at_padding_and_shrinks_by_it() {
    let r = layout_rect(640, 480, 4.0);
    assert_eq!(r, Rect::new(4.0, 4.0, 640.0, 480.0));
    assert_eq!(r.width(), 636.0);
    assert_eq!(r.height(), 476.0);

    let tiny = layout_rect(2, 2, 4.0);
    assert_eq!(tiny.width(), 0.0);
    assert_eq!(tiny.height(), 0.0);
}

#[test]
fn top_origin_is_nominal_padding() {
    let measured = Rect::new(4.0, 10.0, 100.0, 30.0);
    assert_eq!(
        caption_origin(Position::Top, 480, measured, Point::new(4.0, 4.0), 4.0),
        Point::new(4.0, 4.0)
    );
}

#[test]
fn bottom_origin_puts_measured_glyphs_padding_above_edge() {
    let padding = 4.0;
    let measured_at = Point::new(4.0, 4.0);
    let measured = Rect::new(4.0, 10.0, 100.0, 30.0);
    let origin = caption_origin(Position::Bottom, 480, measured, measured_at, padding);
    assert_eq!(origin, Point::new(4.0, 480.0 - 20.0 - 6.0 - 4.0));

    // Moving the layout to `origin` moves the glyph box by the same offset.
    let glyph_bottom = measured.y1 + (origin.y - measured_at.y);
    assert!((480.0 - glyph_bottom - f64::from(padding)).abs() < 1e-9);
}

#[test]
fn bottom_origin_does_not_depend_on_where_it_was_measured() {
    let a = caption_origin(
        Position::Bottom,
        300,
        Rect::new(0.0, 8.0, 50.0, 28.0),
        Point::ZERO,
        2.0,
    );
    let b = caption_origin(
        Position::Bottom,
        300,
        Rect::new(0.0, 108.0, 50.0, 128.0),
        Point::new(0.0, 100.0),
        2.0,
    );
    assert_eq!(a, b);
}
