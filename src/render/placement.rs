use kurbo::{Point, Rect};

use crate::foundation::core::{Dpi, Position};

/// Convert an outline thickness in points to pixels at `dpi`.
pub fn padding_px(border_pt: f32, dpi: Dpi) -> f32 {
    border_pt * dpi.px_per_pt()
}

/// Box the caption is laid out in: origin `(padding, padding)`, size reduced by `padding`.
pub fn layout_rect(width: u32, height: u32, padding: f32) -> Rect {
    let p = f64::from(padding);
    let w = (f64::from(width) - p).max(0.0);
    let h = (f64::from(height) - p).max(0.0);
    Rect::new(p, p, p + w, p + h)
}

/// Top-left layout origin for the final caption.
///
/// `measured` is the glyph bounding box obtained with the layout origin at `measured_at`.
/// Bottom captions are lifted so the measured glyphs end `padding` pixels above the bottom
/// edge; top captions keep the nominal `(padding, padding)` origin.
pub fn caption_origin(
    position: Position,
    image_height: u32,
    measured: Rect,
    measured_at: Point,
    padding: f32,
) -> Point {
    let p = f64::from(padding);
    match position {
        Position::Top => Point::new(p, p),
        Position::Bottom => {
            let glyph_top = measured.y0 - measured_at.y;
            Point::new(
                p,
                f64::from(image_height) - measured.height() - glyph_top - p,
            )
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/placement.rs"]
mod tests;
