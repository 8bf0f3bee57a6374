use kurbo::{Affine, BezPath, Point, Rect, Shape};

use crate::{
    foundation::error::{CaptionError, CaptionResult},
    text::layout::CaptionLayout,
};

/// Vector outline of every visible glyph of a caption, in image pixel space.
#[derive(Clone, Debug, Default)]
pub struct GlyphPath {
    path: BezPath,
    glyph_count: usize,
}

impl GlyphPath {
    /// Outline the visible glyphs of `layout` with the layout's top-left corner at `origin`.
    pub fn build(layout: &CaptionLayout, origin: Point) -> CaptionResult<Self> {
        let mut out = Self::default();

        for glyph_run in layout.visible_runs() {
            let run = glyph_run.run();
            let font = run.font();
            let face = ttf_parser::Face::parse(font.data.data(), font.index).map_err(|e| {
                CaptionError::font_resolution(format!("parse font face {}: {e}", font.index))
            })?;

            let units_per_em = f32::from(face.units_per_em());
            if units_per_em <= 0.0 {
                continue;
            }
            let scale = f64::from(run.font_size() / units_per_em);

            let synthesis = run.synthesis();
            let skew = synthesis
                .skew()
                .map(|deg| f64::from(deg.to_radians().tan()))
                .unwrap_or(0.0);
            if synthesis.embolden() {
                tracing::debug!("font lacks a bold face; outlines use the regular weight");
            }

            for glyph in glyph_run.positioned_glyphs() {
                let Ok(id) = u16::try_from(glyph.id) else {
                    continue;
                };
                let transform = glyph_transform(
                    scale,
                    skew,
                    origin.x + f64::from(glyph.x),
                    origin.y + f64::from(glyph.y),
                );
                let mut sink = PathSink {
                    path: &mut out.path,
                    transform,
                };
                if face
                    .outline_glyph(ttf_parser::GlyphId(id), &mut sink)
                    .is_some()
                {
                    out.glyph_count += 1;
                }
            }
        }

        Ok(out)
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Number of glyphs that contributed an outline.
    pub fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    /// Tight bounding box of the outlines, `None` when nothing was outlined.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(self.path.bounding_box())
        }
    }
}

/// Maps font design units (y-up) to pixels (y-down) at pen position `(x, y)`.
///
/// `skew` is the tangent of the synthetic oblique angle.
pub fn glyph_transform(scale: f64, skew: f64, x: f64, y: f64) -> Affine {
    Affine::new([scale, 0.0, skew * scale, -scale, x, y])
}

struct PathSink<'a> {
    path: &'a mut BezPath,
    transform: Affine,
}

impl PathSink<'_> {
    fn pt(&self, x: f32, y: f32) -> Point {
        self.transform * Point::new(f64::from(x), f64::from(y))
    }
}

impl ttf_parser::OutlineBuilder for PathSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (p1, p) = (self.pt(x1, y1), self.pt(x, y));
        self.path.quad_to(p1, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (p1, p2, p) = (self.pt(x1, y1), self.pt(x2, y2), self.pt(x, y));
        self.path.curve_to(p1, p2, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/outline.rs"]
mod tests;
