use std::{borrow::Cow, path::Path};

use anyhow::Context;
use parley::layout::PositionedLayoutItem;
use parley::style::{FontFamily, FontStack, FontStyle, FontWeight, StyleProperty};

use crate::foundation::error::{CaptionError, CaptionResult};

/// Parameters for laying out a caption inside a bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutRequest<'a> {
    pub text: &'a str,
    pub family: &'a str,
    pub size_px: f32,
    pub bold: bool,
    pub italic: bool,
    /// Lines are broken at this width.
    pub max_width: f32,
    /// Lines whose box extends below this height are not drawn.
    pub max_height: f32,
}

/// A shaped caption plus the number of leading lines that fit the bounding box.
pub struct CaptionLayout {
    layout: parley::Layout<()>,
    visible_lines: usize,
}

impl std::fmt::Debug for CaptionLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionLayout")
            .field("lines", &self.layout.len())
            .field("visible_lines", &self.visible_lines)
            .field("width", &self.layout.width())
            .field("height", &self.layout.height())
            .finish()
    }
}

impl CaptionLayout {
    pub fn layout(&self) -> &parley::Layout<()> {
        &self.layout
    }

    pub fn line_count(&self) -> usize {
        self.layout.len()
    }

    pub fn visible_line_count(&self) -> usize {
        self.visible_lines
    }

    /// Glyph runs of the lines that fit the bounding box, in layout order.
    pub fn visible_runs(&self) -> Vec<parley::layout::GlyphRun<'_, ()>> {
        let mut runs = Vec::new();
        for line in self.layout.lines().take(self.visible_lines) {
            for item in line.items() {
                if let PositionedLayoutItem::GlyphRun(run) = item {
                    runs.push(run);
                }
            }
        }
        runs
    }

    fn has_glyphs(&self) -> bool {
        self.layout.lines().any(|line| {
            line.items().any(|item| match item {
                PositionedLayoutItem::GlyphRun(run) => run.glyphs().next().is_some(),
                _ => false,
            })
        })
    }
}

/// Stateful helper owning the Parley font and layout contexts.
pub struct CaptionLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl Default for CaptionLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionLayoutEngine {
    /// Construct a new engine backed by the system font collection.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register raw font bytes and return the family names they provide.
    pub fn register_font_bytes(&mut self, font_bytes: Vec<u8>) -> CaptionResult<Vec<String>> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        if families.is_empty() {
            return Err(CaptionError::font_resolution(
                "no font families registered from font bytes",
            ));
        }

        let mut names = Vec::with_capacity(families.len());
        for (family_id, _) in &families {
            if let Some(name) = self.font_ctx.collection.family_name(*family_id) {
                names.push(name.to_string());
            }
        }
        tracing::debug!(?names, "registered font families");
        Ok(names)
    }

    /// Read a font file from disk and register it.
    pub fn register_font_file(&mut self, path: &Path) -> CaptionResult<Vec<String>> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        self.register_font_bytes(bytes).map_err(|e| match e {
            CaptionError::FontResolution(msg) => {
                CaptionError::font_resolution(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Whether `family` names a family known to the collection.
    pub fn has_family(&mut self, family: &str) -> bool {
        self.font_ctx.collection.family_by_name(family).is_some()
    }

    /// Shape and lay out `req.text` inside the requested box.
    ///
    /// Unknown families fall back to whatever face the collection selects for the script; an
    /// error is returned only when non-blank text produced no glyphs at all.
    pub fn layout(&mut self, req: &LayoutRequest<'_>) -> CaptionResult<CaptionLayout> {
        if !req.size_px.is_finite() || req.size_px <= 0.0 {
            return Err(CaptionError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        if !self.has_family(req.family) {
            tracing::warn!(
                family = req.family,
                "font family not found; falling back to default face"
            );
        }

        let weight = if req.bold {
            FontWeight::BOLD
        } else {
            FontWeight::NORMAL
        };
        let style = if req.italic {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, req.text, 1.0, true);
        builder.push_default(StyleProperty::FontStack(FontStack::Single(
            FontFamily::Named(Cow::Owned(req.family.to_string())),
        )));
        builder.push_default(StyleProperty::FontSize(req.size_px));
        builder.push_default(StyleProperty::FontWeight(weight));
        builder.push_default(StyleProperty::FontStyle(style));

        let max_width = req.max_width.max(0.0);
        let mut layout: parley::Layout<()> = builder.build(req.text);
        layout.break_all_lines(Some(max_width));
        layout.align(
            Some(max_width),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let visible_lines = layout
            .lines()
            .take_while(|line| {
                let m = line.metrics();
                m.baseline + m.descent <= req.max_height
            })
            .count();
        if visible_lines < layout.len() {
            tracing::debug!(
                lines = layout.len(),
                visible_lines,
                max_height = req.max_height,
                "caption lines exceed layout box; dropping overflow"
            );
        }

        let out = CaptionLayout {
            layout,
            visible_lines,
        };
        if !req.text.trim().is_empty() && !out.has_glyphs() {
            return Err(CaptionError::font_resolution(format!(
                "no font face could shape text with family '{}'",
                req.family
            )));
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
