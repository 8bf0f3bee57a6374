//! The caption renderer: holds one decoded image and draws captions onto it.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use kurbo::{Point, Rect};

use crate::{
    assets::decode::{self, SourceImage},
    encode::save::{self, OutputFormat},
    foundation::error::{CaptionError, CaptionResult},
    render::{
        cpu::{self, CaptionPaint},
        placement,
    },
    style::caption::CaptionStyle,
    text::{
        layout::{CaptionLayoutEngine, LayoutRequest},
        outline::GlyphPath,
    },
};

/// Geometry of the most recent caption drawn by [`Caption::render`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedCaption {
    /// Outline thickness converted to pixels; also the halo pen width.
    pub padding: f32,
    /// Layout origin the glyphs were drawn at.
    pub origin: Point,
    /// Tight bounds of the drawn glyph outlines, `None` when nothing was drawn.
    pub glyph_bounds: Option<Rect>,
}

/// Captioning session owning at most one image buffer.
///
/// `load` replaces the buffer, `render` draws into it (repeated renders stack), and `save`
/// writes it out without modifying it. Rendering or saving before a load fails with
/// [`CaptionError::InvalidState`].
pub struct Caption {
    image: Option<SourceImage>,
    engine: CaptionLayoutEngine,
    registered_fonts: HashSet<PathBuf>,
    last: Option<RenderedCaption>,
}

impl Default for Caption {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Caption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Caption")
            .field("dimensions", &self.dimensions())
            .field("last", &self.last)
            .finish()
    }
}

impl Caption {
    /// An unloaded renderer.
    pub fn new() -> Self {
        Self {
            image: None,
            engine: CaptionLayoutEngine::new(),
            registered_fonts: HashSet::new(),
            last: None,
        }
    }

    /// A renderer already holding `image`.
    pub fn from_image(image: SourceImage) -> Self {
        let mut out = Self::new();
        out.image = Some(image);
        out
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|i| (i.width(), i.height()))
    }

    /// Geometry of the last successful render.
    pub fn last_render(&self) -> Option<RenderedCaption> {
        self.last
    }

    /// Direct access to the layout engine, e.g. to register fonts up front.
    pub fn layout_engine(&mut self) -> &mut CaptionLayoutEngine {
        &mut self.engine
    }

    /// Decode the image at `path`, replacing any held buffer.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> CaptionResult<&mut Self> {
        let image = decode::load_image(path.as_ref())?;
        self.image = Some(image);
        self.last = None;
        Ok(self)
    }

    /// Decode an in-memory image, replacing any held buffer.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> CaptionResult<&mut Self> {
        let image = decode::decode_image(bytes)?;
        self.image = Some(image);
        self.last = None;
        Ok(self)
    }

    /// Draw `style`'s caption onto the held buffer.
    #[tracing::instrument(skip_all, fields(text = style.text(), position = ?style.position()))]
    pub fn render(&mut self, style: &CaptionStyle) -> CaptionResult<&mut Self> {
        let Some(image) = self.image.as_mut() else {
            return Err(CaptionError::invalid_state("render called before an image was loaded"));
        };

        for font in style.font_files() {
            if !self.registered_fonts.contains(font) {
                self.engine.register_font_file(font)?;
                self.registered_fonts.insert(font.clone());
            }
        }

        let dpi = style.dpi().unwrap_or(image.dpi);
        let padding = placement::padding_px(style.border_pt(), dpi);
        let (width, height) = (image.width(), image.height());
        let rect = placement::layout_rect(width, height, padding);

        let layout = self.engine.layout(&LayoutRequest {
            text: style.text(),
            family: style.font_family(),
            size_px: style.font_size(),
            bold: style.bold(),
            italic: style.italic(),
            max_width: rect.width() as f32,
            max_height: rect.height() as f32,
        })?;

        let measured_at = rect.origin();
        let measured = GlyphPath::build(&layout, measured_at)?;
        let Some(bounds) = measured.bounds() else {
            tracing::debug!("caption has no visible glyphs; image left unchanged");
            self.last = Some(RenderedCaption {
                padding,
                origin: measured_at,
                glyph_bounds: None,
            });
            return Ok(self);
        };

        let origin =
            placement::caption_origin(style.position(), height, bounds, measured_at, padding);
        let glyphs = if origin == measured_at {
            measured
        } else {
            GlyphPath::build(&layout, origin)?
        };
        tracing::debug!(
            padding,
            dpi = dpi.get(),
            ?origin,
            bounds = ?glyphs.bounds(),
            glyphs = glyphs.glyph_count(),
            "placing caption"
        );

        cpu::composite_caption(
            &mut image.pixels,
            glyphs.path(),
            &CaptionPaint {
                background: style.background(),
                foreground: style.color(),
                stroke_width: padding,
            },
        )?;

        self.last = Some(RenderedCaption {
            padding,
            origin,
            glyph_bounds: glyphs.bounds(),
        });
        Ok(self)
    }

    /// Encode the held buffer to `path`; `.jpg`/`.jpeg` write JPEG, anything else PNG.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> CaptionResult<&Self> {
        let image = self.loaded("save")?;
        let format = save::save_image(&image.pixels, path.as_ref())?;
        tracing::debug!(?format, "saved captioned image");
        Ok(self)
    }

    /// Encode the held buffer into memory.
    pub fn encode(&self, format: OutputFormat) -> CaptionResult<Vec<u8>> {
        let image = self.loaded("encode")?;
        save::encode_image(&image.pixels, format)
    }

    fn loaded(&self, op: &str) -> CaptionResult<&SourceImage> {
        self.image.as_ref().ok_or_else(|| {
            CaptionError::invalid_state(format!("{op} called before an image was loaded"))
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/caption.rs"]
mod tests;
