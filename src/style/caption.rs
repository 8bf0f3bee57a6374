use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{Dpi, Position, Rgba8};
use crate::foundation::error::{CaptionError, CaptionResult};

/// Caption text used when nothing else is supplied.
pub const DEFAULT_TEXT: &str = "(Caption)";

/// Disclaimer sentence rendered by the command line tool when no text is given.
pub const DISCLAIMER_TEXT: &str = "This is preliminary software and/or hardware and APIs are preliminary and subject to change.";

/// Immutable description of how a caption is drawn.
///
/// Build one with [`CaptionStyleBuilder`]; [`CaptionStyle::default`] yields the stock style
/// (white 25px Arial on a black 3.5pt halo, anchored to the top).
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionStyle {
    text: String,
    font_family: String,
    font_size: f32,
    bold: bool,
    italic: bool,
    color: Rgba8,
    background: Rgba8,
    border_pt: f32,
    position: Position,
    dpi: Option<Dpi>,
    font_files: Vec<PathBuf>,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_family: "Arial".to_string(),
            font_size: 25.0,
            bold: false,
            italic: false,
            color: Rgba8::WHITE,
            background: Rgba8::BLACK,
            border_pt: 3.5,
            position: Position::Top,
            dpi: None,
            font_files: Vec::new(),
        }
    }
}

impl CaptionStyle {
    /// Start a builder from the stock defaults.
    pub fn builder() -> CaptionStyleBuilder {
        CaptionStyleBuilder::new()
    }

    /// The preset used by the command line tool: bold 15px Impact at the bottom,
    /// carrying the disclaimer sentence.
    pub fn disclaimer() -> Self {
        Self {
            text: DISCLAIMER_TEXT.to_string(),
            font_family: "Impact".to_string(),
            font_size: 15.0,
            bold: true,
            position: Position::Bottom,
            ..Self::default()
        }
    }

    /// Derive a builder seeded with this style's values.
    pub fn to_builder(&self) -> CaptionStyleBuilder {
        CaptionStyleBuilder {
            style: self.clone(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Em size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Outline thickness in points; converted to pixels with the image resolution.
    pub fn border_pt(&self) -> f32 {
        self.border_pt
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Resolution override; `None` uses the resolution stored in the loaded image.
    pub fn dpi(&self) -> Option<Dpi> {
        self.dpi
    }

    /// Extra font files registered before the family name is resolved.
    pub fn font_files(&self) -> &[PathBuf] {
        &self.font_files
    }
}

/// Builder for [`CaptionStyle`]; validation happens in [`CaptionStyleBuilder::build`].
#[derive(Clone, Debug)]
pub struct CaptionStyleBuilder {
    style: CaptionStyle,
}

impl Default for CaptionStyleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionStyleBuilder {
    pub fn new() -> Self {
        Self {
            style: CaptionStyle::default(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.style.text = text.into();
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.style.font_family = family.into();
        self
    }

    pub fn font_size(mut self, size_px: f32) -> Self {
        self.style.font_size = size_px;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.style.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.style.italic = italic;
        self
    }

    pub fn color(mut self, color: Rgba8) -> Self {
        self.style.color = color;
        self
    }

    pub fn background(mut self, color: Rgba8) -> Self {
        self.style.background = color;
        self
    }

    pub fn border_pt(mut self, border_pt: f32) -> Self {
        self.style.border_pt = border_pt;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.style.position = position;
        self
    }

    pub fn dpi(mut self, dpi: Option<Dpi>) -> Self {
        self.style.dpi = dpi;
        self
    }

    pub fn font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.style.font_files.push(path.into());
        self
    }

    /// Apply every field present in a style file on top of the current values.
    pub fn apply_file(mut self, file: StyleFile) -> CaptionResult<Self> {
        let StyleFile {
            text,
            font,
            size,
            bold,
            italic,
            color,
            background,
            border,
            position,
            dpi,
            font_files,
        } = file;

        if let Some(v) = text {
            self = self.text(v);
        }
        if let Some(v) = font {
            self = self.font_family(v);
        }
        if let Some(v) = size {
            self = self.font_size(v);
        }
        if let Some(v) = bold {
            self = self.bold(v);
        }
        if let Some(v) = italic {
            self = self.italic(v);
        }
        if let Some(v) = color {
            self = self.color(v);
        }
        if let Some(v) = background {
            self = self.background(v);
        }
        if let Some(v) = border {
            self = self.border_pt(v);
        }
        if let Some(v) = position {
            self = self.position(v);
        }
        if let Some(v) = dpi {
            self = self.dpi(Some(Dpi::new(v)?));
        }
        for path in font_files {
            self = self.font_file(path);
        }
        Ok(self)
    }

    pub fn build(self) -> CaptionResult<CaptionStyle> {
        let s = &self.style;
        if !s.font_size.is_finite() || s.font_size <= 0.0 {
            return Err(CaptionError::validation(
                "font size must be finite and > 0",
            ));
        }
        if !s.border_pt.is_finite() || s.border_pt < 0.0 {
            return Err(CaptionError::validation(
                "border thickness must be finite and >= 0",
            ));
        }
        if s.font_family.trim().is_empty() {
            return Err(CaptionError::validation("font family must be non-empty"));
        }
        Ok(self.style)
    }
}

/// On-disk style description; every field is optional and overrides the base style.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleFile {
    pub text: Option<String>,
    pub font: Option<String>,
    pub size: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<Rgba8>,
    pub background: Option<Rgba8>,
    pub border: Option<f32>,
    pub position: Option<Position>,
    pub dpi: Option<f32>,
    pub font_files: Vec<PathBuf>,
}

impl StyleFile {
    /// Read and parse a JSON style file.
    ///
    /// Relative `font_files` entries are resolved against the style file's directory.
    pub fn load(path: &Path) -> CaptionResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read style file '{}'", path.display()))?;
        let mut file: Self = serde_json::from_str(&text).map_err(|e| {
            CaptionError::validation(format!("parse style file '{}': {e}", path.display()))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for font in &mut file.font_files {
            if font.is_relative() {
                *font = base.join(&*font);
            }
        }
        Ok(file)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/caption.rs"]
mod tests;
