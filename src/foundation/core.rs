use crate::foundation::error::{CaptionError, CaptionResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Vertical band the caption is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Bottom,
}

impl std::str::FromStr for Position {
    type Err = CaptionError;

    fn from_str(s: &str) -> CaptionResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(CaptionError::validation(format!(
                "unknown position '{other}' (expected 'top' or 'bottom')"
            ))),
        }
    }
}

/// Horizontal resolution of an image in pixels per inch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dpi(f32);

impl Dpi {
    /// Resolution assumed when the image carries no usable metadata.
    pub const DEFAULT: Self = Self(96.0);

    pub fn new(dpi: f32) -> CaptionResult<Self> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(CaptionError::validation("dpi must be finite and > 0"));
        }
        Ok(Self(dpi))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Pixels per typographic point (1/72 inch).
    pub fn px_per_pt(self) -> f32 {
        self.0 / 72.0
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::DEFAULT
    }
}
