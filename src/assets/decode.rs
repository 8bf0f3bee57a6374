use std::path::Path;

use crate::{
    assets::resolution,
    foundation::core::Dpi,
    foundation::error::{CaptionError, CaptionResult},
};

/// Decoded source image in straight RGBA8 form plus its horizontal resolution.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Pixel buffer, row-major straight RGBA8.
    pub pixels: image::RgbaImage,
    /// Horizontal resolution read from the file, or [`Dpi::DEFAULT`].
    pub dpi: Dpi,
}

impl SourceImage {
    pub fn new(pixels: image::RgbaImage, dpi: Dpi) -> Self {
        Self { pixels, dpi }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Read and decode an image file from disk.
pub fn load_image(path: &Path) -> CaptionResult<SourceImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| CaptionError::decode(format!("read image '{}': {e}", path.display())))?;
    decode_image(&bytes)
        .map_err(|e| CaptionError::decode(format!("'{}': {}", path.display(), inner_message(e))))
}

/// Decode encoded image bytes (any format the `image` crate recognizes) into RGBA8.
pub fn decode_image(bytes: &[u8]) -> CaptionResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CaptionError::decode(format!("decode image from memory: {e}")))?;
    let pixels = dyn_img.to_rgba8();
    let dpi = resolution::probe_dpi(bytes).unwrap_or_default();

    tracing::debug!(
        width = pixels.width(),
        height = pixels.height(),
        dpi = dpi.get(),
        "decoded source image"
    );
    Ok(SourceImage { pixels, dpi })
}

fn inner_message(err: CaptionError) -> String {
    match err {
        CaptionError::Decode(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
