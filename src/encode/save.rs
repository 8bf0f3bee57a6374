use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::foundation::error::{CaptionError, CaptionResult};

/// JPEG quality used for every JPEG written by captioner.
pub const JPEG_QUALITY: u8 = 100;

/// Output codec, selected from the output file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Lossless PNG, keeps alpha.
    Png,
    /// JPEG at [`JPEG_QUALITY`]; alpha is dropped.
    Jpeg,
}

impl OutputFormat {
    /// `.jpg` / `.jpeg` (any case) select JPEG; anything else, including no extension, is PNG.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg" | "jpeg") => Self::Jpeg,
            _ => Self::Png,
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Encode `pixels` into an in-memory file of the given format.
pub fn encode_image(pixels: &image::RgbaImage, format: OutputFormat) -> CaptionResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image(pixels, format, &mut buf)?;
    Ok(buf)
}

/// Encode `pixels` to `path`, choosing the codec from the extension.
pub fn save_image(pixels: &image::RgbaImage, path: &Path) -> CaptionResult<OutputFormat> {
    let format = OutputFormat::from_path(path);
    let file = File::create(path)
        .map_err(|e| CaptionError::encode(format!("create '{}': {e}", path.display())))?;

    let mut w = BufWriter::new(file);
    write_image(pixels, format, &mut w)?;
    w.flush()
        .map_err(|e| CaptionError::encode(format!("write '{}': {e}", path.display())))?;
    Ok(format)
}

fn write_image<W: Write>(
    pixels: &image::RgbaImage,
    format: OutputFormat,
    w: &mut W,
) -> CaptionResult<()> {
    let result = match format {
        OutputFormat::Png => image::DynamicImage::ImageRgba8(pixels.clone())
            .write_with_encoder(image::codecs::png::PngEncoder::new(w)),
        OutputFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
            image::DynamicImage::ImageRgb8(rgb).write_with_encoder(
                image::codecs::jpeg::JpegEncoder::new_with_quality(w, JPEG_QUALITY),
            )
        }
    };
    result.map_err(|e| CaptionError::encode(format!("encode {format:?}: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/save.rs"]
mod tests;
