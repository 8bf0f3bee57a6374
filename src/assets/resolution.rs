//! Horizontal resolution lookup for encoded images.
//!
//! The `image` crate drops physical-size metadata, so PNG `pHYs` is read through the `png`
//! decoder and JPEG density through a scan of the JFIF `APP0` segment.

use std::io::Cursor;

use crate::foundation::core::Dpi;

const METERS_PER_INCH: f64 = 0.0254;
const CM_PER_INCH: f32 = 2.54;

/// Best-effort horizontal DPI of an encoded image; `None` when absent or unusable.
pub fn probe_dpi(bytes: &[u8]) -> Option<Dpi> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Png => png_dpi(bytes),
        image::ImageFormat::Jpeg => jfif_dpi(bytes),
        _ => None,
    }
}

fn png_dpi(bytes: &[u8]) -> Option<Dpi> {
    let reader = png::Decoder::new(Cursor::new(bytes)).read_info().ok()?;
    let dims = reader.info().pixel_dims?;
    match dims.unit {
        png::Unit::Meter => Dpi::new((f64::from(dims.xppu) * METERS_PER_INCH) as f32).ok(),
        png::Unit::Unspecified => None,
    }
}

fn jfif_dpi(bytes: &[u8]) -> Option<Dpi> {
    if bytes.get(..2)? != [0xFF, 0xD8] {
        return None;
    }

    let mut pos = 2usize;
    loop {
        let marker = bytes.get(pos..pos + 2)?;
        if marker[0] != 0xFF {
            return None;
        }
        // Start of scan: no more metadata segments.
        if marker[1] == 0xDA {
            return None;
        }
        let len = usize::from(u16::from_be_bytes([*bytes.get(pos + 2)?, *bytes.get(pos + 3)?]));
        if len < 2 {
            return None;
        }
        let body = bytes.get(pos + 4..pos + 2 + len)?;

        if marker[1] == 0xE0 && body.len() >= 12 && &body[..5] == b"JFIF\0" {
            let units = body[7];
            let x_density = f32::from(u16::from_be_bytes([body[8], body[9]]));
            return match units {
                1 => Dpi::new(x_density).ok(),
                2 => Dpi::new(x_density * CM_PER_INCH).ok(),
                _ => None,
            };
        }

        pos += 2 + len;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolution.rs"]
mod tests;
