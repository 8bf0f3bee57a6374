use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CaptionError, CaptionResult};

/// Parse a color given as `#RRGGBB`, `#RRGGBBAA` or a CSS-like name.
pub fn parse_color(s: &str) -> CaptionResult<Rgba8> {
    let s = s.trim();
    if let Some(c) = named_color(s) {
        return Ok(c);
    }
    parse_hex(s).map_err(CaptionError::validation)
}

impl std::str::FromStr for Rgba8 {
    type Err = CaptionError;

    fn from_str(s: &str) -> CaptionResult<Self> {
        parse_color(s)
    }
}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Rgba8::new(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::opaque(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let Some(hex) = s.strip_prefix('#') else {
        return Err(format!(
            "unknown color \"{s}\" (expected a name, #RRGGBB or #RRGGBBAA)"
        ));
    };

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !hex.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    match hex.len() {
        6 => Ok(Rgba8::opaque(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

fn named_color(name: &str) -> Option<Rgba8> {
    let c = match name.to_ascii_lowercase().as_str() {
        "white" => Rgba8::WHITE,
        "black" => Rgba8::BLACK,
        "transparent" => Rgba8::TRANSPARENT,
        "red" => Rgba8::opaque(255, 0, 0),
        "green" => Rgba8::opaque(0, 128, 0),
        "blue" => Rgba8::opaque(0, 0, 255),
        "yellow" => Rgba8::opaque(255, 255, 0),
        "orange" => Rgba8::opaque(255, 165, 0),
        "cyan" => Rgba8::opaque(0, 255, 255),
        "magenta" => Rgba8::opaque(255, 0, 255),
        "gray" | "grey" => Rgba8::opaque(128, 128, 128),
        "lightblue" => Rgba8::opaque(173, 216, 230),
        "lightgray" | "lightgrey" => Rgba8::opaque(211, 211, 211),
        "darkgray" | "darkgrey" => Rgba8::opaque(169, 169, 169),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
