use crate::foundation::error::{CaptionError, CaptionResult};

/// Expand backslash escapes in caption text typed on the command line.
///
/// Supports the usual control escapes (`\n`, `\t`, `\r`, `\a`, `\b`, `\f`, `\v`, `\e`),
/// octal `\0`..`\777` (up to three digits), `\xHH`, `\uHHHH` and `\cX` control characters
/// (`X` in `@`..`_` or a letter, so `\c[` is ESC). Escaped punctuation and whitespace stand
/// for themselves, so `\\` is a backslash and `\.` a dot; an unrecognized escape on a letter,
/// digit or `_` is rejected.
pub fn unescape(input: &str) -> CaptionResult<String> {
    if !input.contains('\\') {
        return Ok(input.to_string());
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(esc) = chars.next() else {
            return Err(CaptionError::validation("illegal '\\' at end of text"));
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            'e' => out.push('\u{1B}'),
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                // Octal escapes address a single byte.
                out.push(char::from((value & 0xFF) as u8));
            }
            'x' => out.push(hex_char(&mut chars, 2)?),
            'u' => out.push(hex_char(&mut chars, 4)?),
            'c' => {
                let ctl = chars
                    .next()
                    .map(|c| c.to_ascii_uppercase())
                    .filter(|c| ('@'..='_').contains(c))
                    .ok_or_else(|| CaptionError::validation("missing control character after '\\c'"))?;
                out.push(char::from(ctl as u8 - b'@'));
            }
            other if other.is_alphanumeric() || other == '_' => {
                return Err(CaptionError::validation(format!(
                    "unrecognized escape sequence '\\{other}'"
                )));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn hex_char(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
) -> CaptionResult<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        let d = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| {
                CaptionError::validation(format!("expected {digits} hex digits in escape"))
            })?;
        value = value * 16 + d;
    }
    char::from_u32(value).ok_or_else(|| {
        CaptionError::validation(format!("escape \\u{value:04x} is not a valid character"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/escape.rs"]
mod tests;
