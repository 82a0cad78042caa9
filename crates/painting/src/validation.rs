use std::str::FromStr;

use thiserror::Error;

use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("Color must have 3 or 6 hex digits: {0:?}")]
    InvalidLength(String),
    #[error("Invalid hex digit in color: {0:?}")]
    InvalidDigit(String),
}

/// Parse a `#rrggbb` or `#rgb` color string (case-insensitive)
pub fn parse_hex_color(input: &str) -> Result<Color, ColorParseError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigit(input.to_string()));
    }

    let channel = |hex: &str| {
        u8::from_str_radix(hex, 16).map_err(|_| ColorParseError::InvalidDigit(input.to_string()))
    };

    match digits.len() {
        6 => Ok(Color::rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        // #abc expands to #aabbcc
        3 => {
            let r = channel(&digits[0..1])?;
            let g = channel(&digits[1..2])?;
            let b = channel(&digits[2..3])?;
            Ok(Color::rgb(r * 17, g * 17, b * 17))
        }
        _ => Err(ColorParseError::InvalidLength(input.to_string())),
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}
