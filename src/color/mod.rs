use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const LINEAR_SEGMENT_THRESHOLD: f64 = 0.03928;
const LUMINANCE_WEIGHT_RED: f64 = 0.2126;
const LUMINANCE_WEIGHT_GREEN: f64 = 0.7152;
const LUMINANCE_WEIGHT_BLUE: f64 = 0.0722;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color format: {input:?}; expected #RGB or #RRGGBB")]
    InvalidColorFormat { input: String },
}

pub type ColorResult<T> = std::result::Result<T, ColorError>;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn relative_luminance(self) -> f64 {
        relative_luminance(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

/// Parse `#RGB`, `#RRGGBB`, or the same without the leading `#`.
pub fn parse_hex(value: &str) -> ColorResult<Rgb> {
    let invalid = || ColorError::InvalidColorFormat {
        input: value.to_string(),
    };

    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match hex.len() {
        3 => {
            let digit = |index: usize| {
                u8::from_str_radix(&hex[index..=index], 16)
                    .map(|nibble| nibble * 0x11)
                    .map_err(|_| invalid())
            };
            Ok(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |index: usize| {
                u8::from_str_radix(&hex[index..index + 2], 16).map_err(|_| invalid())
            };
            Ok(Rgb::new(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => Err(invalid()),
    }
}

fn channel_to_linear(channel: u8) -> f64 {
    let srgb = f64::from(channel) / 255.0;
    if srgb <= LINEAR_SEGMENT_THRESHOLD {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.1 relative luminance in [0.0, 1.0].
pub fn relative_luminance(color: Rgb) -> f64 {
    LUMINANCE_WEIGHT_RED * channel_to_linear(color.r)
        + LUMINANCE_WEIGHT_GREEN * channel_to_linear(color.g)
        + LUMINANCE_WEIGHT_BLUE * channel_to_linear(color.b)
}

pub fn luminance_of_hex(value: &str) -> ColorResult<f64> {
    parse_hex(value).map(relative_luminance)
}
