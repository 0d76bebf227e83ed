use std::{fmt, str::FromStr};

use crate::foundation::error::{BrandkitError, BrandkitResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Logical canvas dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
}

impl Canvas {
    /// Rejects zero-sized canvases.
    pub fn new(width: u32, height: u32) -> BrandkitResult<Self> {
        if width == 0 || height == 0 {
            return Err(BrandkitError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// X coordinate of the vertical center line.
    pub fn center_x(self) -> f64 {
        f64::from(self.width) * 0.5
    }
}

/// Opaque sRGB color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// `#FFFFFF`.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// `#000000`.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `#FF00FF`, the default keying placeholder.
    pub const MAGENTA: Self = Self::new(255, 0, 255);

    /// Color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `[r, g, b]`.
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// True when every channel is strictly above `threshold`.
    pub fn all_channels_above(self, threshold: u8) -> bool {
        self.channels().iter().all(|&c| c > threshold)
    }

    /// True when every channel differs from `other` by at most `tolerance`.
    pub fn within(self, other: Self, tolerance: u8) -> bool {
        self.channels()
            .iter()
            .zip(other.channels())
            .all(|(&a, b)| a.abs_diff(b) <= tolerance)
    }

    /// RGBA pixel with the given alpha.
    pub fn to_rgba(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = BrandkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = BrandkitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_hex(&value)
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        value.to_hex()
    }
}

fn parse_hex(s: &str) -> BrandkitResult<Rgb8> {
    let raw = s.trim();
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    if !hex.is_ascii() {
        return Err(BrandkitError::validation(format!(
            "invalid hex color \"{raw}\""
        )));
    }

    fn hex_byte(pair: &str) -> BrandkitResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| BrandkitError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    match hex.len() {
        6 => Ok(Rgb8::new(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        3 => {
            let nibble = |i: usize| -> BrandkitResult<u8> {
                let v = hex_byte(&hex[i..i + 1])?;
                Ok(v * 17)
            };
            Ok(Rgb8::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => Err(BrandkitError::validation(format!(
            "hex color must be #RRGGBB or #RGB, got \"{raw}\""
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
