use image::{Rgb, Rgba};
use palette::{FromColor, Hsl, Srgb};

use crate::error::{IconError, Result};

/// An opaque RGB color. Alpha, when a source pixel has one, travels
/// separately on the pixel and never takes part in color comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RRGGBB`, with or without a leading `#`.
    pub fn from_hex(input: &str) -> Result<Self> {
        let hex = input.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(IconError::InvalidColor(format!(
                "expected 6 hex digits, got {input:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| IconError::InvalidColor(format!("{input:?}: {e}")))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hue/saturation/lightness view of this color, all components in `[0, 1]`
    /// except hue which palette reports in degrees.
    pub fn to_hsl(self) -> Hsl<palette::encoding::Srgb, f64> {
        let rgb: Srgb<f64> = Srgb::new(self.r, self.g, self.b).into_format();
        Hsl::from_color(rgb)
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, _] = px.0;
        Self::new(r, g, b)
    }
}

impl From<Rgb<u8>> for Color {
    fn from(px: Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self::new(r, g, b)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(c: Color) -> Self {
        Srgb::new(c.r, c.g, c.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Squared Euclidean distance over the RGB channels. Exact, so it is what
/// the masks compare against.
#[inline(always)]
pub fn distance_squared(a: Color, b: Color) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Euclidean RGB distance. Symmetric, zero only for equal colors, at most
/// `255 * sqrt(3)`.
#[inline]
pub fn distance(a: Color, b: Color) -> f64 {
    (distance_squared(a, b) as f64).sqrt()
}
