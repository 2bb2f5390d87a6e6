use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{HeatmapError, HeatmapResult};
use crate::foundation::math::{lerp_u8, unit_to_u8};

/// Opaque 8-bit RGB color, written as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Strict `#RRGGBB` parsing (case-insensitive hex digits).
    pub fn from_hex(s: &str) -> HeatmapResult<Self> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(HeatmapError::malformed_color(format!(
                "\"{s}\" must start with '#'"
            )));
        };
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HeatmapError::malformed_color(format!(
                "\"{s}\" must be #RRGGBB"
            )));
        }

        let byte = |i: usize| -> HeatmapResult<u8> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| HeatmapError::malformed_color(format!("invalid hex byte in \"{s}\"")))
        };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?))
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba { rgb: self, a }
    }

    /// CSS functional notation without spaces, e.g. `rgb(255,69,0)`.
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = HeatmapError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// RGB with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    pub fn opaque(rgb: Rgb) -> Self {
        Self { rgb, a: 1.0 }
    }

    pub fn alpha_u8(self) -> u8 {
        unit_to_u8(self.a)
    }

    pub fn to_straight_rgba8(self) -> [u8; 4] {
        [self.rgb.r, self.rgb.g, self.rgb.b, self.alpha_u8()]
    }

    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.rgb.r, self.rgb.g, self.rgb.b, self.alpha_u8())
    }

    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }
}

/// Decompose `#RRGGBB` into channels.
pub fn hex_to_channels(hex: &str) -> HeatmapResult<[u8; 3]> {
    Rgb::from_hex(hex).map(Rgb::channels)
}

/// Per-channel linear blend: `round(a + ratio * (b - a))`, clamped to `0..=255`.
pub fn interpolate(a: Rgb, b: Rgb, ratio: f64) -> Rgb {
    Rgb::new(
        lerp_u8(a.r, b.r, ratio),
        lerp_u8(a.g, b.g, ratio),
        lerp_u8(a.b, b.b, ratio),
    )
}

/// [`interpolate`] over hex strings.
pub fn interpolate_hex(a: &str, b: &str, ratio: f64) -> HeatmapResult<Rgb> {
    Ok(interpolate(Rgb::from_hex(a)?, Rgb::from_hex(b)?, ratio))
}

#[cfg(test)]
#[path = "../../tests/unit/render/color.rs"]
mod tests;
