//! Color values and perceptual gradient interpolation
//!
//! Stroke colors are plain sRGB triples. Gradients are interpolated in OKLab
//! so the midpoints between two saturated colors stay bright instead of
//! turning muddy, then converted back into a handful of sRGB stops.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Number of stops emitted for a two-color gradient
pub const DEFAULT_GRADIENT_STOPS: usize = 6;

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand (the leading `#` is optional)
    pub fn from_hex(value: &str) -> Result<Self, ParseError> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::color(value, "not a hexadecimal color"));
        }

        let channel = |s: &str| u8::from_str_radix(s, 16);
        let parsed = match digits.len() {
            6 => (
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
            ),
            3 => {
                let doubled: Vec<String> = digits.chars().map(|c| format!("{c}{c}")).collect();
                (
                    channel(&doubled[0]),
                    channel(&doubled[1]),
                    channel(&doubled[2]),
                )
            }
            n => {
                return Err(ParseError::color(
                    value,
                    format!("expected 3 or 6 hex digits, found {n}"),
                ))
            }
        };

        match parsed {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
            _ => Err(ParseError::color(value, "not a hexadecimal color")),
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to OKLab via linear sRGB and CIE XYZ (D65)
    pub fn to_oklab(&self) -> Oklab {
        let lr = srgb_to_linear(self.r as f64 / 255.0);
        let lg = srgb_to_linear(self.g as f64 / 255.0);
        let lb = srgb_to_linear(self.b as f64 / 255.0);

        let x = lr * 0.4124564 + lg * 0.3575761 + lb * 0.1804375;
        let y = lr * 0.2126729 + lg * 0.7151522 + lb * 0.0721750;
        let z = lr * 0.0193339 + lg * 0.1191920 + lb * 0.9503041;

        let l_ = (0.8189330101 * x + 0.3618667424 * y - 0.1288597137 * z).cbrt();
        let m_ = (0.0329845436 * x + 0.9293118715 * y + 0.0361456387 * z).cbrt();
        let s_ = (0.0482003018 * x + 0.2643662691 * y + 0.6338517070 * z).cbrt();

        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// A color in the OKLab perceptual space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    /// Linear interpolation between two colors, `t` in `0.0..=1.0`
    pub fn lerp(&self, other: &Oklab, t: f64) -> Oklab {
        Oklab {
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Convert back to sRGB, clamping out-of-gamut channels
    pub fn to_rgb(&self) -> Rgb {
        let l_ = self.l + 0.3963377774 * self.a + 0.2158037573 * self.b;
        let m_ = self.l - 0.1055613458 * self.a - 0.0638541728 * self.b;
        let s_ = self.l - 0.0894841775 * self.a - 1.2914855480 * self.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        let x = 1.2270138511 * l - 0.5577999807 * m + 0.2812561490 * s;
        let y = -0.0405801784 * l + 1.1122568696 * m - 0.0716766787 * s;
        let z = -0.0763812845 * l - 0.4214819784 * m + 1.5861632204 * s;

        let lr = x * 3.2404542 + y * -1.5371385 + z * -0.4985314;
        let lg = x * -0.9692660 + y * 1.8760108 + z * 0.0415560;
        let lb = x * 0.0556434 + y * -0.2040259 + z * 1.0572252;

        Rgb::new(
            to_channel(linear_to_srgb(lr)),
            to_channel(linear_to_srgb(lg)),
            to_channel(linear_to_srgb(lb)),
        )
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn to_channel(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// One color stop of a gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientStop {
    pub color: Rgb,
    /// Position along the gradient in whole percent (0..=100)
    pub offset: u8,
}

/// Interpolate `stops` colors from `start` to `end` in OKLab
///
/// Stops are evenly spaced and ordered left to right. A single stop yields
/// `start` at offset 0; zero stops yields an empty list.
pub fn generate_smooth_gradient(start: Rgb, end: Rgb, stops: usize) -> Vec<GradientStop> {
    if stops == 0 {
        return Vec::new();
    }
    if stops == 1 {
        return vec![GradientStop {
            color: start,
            offset: 0,
        }];
    }

    let from = start.to_oklab();
    let to = end.to_oklab();
    let last = (stops - 1) as f64;

    (0..stops)
        .map(|i| {
            let t = i as f64 / last;
            GradientStop {
                color: from.lerp(&to, t).to_rgb(),
                offset: (t * 100.0).round() as u8,
            }
        })
        .collect()
}
