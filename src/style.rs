//! Stroke styling applied to a signature path
//!
//! Style never changes the geometry; it only decides how the path is painted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::ParseError;

pub const MIN_STROKE_WIDTH: f64 = 1.0;
pub const MAX_STROKE_WIDTH: f64 = 8.0;

/// Whether the stroke uses one color or a left-to-right gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Solid,
    Gradient,
}

/// Dash pattern of the stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashPattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl DashPattern {
    pub fn name(&self) -> &'static str {
        match self {
            DashPattern::Solid => "solid",
            DashPattern::Dashed => "dashed",
            DashPattern::Dotted => "dotted",
        }
    }

    /// Value of the SVG `stroke-dasharray` attribute, if any
    pub fn dash_array(&self) -> Option<&'static str> {
        match self {
            DashPattern::Solid => None,
            DashPattern::Dashed => Some("6 12"),
            DashPattern::Dotted => Some("0 8"),
        }
    }
}

impl fmt::Display for DashPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DashPattern {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(DashPattern::Solid),
            "dashed" => Ok(DashPattern::Dashed),
            "dotted" => Ok(DashPattern::Dotted),
            _ => Err(ParseError::UnknownDashPattern {
                name: s.to_string(),
            }),
        }
    }
}

/// The resolved paint of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Solid(Rgb),
    Gradient { start: Rgb, end: Rgb },
}

/// Presentation attributes of a signature stroke
///
/// Both the solid color and the gradient endpoints are kept so switching
/// `mode` back and forth does not lose either choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub mode: ColorMode,
    pub color: Rgb,
    pub gradient_start: Rgb,
    pub gradient_end: Rgb,
    pub width: f64,
    pub dash: DashPattern,
    pub glow: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            mode: ColorMode::Solid,
            color: Rgb::WHITE,
            gradient_start: Rgb::new(0xff, 0x6b, 0x6b),
            gradient_end: Rgb::new(0x4e, 0xcd, 0xc4),
            width: 3.0,
            dash: DashPattern::Solid,
            glow: false,
        }
    }
}

impl StrokeStyle {
    /// Create a style with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a single color
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.mode = ColorMode::Solid;
        self.color = color;
        self
    }

    /// Use a two-color gradient
    pub fn with_gradient(mut self, start: Rgb, end: Rgb) -> Self {
        self.mode = ColorMode::Gradient;
        self.gradient_start = start;
        self.gradient_end = end;
        self
    }

    /// Set the stroke width, clamped to the supported range
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = clamp_width(width);
        self
    }

    /// Set the dash pattern
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    /// Enable or disable the glow filter
    pub fn with_glow(mut self, glow: bool) -> Self {
        self.glow = glow;
        self
    }

    /// Copy of this style with the width forced into range
    pub fn normalized(mut self) -> Self {
        self.width = clamp_width(self.width);
        self
    }

    /// The paint selected by `mode`
    pub fn paint(&self) -> Paint {
        match self.mode {
            ColorMode::Solid => Paint::Solid(self.color),
            ColorMode::Gradient => Paint::Gradient {
                start: self.gradient_start,
                end: self.gradient_end,
            },
        }
    }
}

fn clamp_width(width: f64) -> f64 {
    if width.is_nan() {
        return MIN_STROKE_WIDTH;
    }
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}
