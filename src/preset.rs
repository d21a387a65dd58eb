//! Signature presets stored as TOML
//!
//! A preset bundles everything needed to redraw a signature the same way:
//! the layout, numeric mode, curve type and stroke style.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::KeyboardLayout;
use crate::renderer::CurveType;
use crate::style::StrokeStyle;
use crate::SignatureOptions;

/// Errors that can occur when loading or parsing presets
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read preset file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse preset TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize preset TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// A named set of signature options
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Optional name for the preset
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub options: SignatureOptions,
}

/// TOML structure for (de)serializing presets
#[derive(Serialize, Deserialize)]
struct TomlPreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    signature: TomlSignature,
    #[serde(default)]
    stroke: StrokeStyle,
}

#[derive(Serialize, Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct TomlSignature {
    layout: KeyboardLayout,
    include_numbers: bool,
    curve: CurveType,
}

/// Default preset - white solid stroke on QWERTY with straight segments
const DEFAULT_PRESET: &str = r##"
[metadata]
name = "default"
description = "White solid line on a QWERTY keyboard"

[signature]
layout = "qwerty"
include_numbers = false
curve = "linear"

[stroke]
mode = "solid"
color = "#ffffff"
gradient_start = "#ff6b6b"
gradient_end = "#4ecdc4"
width = 3.0
dash = "solid"
glow = false
"##;

impl Preset {
    /// Load preset from TOML file
    pub fn from_file(path: &Path) -> Result<Self, PresetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load preset from TOML string
    ///
    /// Missing sections and keys take their default values; an out of range
    /// stroke width is clamped.
    pub fn from_str(content: &str) -> Result<Self, PresetError> {
        let parsed: TomlPreset = toml::from_str(content)?;

        Ok(Preset {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            options: SignatureOptions {
                layout: parsed.signature.layout,
                include_numbers: parsed.signature.include_numbers,
                curve: parsed.signature.curve,
                stroke: parsed.stroke.normalized(),
            },
        })
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String, PresetError> {
        let metadata = if self.name.is_some() || self.description.is_some() {
            Some(TomlMetadata {
                name: self.name.clone(),
                description: self.description.clone(),
            })
        } else {
            None
        };
        let out = TomlPreset {
            metadata,
            signature: TomlSignature {
                layout: self.options.layout,
                include_numbers: self.options.include_numbers,
                curve: self.options.curve,
            },
            stroke: self.options.stroke.clone(),
        };
        Ok(toml::to_string(&out)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::from_str(DEFAULT_PRESET).expect("Default preset should be valid TOML")
    }
}
