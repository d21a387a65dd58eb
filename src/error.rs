//! Error types for parsing user-supplied option values

use thiserror::Error;

/// Errors raised when turning text (CLI flags, preset files) into typed options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("unknown keyboard layout '{name}' (valid layouts: {valid})")]
    UnknownLayout { name: String, valid: String },

    #[error("unknown dash pattern '{name}' (valid patterns: solid, dashed, dotted)")]
    UnknownDashPattern { name: String },
}

impl ParseError {
    /// Create an invalid color error
    pub fn color(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
