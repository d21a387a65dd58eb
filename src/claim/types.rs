//! Claim records and the errors raised while claiming

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::StrokeStyle;

use super::identity::IdentityError;

/// The account a claim belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// A stored claim binding a normalized name to its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Store-assigned, increasing in insertion order
    pub id: u64,
    pub name: String,
    pub signature_path: String,
    pub stroke: StrokeStyle,
    pub include_numbers: bool,
    pub owner: Identity,
}

/// A claim that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaim {
    pub name: String,
    pub signature_path: String,
    pub stroke: StrokeStyle,
    pub include_numbers: bool,
    pub owner: Identity,
}

impl NewClaim {
    /// Validate and normalize a claim request
    pub fn new(
        name: &str,
        signature_path: impl Into<String>,
        stroke: StrokeStyle,
        include_numbers: bool,
        owner: Identity,
    ) -> Result<Self, ClaimError> {
        let name = normalize_name(name)?;
        let signature_path = signature_path.into();
        if signature_path.trim().is_empty() {
            return Err(ClaimError::EmptySignature { name });
        }
        Ok(Self {
            name,
            signature_path,
            stroke,
            include_numbers,
            owner,
        })
    }

    pub(crate) fn into_record(self, id: u64) -> ClaimRecord {
        ClaimRecord {
            id,
            name: self.name,
            signature_path: self.signature_path,
            stroke: self.stroke,
            include_numbers: self.include_numbers,
            owner: self.owner,
        }
    }
}

/// Errors that can occur while claiming or looking up signatures
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("'{name}' is already claimed by @{claimed_by}")]
    AlreadyClaimed { name: String, claimed_by: String },

    #[error("@{owner} already owns the signature '{name}'")]
    OwnerAlreadyClaimed { owner: String, name: String },

    #[error("invalid signature name '{0}'")]
    InvalidName(String),

    #[error("'{name}' has no keys on this layout, nothing to claim")]
    EmptySignature { name: String },

    #[error("claim store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("claim store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("claim store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Normalize a name into its claim key
///
/// Surrounding whitespace is trimmed and the rest is uppercased, matching the
/// case-insensitive key lookup used for drawing. Punctuation and non-Latin
/// scripts are kept, so names that draw differently never share a key.
pub fn normalize_name(raw: &str) -> Result<String, ClaimError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClaimError::InvalidName(raw.to_string()));
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice", "ALICE")]
    #[case("  Bob Smith ", "BOB SMITH")]
    #[case("o'neil", "O'NEIL")]
    #[case("r2-d2", "R2-D2")]
    #[case(" سلام ", "سلام")]
    fn test_normalize_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_name(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_normalize_rejects(#[case] raw: &str) {
        assert!(matches!(
            normalize_name(raw),
            Err(ClaimError::InvalidName(_))
        ));
    }

    #[test]
    fn test_punctuation_is_part_of_the_key() {
        assert_ne!(normalize_name("o'neil").unwrap(), normalize_name("oneil").unwrap());
    }

    #[test]
    fn test_new_claim_rejects_empty_path() {
        let result = NewClaim::new(
            "ann",
            "",
            StrokeStyle::default(),
            false,
            Identity::new("1", "ann"),
        );
        assert!(matches!(
            result,
            Err(ClaimError::EmptySignature { name }) if name == "ANN"
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = ClaimError::AlreadyClaimed {
            name: "ANN".to_string(),
            claimed_by: "someone".to_string(),
        };
        assert_eq!(err.to_string(), "'ANN' is already claimed by @someone");
    }

    #[test]
    fn test_record_json_shape() {
        let record = NewClaim::new(
            "ann",
            "M 0 0 L 1 1",
            StrokeStyle::default(),
            true,
            Identity::new("42", "ann").with_avatar("https://img.example/a.png"),
        )
        .unwrap()
        .into_record(7);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "ANN");
        assert_eq!(json["include_numbers"], true);
        assert_eq!(json["stroke"]["color"], "#ffffff");
        assert_eq!(json["owner"]["avatar_url"], "https://img.example/a.png");

        let back: ClaimRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
