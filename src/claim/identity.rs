//! Identity provider contract

use thiserror::Error;

use super::types::Identity;

/// Errors returned by identity providers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("identity profile is incomplete: missing {field}")]
    IncompleteProfile { field: &'static str },

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Something that can tell who the current user is
pub trait IdentityProvider {
    fn authenticate(&self) -> Result<Identity, IdentityError>;
}

/// Provider returning a fixed identity, such as one given on the command line
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Provider with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn authenticate(&self) -> Result<Identity, IdentityError> {
        let identity = self.identity.as_ref().ok_or(IdentityError::Unauthenticated)?;
        if identity.id.trim().is_empty() {
            return Err(IdentityError::IncompleteProfile { field: "id" });
        }
        if identity.username.trim().is_empty() {
            return Err(IdentityError::IncompleteProfile { field: "username" });
        }
        Ok(identity.clone())
    }
}
