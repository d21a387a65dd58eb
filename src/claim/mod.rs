//! Claiming signatures
//!
//! A claim binds a normalized name to one owner. Each name can be claimed
//! once and each owner may hold a single claim.

pub mod identity;
pub mod store;
pub mod types;

pub use identity::{IdentityError, IdentityProvider, StaticIdentity};
pub use store::{ClaimStore, JsonFileClaimStore, MemoryClaimStore};
pub use types::{normalize_name, ClaimError, ClaimRecord, Identity, NewClaim};

use tracing::info;

use crate::{Signature, SignatureOptions};

/// Draw `name` with `options` and claim it for the authenticated user
pub fn claim_signature(
    store: &dyn ClaimStore,
    identity: &dyn IdentityProvider,
    name: &str,
    options: &SignatureOptions,
) -> Result<ClaimRecord, ClaimError> {
    let owner = identity.authenticate()?;
    let signature = Signature::new(name, options);
    let claim = NewClaim::new(
        name,
        signature.path_data(),
        options.stroke.clone(),
        options.include_numbers,
        owner,
    )?;

    let record = store.insert_claim(claim)?;
    info!(name = %record.name, owner = %record.owner.username, "signature claimed");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_signature() {
        let store = MemoryClaimStore::new();
        let ann = StaticIdentity::new(Identity::new("1", "ann"));

        let record =
            claim_signature(&store, &ann, "Ann", &SignatureOptions::default()).unwrap();
        assert_eq!(record.name, "ANN");
        assert!(record.signature_path.starts_with("M 73 100"));
        assert!(store.exists("ann").unwrap());
    }

    #[test]
    fn test_claim_requires_identity() {
        let store = MemoryClaimStore::new();
        let result = claim_signature(
            &store,
            &StaticIdentity::anonymous(),
            "ann",
            &SignatureOptions::default(),
        );
        assert!(matches!(
            result,
            Err(ClaimError::Identity(IdentityError::Unauthenticated))
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_claim_with_nothing_to_draw() {
        let store = MemoryClaimStore::new();
        let ann = StaticIdentity::new(Identity::new("1", "ann"));
        // Digits are not on the keyboard without the number row
        let result = claim_signature(&store, &ann, "123", &SignatureOptions::default());
        assert!(matches!(result, Err(ClaimError::EmptySignature { .. })));
    }

    #[test]
    fn test_second_identity_sees_conflict() {
        let store = MemoryClaimStore::new();
        let ann = StaticIdentity::new(Identity::new("1", "ann"));
        let bob = StaticIdentity::new(Identity::new("2", "bob"));
        let options = SignatureOptions::default();

        let first = claim_signature(&store, &ann, "kai", &options).unwrap();
        let err = claim_signature(&store, &bob, "KAI", &options).unwrap_err();
        assert_eq!(err.to_string(), "'KAI' is already claimed by @ann");
        assert_eq!(store.find("kai").unwrap(), Some(first));
    }
}
