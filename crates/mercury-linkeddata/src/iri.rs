//! Minting IRIs for new entities.

use uuid::Uuid;

use crate::error::{LinkedDataError, Result};

/// Mint a new entity IRI: `base` followed by a random UUID.
///
/// A `/` is inserted when `base` does not already end in `/` or `#`.
pub fn generate_iri(base: &str) -> Result<String> {
    mint(base, Uuid::new_v4())
}

fn mint(base: &str, id: Uuid) -> Result<String> {
    if !base.contains("://") {
        return Err(LinkedDataError::InvalidIriBase(base.to_string()));
    }

    let separator = if base.ends_with('/') || base.ends_with('#') {
        ""
    } else {
        "/"
    };
    Ok(format!("{base}{separator}{id}"))
}
