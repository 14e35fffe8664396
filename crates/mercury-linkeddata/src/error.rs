//! Error types for the mercury-linkeddata crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkedDataError {
    #[error("Expected an expanded JSON-LD array or an object with @graph")]
    NotExpanded,

    #[error("Unknown class: {type_iri}")]
    UnknownClass { type_iri: String },

    #[error("Invalid IRI base: {0}")]
    InvalidIriBase(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LinkedDataError>;
