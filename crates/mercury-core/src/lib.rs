//! mercury-core: Shared configuration, error handling, and vocabulary constants.
//!
//! This crate provides the foundations used by every Mercury crate:
//! - IRI constants for the RDF, RDFS, XSD, SHACL, DASH and Fairspace vocabularies
//! - Configuration loading (`mercury.toml` + `MERCURY__` environment variables)
//! - The common error type

pub mod config;
pub mod error;
pub mod vocab;

pub use config::{MercuryConfig, SearchConfig};
pub use error::MercuryError;
