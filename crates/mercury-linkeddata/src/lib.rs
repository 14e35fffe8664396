//! mercury-linkeddata: Vocabulary-driven materialization of JSON-LD metadata.
//!
//! Turns an expanded JSON-LD graph into the list of properties a form shows
//! for one entity, as declared by the SHACL vocabulary for the entity's
//! types, and turns edited values back into JSON-LD fragments. Also covers
//! property validation, IRI minting for new entities and the file system
//! text search query.

pub mod convert;
pub mod error;
pub mod iri;
pub mod jsonld;
pub mod property;
pub mod search;
pub mod validate;
pub mod vocabulary;

pub use convert::{
    empty_linked_data, from_json_ld, new_entity, to_json_ld, to_json_ld_entity, NewEntity,
};
pub use error::LinkedDataError;
pub use property::{Property, PropertyValue};
pub use vocabulary::Vocabulary;
