//! Error types for the mercury-files crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilesError {
    #[error("Failed to parse WebDAV response: {0}")]
    XmlParse(String),

    #[error("Invalid href in WebDAV response: {href}")]
    InvalidHref { href: String },
}

pub type Result<T> = std::result::Result<T, FilesError>;
