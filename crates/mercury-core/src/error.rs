use thiserror::Error;

/// Top-level error type for Mercury.
#[derive(Error, Debug)]
pub enum MercuryError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, MercuryError>;
