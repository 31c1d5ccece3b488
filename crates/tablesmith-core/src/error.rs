use thiserror::Error;

/// Core error type shared across tablesmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema violates a required invariant; generation never starts.
    #[error("invalid schema: {0}")]
    Validation(String),
    /// DDL text or tabular input could not be turned into a schema.
    #[error("parse error: {0}")]
    Parse(String),
    /// A requested feature is not supported.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Convenience alias for results returned by tablesmith crates.
pub type Result<T> = std::result::Result<T, Error>;
