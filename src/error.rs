//! Error types for pagegist operations.

use thiserror::Error;

/// Errors that can occur at the edges of the extraction pipeline.
///
/// Extraction itself is total: malformed markup degrades to partial values
/// instead of failing. Errors arise only from I/O and from parsing
/// caller-supplied selector strings.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid selector: {0}")]
    Selector(String),
}

pub type Result<T> = std::result::Result<T, Error>;
