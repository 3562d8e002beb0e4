use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeprecatedError {
    #[error("Failed to parse PDF {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("The document {path} is encrypted, and we can't decrypt it: {reason}")]
    EncryptedError { path: PathBuf, reason: String },

    #[error("Font /{font} on page {page} has no font descriptor")]
    MissingDescriptor { page: u32, font: String },

    #[error("Broken object graph: {0}")]
    TraversalError(String),

    #[error("Failed to save PDF {path}: {reason}")]
    SaveError { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
