use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mdinline operations
#[derive(Error, Debug)]
pub enum InlineError {
    /// IO error when reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The Markdown document could not be read
    #[error("Failed to read document {path}: {source}")]
    DocumentRead { path: PathBuf, source: io::Error },

    /// The output document could not be written
    #[error("Failed to write output {path}: {source}")]
    OutputWrite { path: PathBuf, source: io::Error },

    /// An image path exists but could not be inspected or read
    #[error("Failed to read image {path}: {source}")]
    ImageRead { path: PathBuf, source: io::Error },

    /// File not found error with specific path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InlineError>;
