use crate::error::{InlineError, Result};
use crate::inline::IMAGE_PREFIX;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads the whole Markdown document at the given path
///
/// # Errors
///
/// `InlineError::DocumentRead` if the file is missing, unreadable or not UTF-8.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| InlineError::DocumentRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the document text to `path` in a single call, replacing any existing file
///
/// # Errors
///
/// `InlineError::OutputWrite` if the file can't be created or written.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| InlineError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves a captured `images/...` reference against the images directory
///
/// Only the leading `images/` is stripped; the remainder is joined as-is.
pub fn resolve_image_path(relative: &str, images_dir: &Path) -> PathBuf {
    let stripped = relative.strip_prefix(IMAGE_PREFIX).unwrap_or(relative);
    images_dir.join(stripped)
}

/// Checks whether a resolved image path exists
///
/// # Errors
///
/// `InlineError::ImageRead` when existence can't be determined (e.g. the
/// images directory is not searchable). A plain "not found" is `Ok(false)`.
pub fn image_exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|source| InlineError::ImageRead {
        path: path.to_path_buf(),
        source,
    })
}
