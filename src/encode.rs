//! Image payload encoding: file bytes → base64 → `data:` URI.
//!
//! The declared media type is always `image/png`, whatever the file actually
//! contains. Browsers and most Markdown renderers sniff the payload anyway.

use crate::error::{InlineError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Media type declared in every generated data URI
pub const DATA_URI_MEDIA_TYPE: &str = "image/png";

/// Encodes raw bytes as standard padded base64
pub fn encode_bytes(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Reads the file at `path` and returns its complete contents as base64
///
/// # Errors
///
/// - `InlineError::FileNotFound` if the path doesn't exist.
/// - `InlineError::Io` if the file can't be read.
pub fn encode(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(InlineError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let data = fs::read(path)?;
    let b64 = encode_bytes(&data);
    debug!(
        "Encoded {} → {} bytes base64 ({} raw)",
        path.display(),
        b64.len(),
        data.len()
    );

    Ok(b64)
}

/// Wraps an encoded payload in a `data:image/png;base64,` URI
pub fn data_uri(payload: &str) -> String {
    format!("data:{DATA_URI_MEDIA_TYPE};base64,{payload}")
}
