//! # mdinline
//!
//! Rewrites a Markdown document so that local image references become inline
//! base64 `data:` URIs, producing a single self-contained file that renders
//! without the images directory next to it.
//!
//! ## Features
//!
//! - Finds `![alt](images/...)` references
//! - Embeds each existing image as `data:image/png;base64,...`
//! - Leaves references to missing images untouched and reports them
//! - Writes the result once, to a separate output file
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use mdinline::{InlineConfig, transform};
//!
//! let config = InlineConfig::for_program("introducao");
//!
//! match transform(&config) {
//!     Ok(report) => {
//!         for path in &report.missing {
//!             println!("Image not found: {}", path.display());
//!         }
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Inline images of mdinline.md into mdinline-convert.md
//! mdinline
//!
//! # Explicit paths
//! mdinline post.md --images-dir assets/ -o post-convert.md
//! ```

pub mod encode;
pub mod error;
pub mod fs_utils;
pub mod inline;

// Re-export main types and functions for convenience
pub use encode::{data_uri, encode};
pub use error::{InlineError, Result};
pub use inline::{
    ImageReference, InlineConfig, InlineReport, Inlined, ReferenceStatus, find_image_references,
    inline_images, inspect_references, transform,
};
