use crate::encode::{data_uri, encode};
use crate::error::{InlineError, Result};
use crate::fs_utils::{image_exists, read_document, resolve_image_path, write_document};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Logical root every inlinable image reference starts with
pub const IMAGE_PREFIX: &str = "images/";

/// Suffix appended to the program name for the output document
pub const OUTPUT_SUFFIX: &str = "-convert";

const IMAGE_PATTERN: &str = r"!\[([^\]]*)\]\((images/[^)]+)\)";

/// Configuration for a single inlining run
#[derive(Debug, Clone, PartialEq)]
pub struct InlineConfig {
    /// Markdown document to read
    pub document_path: PathBuf,
    /// Directory `images/...` references are resolved against
    pub images_dir: PathBuf,
    /// File the rewritten document is written to
    pub output_path: PathBuf,
}

impl InlineConfig {
    /// Naming convention: `<stem>.md` in, `<stem>-convert.md` out, images under `images/`
    pub fn for_program(stem: &str) -> Self {
        Self {
            document_path: PathBuf::from(format!("{stem}.md")),
            images_dir: PathBuf::from(IMAGE_PREFIX),
            output_path: PathBuf::from(format!("{stem}{OUTPUT_SUFFIX}.md")),
        }
    }

    /// Same convention keyed on an explicit document: the output lands next to it
    pub fn for_document(document_path: &Path) -> Self {
        let stem = document_path
            .file_stem()
            .map_or_else(program_stem, |s| s.to_string_lossy().into_owned());
        Self {
            document_path: document_path.to_path_buf(),
            images_dir: PathBuf::from(IMAGE_PREFIX),
            output_path: document_path.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.md")),
        }
    }
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self::for_program(&program_stem())
    }
}

/// File stem of the running executable, falling back to the package name
pub fn program_stem() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// An `![alt](images/...)` reference found in a document
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReference {
    /// The full match, e.g. `![A cat](images/cat.png)`
    pub full_match: String,
    /// Alt text between the brackets, verbatim
    pub alt: String,
    /// Relative path between the parentheses, including the `images/` prefix
    pub path: String,
    /// Starting byte position in the document
    pub start: usize,
    /// Ending byte position in the document
    pub end: usize,
}

/// Outcome of an inlining pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineReport {
    /// Resolved paths of images that were embedded
    pub inlined: Vec<PathBuf>,
    /// Resolved paths of images that did not exist; their references are untouched
    pub missing: Vec<PathBuf>,
}

/// Rewritten document text together with its report
#[derive(Debug, Clone)]
pub struct Inlined {
    pub text: String,
    pub report: InlineReport,
}

/// Resolution details for one reference, without touching the document
#[derive(Debug, Clone)]
pub struct ReferenceStatus {
    pub reference: ImageReference,
    pub resolved: PathBuf,
    pub exists: bool,
    /// Size in bytes when the resolved path is a regular file
    pub size: Option<u64>,
}

/// Finds all `images/` image references in the given text, left to right
///
/// # Errors
///
/// Returns `InlineError::Regex` if there's an error compiling the regex pattern.
pub fn find_image_references(text: &str) -> Result<Vec<ImageReference>> {
    let pattern = Regex::new(IMAGE_PATTERN)?;
    let mut references = Vec::new();

    for capture in pattern.captures_iter(text) {
        if let Some(full_match) = capture.get(0)
            && let Some(alt) = capture.get(1)
            && let Some(path) = capture.get(2)
        {
            references.push(ImageReference {
                full_match: full_match.as_str().to_string(),
                alt: alt.as_str().to_string(),
                path: path.as_str().to_string(),
                start: full_match.start(),
                end: full_match.end(),
            });
        }
    }

    Ok(references)
}

/// Replaces every resolvable image reference in `text` with an embedded data URI
///
/// Substitution is by exact matched text, so a reference repeated verbatim is
/// replaced everywhere at once and processed a single time. References whose
/// file is missing stay as they are and are listed in the report.
///
/// # Errors
///
/// - `InlineError::ImageRead` if an image path can't be inspected or read.
/// - `InlineError::Regex` from `find_image_references`.
pub fn inline_images(text: &str, images_dir: &Path) -> Result<Inlined> {
    let references = find_image_references(text)?;
    debug!("Found {} image references", references.len());

    let mut result = text.to_string();
    let mut report = InlineReport::default();
    let mut seen = HashSet::new();

    for reference in &references {
        if !seen.insert(reference.full_match.as_str()) {
            continue;
        }

        let image_path = resolve_image_path(&reference.path, images_dir);
        if !image_exists(&image_path)? {
            debug!("Skipping {}: {} not found", reference.path, image_path.display());
            report.missing.push(image_path);
            continue;
        }

        let payload = encode(&image_path).map_err(|e| match e {
            InlineError::Io(source) => InlineError::ImageRead {
                path: image_path.clone(),
                source,
            },
            other => other,
        })?;
        let replacement = format!("![{}]({})", reference.alt, data_uri(&payload));
        result = result.replace(&reference.full_match, &replacement);

        debug!("Inlined {}", image_path.display());
        report.inlined.push(image_path);
    }

    Ok(Inlined {
        text: result,
        report,
    })
}

/// Reads the configured document, inlines its images and writes the output once
///
/// # Errors
///
/// - `InlineError::DocumentRead` if the document can't be read.
/// - `InlineError::OutputWrite` if the output can't be written.
/// - Errors from `inline_images`.
pub fn transform(config: &InlineConfig) -> Result<InlineReport> {
    info!("Reading document from {}", config.document_path.display());
    let document = read_document(&config.document_path)?;

    let Inlined { text, report } = inline_images(&document, &config.images_dir)?;

    info!("Writing output to {}", config.output_path.display());
    write_document(&config.output_path, &text)?;

    info!(
        inlined = report.inlined.len(),
        missing = report.missing.len(),
        "Processing complete"
    );
    Ok(report)
}

/// Resolves every reference in `text` and reports whether its image exists
///
/// # Errors
///
/// Returns `InlineError::ImageRead` if an image path can't be inspected.
pub fn inspect_references(text: &str, images_dir: &Path) -> Result<Vec<ReferenceStatus>> {
    find_image_references(text)?
        .into_iter()
        .map(|reference| -> Result<ReferenceStatus> {
            let resolved = resolve_image_path(&reference.path, images_dir);
            let exists = image_exists(&resolved)?;
            let size = fs::metadata(&resolved)
                .ok()
                .filter(std::fs::Metadata::is_file)
                .map(|m| m.len());
            Ok(ReferenceStatus {
                reference,
                resolved,
                exists,
                size,
            })
        })
        .collect()
}
