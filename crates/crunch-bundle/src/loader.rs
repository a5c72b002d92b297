//! Source loading.
//!
//! Validates the document root, the source list and the output target, and
//! reads the sources when a rebuild is needed. Paths are handled as web paths
//! from the document root (`/css/site.css`), which is also what ends up in the
//! generated `<link>` markup.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crunch_common::path;
use crunch_common::warning::warn_once;

use crate::config::BundleConfig;
use crate::error::{CrunchError, Rejection, RejectedSource};

/// How many leading bytes are inspected when sniffing a mime type.
const SNIFF_LEN: u64 = 8 * 1024;

/// A validated source stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Normalised web path (`/css/site.css`).
    pub web_path: String,
    /// Resolved file-system path.
    pub path: PathBuf,
    /// Last modification time.
    pub modified: SystemTime,
}

/// The validated output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Normalised web path (`/css/site.min.css`).
    pub web_path: String,
    /// Resolved file-system path.
    pub path: PathBuf,
    /// Modification time, if the file already exists.
    pub modified: Option<SystemTime>,
}

/// Validate and normalise the document root.
///
/// # Errors
///
/// Returns [`CrunchError::EmptyDocRoot`] or [`CrunchError::MissingDocRoot`].
pub fn doc_root(root: &Path) -> Result<PathBuf, CrunchError> {
    let normalised = path::normalise(&root.to_string_lossy(), false);
    if normalised.is_empty() {
        return Err(CrunchError::EmptyDocRoot);
    }

    let root = PathBuf::from(normalised);
    if !root.is_dir() {
        return Err(CrunchError::MissingDocRoot(root));
    }
    Ok(root)
}

/// Validate every source, in order, dropping duplicates.
///
/// All rejections are collected before failing so they can be fixed in one go.
///
/// # Errors
///
/// Returns [`CrunchError::NoSources`] for an empty list and
/// [`CrunchError::InvalidSources`] listing every rejected source.
pub fn sources<S: AsRef<str>>(
    root: &Path,
    requested: &[S],
    config: &BundleConfig,
) -> Result<Vec<SourceFile>, CrunchError> {
    if requested.is_empty() {
        return Err(CrunchError::NoSources);
    }

    let mut accepted: Vec<SourceFile> = Vec::with_capacity(requested.len());
    let mut rejected: Vec<RejectedSource> = Vec::new();

    for raw in requested {
        let web_path = path::normalise(raw.as_ref(), true);
        if accepted.iter().any(|source| source.web_path == web_path)
            || rejected.iter().any(|source| source.path == web_path)
        {
            let _ = warn_once("bundle", &format!("duplicate source {web_path} ignored"));
            continue;
        }

        match validate_source(root, &web_path, config) {
            Ok(source) => accepted.push(source),
            Err(reason) => rejected.push(RejectedSource {
                path: web_path,
                reason,
            }),
        }
    }

    if !rejected.is_empty() {
        return Err(CrunchError::InvalidSources(rejected));
    }
    Ok(accepted)
}

/// Check one source file on disk.
fn validate_source(
    root: &Path,
    web_path: &str,
    config: &BundleConfig,
) -> Result<SourceFile, Rejection> {
    let file_path = path::resolve(root, web_path);
    let has_extension = path::extension(web_path) == Some(config.extension.as_str());

    let Ok(metadata) = fs::metadata(&file_path) else {
        return Err(if has_extension {
            Rejection::NotFound
        } else {
            Rejection::Invalid
        });
    };

    if !has_extension || !metadata.is_file() {
        return Err(Rejection::Invalid);
    }

    let mime = sniff_mime(&file_path).ok_or(Rejection::NotFound)?;
    if !config.accepts_mime(mime) {
        tracing::debug!(web_path, mime, "source rejected by mime type");
        return Err(Rejection::Invalid);
    }

    let modified = metadata.modified().map_err(|_| Rejection::Invalid)?;
    Ok(SourceFile {
        web_path: web_path.to_string(),
        path: file_path,
        modified,
    })
}

/// Guess the mime type of a file from its leading bytes.
///
/// Text that decodes as UTF-8 without NUL bytes is `text/plain`; anything
/// else is `application/octet-stream`. Returns `None` if the file cannot be
/// opened or read.
#[must_use]
pub fn sniff_mime(file: &Path) -> Option<&'static str> {
    let mut head = Vec::new();
    let _ = File::open(file)
        .ok()?
        .take(SNIFF_LEN)
        .read_to_end(&mut head)
        .ok()?;

    let text = match std::str::from_utf8(&head) {
        Ok(_) => true,
        // A multi-byte character cut off by the sniff window is still text
        Err(error) => error.error_len().is_none(),
    };

    if text && !head.contains(&0) {
        Some("text/plain")
    } else {
        Some("application/octet-stream")
    }
}

/// Validate the output location against the root and the accepted sources.
///
/// # Errors
///
/// Returns [`CrunchError::OutputIsSource`], [`CrunchError::MissingOutputDir`],
/// [`CrunchError::MissingOutputName`] or [`CrunchError::OutputExtension`].
pub fn output(
    root: &Path,
    requested: &str,
    sources: &[SourceFile],
    config: &BundleConfig,
) -> Result<OutputTarget, CrunchError> {
    let web_path = path::normalise(requested, true);

    // Never overwrite a source
    if sources.iter().any(|source| source.web_path == web_path) {
        return Err(CrunchError::OutputIsSource(web_path));
    }

    let file_path = path::resolve(root, &web_path);
    let dir = file_path.parent().unwrap_or(root);
    if !dir.is_dir() {
        return Err(CrunchError::MissingOutputDir(dir.to_path_buf()));
    }

    if path::file_stem(&web_path).trim().is_empty() {
        return Err(CrunchError::MissingOutputName);
    }

    if path::extension(&web_path) != Some(config.extension.as_str()) {
        return Err(CrunchError::OutputExtension {
            path: web_path,
            expected: config.extension.clone(),
        });
    }

    let modified = fs::metadata(&file_path)
        .and_then(|metadata| metadata.modified())
        .ok();

    Ok(OutputTarget {
        web_path,
        path: file_path,
        modified,
    })
}

/// The most recent modification time across all sources.
#[must_use]
pub fn newest(sources: &[SourceFile]) -> Option<SystemTime> {
    sources.iter().map(|source| source.modified).max()
}

/// Read every source in order and join them, each trimmed and followed by a
/// blank line.
///
/// # Errors
///
/// Returns [`CrunchError::Read`] for the first source that cannot be read.
pub fn combine(sources: &[SourceFile]) -> Result<String, CrunchError> {
    let mut combined = String::new();
    for source in sources {
        let css = fs::read_to_string(&source.path).map_err(|error| CrunchError::Read {
            path: source.path.clone(),
            source: error,
        })?;
        combined.push_str(css.trim());
        combined.push_str("\n\n");
    }
    Ok(combined)
}
