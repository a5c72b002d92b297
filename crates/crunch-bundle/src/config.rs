//! Bundle configuration.
//!
//! [`BundleConfig`] is the immutable policy handed to the loader and the
//! orchestrator. [`Manifest`] is the `crunch.toml` file a project checks in
//! to describe one bundle.

use std::fs;
use std::path::{Path, PathBuf};

use crunch_css::Level;
use serde::Deserialize;

use crate::error::CrunchError;

/// Mime types accepted for source files by default.
pub const DEFAULT_MIME_TYPES: [&str; 2] = ["text/css", "text/plain"];

/// Extension required for source and output files by default.
pub const DEFAULT_EXTENSION: &str = "css";

/// Policy for validating sources and emitting markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    /// Mime types a source file may sniff as.
    pub valid_mime_types: Vec<String>,
    /// Extension required on every source and on the output (without the dot).
    pub extension: String,
    /// Link the individual sources instead of the combined output.
    pub dev_mode: bool,
    /// Append `?t=<unix seconds>` to every linked stylesheet.
    pub cache_buster: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            valid_mime_types: DEFAULT_MIME_TYPES.iter().map(ToString::to_string).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            dev_mode: false,
            cache_buster: false,
        }
    }
}

impl BundleConfig {
    /// Whether `mime` is an accepted source mime type.
    #[must_use]
    pub fn accepts_mime(&self, mime: &str) -> bool {
        self.valid_mime_types.iter().any(|valid| valid == mime)
    }
}

/// A bundle description, usually read from `crunch.toml`.
///
/// ```toml
/// doc_root = "public"
/// sources = ["/css/reset.css", "/css/site.css"]
/// output = "/css/site.min.css"
/// level = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// File-system path of the document root. Relative paths are resolved
    /// against the manifest's directory.
    pub doc_root: PathBuf,
    /// Source paths from the document root, in cascade order.
    pub sources: Vec<String>,
    /// Output path from the document root.
    pub output: String,
    /// Raw minification level; out-of-range values mean no minification.
    #[serde(default)]
    pub level: i64,
    /// Rebuild even if the output looks up to date.
    #[serde(default)]
    pub force: bool,
    /// See [`BundleConfig::dev_mode`].
    #[serde(default)]
    pub dev_mode: bool,
    /// See [`BundleConfig::cache_buster`].
    #[serde(default)]
    pub cache_buster: bool,
}

impl Manifest {
    /// Parse a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is not a valid manifest.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a manifest file, resolving a relative `doc_root`
    /// against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`CrunchError::Read`] if the file cannot be read and
    /// [`CrunchError::Manifest`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, CrunchError> {
        let text = fs::read_to_string(path).map_err(|source| CrunchError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::from_toml_str(&text).map_err(|source| CrunchError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

        let relative_to = path.parent().filter(|_| manifest.doc_root.is_relative());
        if let Some(dir) = relative_to {
            manifest.doc_root = dir.join(&manifest.doc_root);
        }
        Ok(manifest)
    }

    /// The requested level, coerced into range.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::coerce(self.level)
    }

    /// The bundle policy this manifest asks for.
    #[must_use]
    pub fn bundle_config(&self) -> BundleConfig {
        BundleConfig {
            dev_mode: self.dev_mode,
            cache_buster: self.cache_buster,
            ..BundleConfig::default()
        }
    }
}
