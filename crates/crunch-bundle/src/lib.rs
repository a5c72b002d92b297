//! Combine CSS source files into one minified output file.
//!
//! # Scope
//!
//! This crate provides the collaborators around the minifier in `crunch_css`:
//! - **Configuration** - [`BundleConfig`] policy and the `crunch.toml` [`Manifest`]
//! - **Source Loading** - path normalisation, validation and concatenation
//! - **Staleness** - rebuild only when sources changed or the level differs
//! - **Persistence** - reading and writing the output file
//! - **Markup** - `<link>` tags for the output (or the sources in dev mode)
//!
//! # Example
//!
//! ```no_run
//! use crunch_bundle::{BundleConfig, Crunch};
//! use crunch_css::Level;
//!
//! # fn main() -> Result<(), crunch_bundle::CrunchError> {
//! let mut crunch = Crunch::new(
//!     &["/css/reset.css", "/css/site.css"],
//!     "/css/site.min.css",
//!     "/srv/www",
//!     BundleConfig::default(),
//! )?;
//! let markup = crunch.process(Level::High, false)?.to_file()?;
//! # let _ = markup;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod markup;
pub mod persist;
pub mod staleness;

pub use config::{BundleConfig, Manifest};
pub use error::CrunchError;

use std::path::{Path, PathBuf};

use crunch_css::{Level, minify, parse_trailing};
use loader::{OutputTarget, SourceFile};
use staleness::Decision;

/// One bundle: a validated list of sources and the output they combine into.
#[derive(Debug)]
pub struct Crunch {
    /// Policy the bundle was validated with
    config: BundleConfig,
    /// Document root on disk
    root: PathBuf,
    /// Validated sources, in cascade order
    sources: Vec<SourceFile>,
    /// Validated output location
    output: OutputTarget,
    /// Concatenated sources, read at most once
    raw_css: Option<String>,
    /// Current output text
    css: String,
    /// `css` was produced by this process and not yet saved
    updated: bool,
    /// Level of `css`, if known
    last_level: Option<Level>,
}

impl Crunch {
    /// Validate a bundle.
    ///
    /// `sources` and `output` are paths from the document root (as they
    /// would appear in a URL); `doc_root` is the document root on disk. The
    /// order of `sources` is the order they are concatenated in, so keep the
    /// cascade in mind.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: document root, then sources
    /// (all rejected sources reported together), then output.
    pub fn new<S: AsRef<str>>(
        sources: &[S],
        output: &str,
        doc_root: impl AsRef<Path>,
        config: BundleConfig,
    ) -> Result<Self, CrunchError> {
        let root = loader::doc_root(doc_root.as_ref())?;
        let sources = loader::sources(&root, sources, &config)?;
        let output = loader::output(&root, output, &sources, &config)?;

        tracing::debug!(
            root = %root.display(),
            sources = sources.len(),
            output = %output.web_path,
            "bundle validated"
        );

        Ok(Self {
            config,
            root,
            sources,
            output,
            raw_css: None,
            css: String::new(),
            updated: false,
            last_level: None,
        })
    }

    /// Validate the bundle a manifest describes.
    ///
    /// # Errors
    ///
    /// See [`Crunch::new`].
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, CrunchError> {
        Self::new(
            &manifest.sources,
            &manifest.output,
            &manifest.doc_root,
            manifest.bundle_config(),
        )
    }

    /// Produce the output at `level`, unless the existing output already
    /// matches it.
    ///
    /// An existing output file is only trusted if it is newer than every
    /// source; its level is read back from its trailing token. With `force`
    /// the sources are always minified again.
    ///
    /// # Errors
    ///
    /// Returns [`CrunchError::Read`] if the output or a source cannot be read.
    pub fn process(&mut self, level: Level, force: bool) -> Result<&mut Self, CrunchError> {
        if staleness::output_is_fresh(self.output.modified, loader::newest(&self.sources)) {
            self.css = persist::read_output(&self.output.path)?;
            self.last_level = parse_trailing(&self.css);
        }

        match staleness::decide(level, force, &self.css, self.last_level) {
            Decision::Reuse => {
                tracing::debug!(%level, output = %self.output.web_path, "output up to date");
            }
            Decision::Rebuild(reason) => {
                tracing::debug!(%level, %reason, "minifying sources");
                if self.raw_css.is_none() {
                    self.raw_css = Some(loader::combine(&self.sources)?);
                }
                self.css = minify(self.raw_css.as_deref().unwrap_or_default(), level);
                self.updated = true;
            }
        }

        self.last_level = Some(level);
        Ok(self)
    }

    /// The processed CSS, without saving it.
    #[must_use]
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Save freshly produced output and return the stylesheet markup.
    ///
    /// The file is only written when [`Crunch::process`] produced new output.
    /// In dev mode the markup links the individual sources; otherwise it
    /// links the output file. Returns an empty string if there is no output.
    ///
    /// # Errors
    ///
    /// Returns [`CrunchError::Write`] if the output cannot be saved.
    pub fn to_file(&mut self) -> Result<String, CrunchError> {
        if self.css.is_empty() {
            return Ok(String::new());
        }

        if self.updated {
            self.output.modified = Some(persist::write_output(&self.output.path, &self.css)?);
            self.updated = false;
        }

        let stamp = self.config.cache_buster.then(markup::timestamp);
        if self.config.dev_mode {
            let paths: Vec<&str> = self.sources.iter().map(|s| s.web_path.as_str()).collect();
            return Ok(markup::links(&paths, stamp));
        }
        Ok(markup::links(&[self.output.web_path.as_str()], stamp))
    }

    /// Level of the current output, once known.
    #[must_use]
    pub const fn last_level(&self) -> Option<Level> {
        self.last_level
    }

    /// Whether the current output still has to be saved.
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        self.updated
    }

    /// The validated sources, in order.
    #[must_use]
    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    /// The validated output location.
    #[must_use]
    pub const fn output(&self) -> &OutputTarget {
        &self.output
    }

    /// The document root on disk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
