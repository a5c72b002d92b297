//! Errors raised while setting up or running a bundle.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a source file was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Has the right extension but could not be read.
    NotFound,
    /// Exists but is not an acceptable stylesheet (or has the wrong extension).
    Invalid,
}

/// A source file that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSource {
    /// The normalised web path as given.
    pub path: String,
    /// Why it was rejected.
    pub reason: Rejection,
}

impl fmt::Display for RejectedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.reason {
            Rejection::NotFound => "Not Found",
            Rejection::Invalid => "Invalid",
        };
        write!(f, "{label}: {}", self.path)
    }
}

/// Errors from the bundler.
#[derive(Debug, Error)]
pub enum CrunchError {
    /// The document root was empty after normalisation.
    #[error("the document root must not be empty")]
    EmptyDocRoot,

    /// The document root is not an existing directory.
    #[error("the document root must be an existing directory: {0}")]
    MissingDocRoot(PathBuf),

    /// No source files were given.
    #[error("the source file list must not be empty")]
    NoSources,

    /// One or more source files failed validation.
    #[error(
        "one or more source files could not be found/opened or are otherwise invalid:{}",
        list(.0)
    )]
    InvalidSources(Vec<RejectedSource>),

    /// The output path is also one of the sources.
    #[error("the output file path must not match a source file path: {0}")]
    OutputIsSource(String),

    /// The output file's directory does not exist.
    #[error("the output file's directory does not exist, create it first: {0}")]
    MissingOutputDir(PathBuf),

    /// The output path has no file name.
    #[error("the output file name was not provided")]
    MissingOutputName,

    /// The output path has the wrong extension.
    #[error("the output file must have a \"{expected}\" extension: {path}")]
    OutputExtension {
        /// The offending output path.
        path: String,
        /// The configured extension.
        expected: String,
    },

    /// Reading a source or output file failed.
    #[error("could not read {path}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the output file failed.
    #[error("could not save the output CSS file {path}")]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A manifest file could not be parsed.
    #[error("invalid manifest {path}")]
    Manifest {
        /// The manifest file.
        path: PathBuf,
        /// The parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Render rejected sources one per line, each prefixed with `- `.
fn list(rejected: &[RejectedSource]) -> String {
    rejected.iter().map(|source| format!("\n- {source}")).collect()
}
