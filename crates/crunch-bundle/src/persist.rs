//! Reading and writing the combined output file.
//!
//! There is no locking: two processes building the same output path race,
//! and the last writer wins.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::error::CrunchError;

/// Read a previously written output.
///
/// # Errors
///
/// Returns [`CrunchError::Read`] if the file cannot be read as UTF-8 text.
pub fn read_output(path: &Path) -> Result<String, CrunchError> {
    fs::read_to_string(path).map_err(|source| CrunchError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `css` verbatim and return the file's new modification time.
///
/// # Errors
///
/// Returns [`CrunchError::Write`] if the file cannot be written or its
/// metadata read back.
pub fn write_output(path: &Path, css: &str) -> Result<SystemTime, CrunchError> {
    let write_error = |source| CrunchError::Write {
        path: path.to_path_buf(),
        source,
    };

    fs::write(path, css).map_err(write_error)?;
    let modified = fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(write_error)?;

    tracing::info!(path = %path.display(), bytes = css.len(), "wrote output");
    Ok(modified)
}
