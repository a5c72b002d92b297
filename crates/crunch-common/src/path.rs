//! Web path utilities.
//!
//! Sources and outputs are addressed by their path from the document root
//! (`/assets/site.css`), which doubles as the `href` written into markup.
//! The helpers here normalise those paths and resolve them on disk.

use std::path::{Path, PathBuf};

/// Normalise a path string.
///
/// - Back slashes become forward slashes.
/// - A trailing slash is always removed.
/// - With `leading_slash`, exactly one leading slash is enforced; otherwise
///   the leading part is left as provided.
///
/// ```
/// use crunch_common::path::normalise;
///
/// assert_eq!(normalise("assets\\css\\", true), "/assets/css");
/// assert_eq!(normalise("/srv/www/", false), "/srv/www");
/// ```
#[must_use]
pub fn normalise(path: &str, leading_slash: bool) -> String {
    let path = path.replace('\\', "/");

    if leading_slash {
        return format!("/{}", path.trim_matches('/'));
    }

    path.trim_end_matches('/').to_string()
}

/// Resolve a normalised web path (`/assets/site.css`) against the document root.
#[must_use]
pub fn resolve(root: &Path, web_path: &str) -> PathBuf {
    root.join(web_path.trim_start_matches('/'))
}

/// The extension of a web path's final component, if any.
///
/// A leading dot (`/.css`) names a hidden file, not an extension.
#[must_use]
pub fn extension(web_path: &str) -> Option<&str> {
    let name = file_name(web_path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(&name[dot + 1..]),
    }
}

/// The final component of a web path with its extension removed.
#[must_use]
pub fn file_stem(web_path: &str) -> &str {
    let name = file_name(web_path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

/// The final component of a web path.
fn file_name(web_path: &str) -> &str {
    web_path.rsplit('/').next().unwrap_or(web_path)
}
