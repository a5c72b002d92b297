//! De-duplicated warnings.
//!
//! Avoids spamming the same warning when a bundle is processed repeatedly
//! in one process (e.g. a dev server re-running the same configuration).

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (emitted once per unique message)
///
/// Returns `true` if the warning was emitted, `false` if it had already been
/// seen since the last [`clear_warnings`].
///
/// # Example
/// ```
/// use crunch_common::warning::warn_once;
///
/// let first = warn_once("bundle", "duplicate source '/css/a.css' ignored");
/// let again = warn_once("bundle", "duplicate source '/css/a.css' ignored");
/// assert!(first);
/// assert!(!again);
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let fresh = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if fresh {
        tracing::warn!(component, "{message}");
    }
    fresh
}

/// Forget all recorded warnings (call before processing a new configuration)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
