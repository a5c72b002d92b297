//! Stylesheet `<link>` markup.

use std::time::{SystemTime, UNIX_EPOCH};

/// One `<link rel="stylesheet">` line per path.
///
/// With a `cache_buster`, `?t=<value>` is appended to every `href`.
///
/// ```
/// use crunch_bundle::markup::links;
///
/// assert_eq!(
///     links(&["/css/site.css"], Some(1700000000)),
///     "<link href=\"/css/site.css?t=1700000000\" rel=\"stylesheet\">\n"
/// );
/// ```
#[must_use]
pub fn links<S: AsRef<str>>(paths: &[S], cache_buster: Option<u64>) -> String {
    let query = cache_buster.map_or_else(String::new, |stamp| format!("?t={stamp}"));
    paths
        .iter()
        .map(|path| format!("<link href=\"{}{query}\" rel=\"stylesheet\">\n", path.as_ref()))
        .collect()
}

/// Seconds since the Unix epoch, for use as a cache buster.
#[must_use]
pub fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
