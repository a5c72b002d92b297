//! The trailing level token.
//!
//! Every non-empty output ends with `/*lmdcrunchcss=<digit>*/`. A later
//! reader recovers the level that produced the output from this token alone,
//! without looking at the rest of the text.

use std::sync::LazyLock;

use regex::Regex;

use crate::Level;

/// Text preceding the level digit.
pub const TOKEN_PREFIX: &str = "/*lmdcrunchcss=";

/// Text following the level digit.
pub const TOKEN_SUFFIX: &str = "*/";

/// Matches a token anchored at the end of the text, tolerating trailing whitespace.
static TRAILING_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"{}(?<level>[0-9]){}\s*\z",
        regex::escape(TOKEN_PREFIX),
        regex::escape(TOKEN_SUFFIX)
    );
    Regex::new(&pattern).expect("token pattern is valid")
});

/// The token recording `level`.
///
/// ```
/// use crunch_css::{Level, token::token};
///
/// assert_eq!(token(Level::Medium), "/*lmdcrunchcss=2*/");
/// ```
#[must_use]
pub fn token(level: Level) -> String {
    format!("{TOKEN_PREFIX}{}{TOKEN_SUFFIX}", level.index())
}

/// Recover the level from a token at the very end of `text`.
///
/// Returns `None` when there is no trailing token or its digit is not a
/// valid level; callers treat that as "level unknown" and recompute.
#[must_use]
pub fn parse_trailing(text: &str) -> Option<Level> {
    let captures = TRAILING_TOKEN.captures(text)?;
    let digit = captures.name("level")?.as_str();
    digit.parse::<u8>().ok().and_then(Level::from_index)
}

/// `text` with every trailing token (and the whitespace around them) removed.
#[must_use]
pub fn strip_trailing(text: &str) -> &str {
    let mut rest = text.trim_end();
    while let Some(found) = TRAILING_TOKEN.find(rest) {
        rest = rest[..found.start()].trim_end();
    }
    rest
}
