//! Whitespace-level CSS minifier.
//!
//! # Scope
//!
//! This crate implements:
//! - **Levels** - four whitespace policies, from "combine only" to a single line
//! - **Stages** - the ordered text passes (comments, empty rulesets, whitespace,
//!   semicolons, re-segmentation)
//! - **Line formatting** - depth-tracked re-layout of the segmented text
//! - **Level token** - a trailing `/*lmdcrunchcss=N*/` marker so a stored output
//!   records which level produced it
//!
//! The source must be well-formed standard CSS. There is no syntax tree and no
//! validation; malformed fragments degrade silently.
//!
//! # Not Implemented
//!
//! - Value rewriting (colour shortening, zero units)
//! - Source maps
//! - Preprocessor syntax (SCSS, LESS)

/// Line-based reconstruction of segmented CSS.
pub mod format;
/// Minification levels.
pub mod level;
/// Whole-text transform stages.
pub mod stages;
/// The trailing level token.
pub mod token;

pub use format::LineFormatter;
pub use level::Level;
pub use token::{parse_trailing, token};

/// Minify `source` at `level`.
///
/// Empty (or whitespace-only) input yields an empty string. Every other input
/// yields text ending in exactly one [`token`] for `level`. At [`Level::None`]
/// the source is only trimmed.
///
/// ```
/// use crunch_css::{Level, minify};
///
/// let css = ".a { color: red; }\n.b { color: blue; }";
/// assert_eq!(
///     minify(css, Level::High),
///     ".a{color:red}.b{color:blue}/*lmdcrunchcss=3*/"
/// );
/// ```
#[must_use]
pub fn minify(source: &str, level: Level) -> String {
    let source = source.trim();
    if source.is_empty() {
        return String::new();
    }

    if level == Level::None {
        // A token left by an earlier run would no longer be the last one
        let body = token::strip_trailing(source);
        if body.is_empty() {
            return token(Level::None);
        }
        return format!("{body}\n{}", token(Level::None));
    }

    let css = stages::CLEANUP_STAGES
        .iter()
        .fold(source.to_string(), |css, stage| stage(&css));
    let css = stages::normalize_semicolons(&css, level);
    let css = stages::segment(&css);

    let mut formatter = LineFormatter::new(level);
    formatter.run(css.trim().split('\n'));
    if formatter.depth() != 0 {
        tracing::debug!(depth = formatter.depth(), "unbalanced braces in source");
    }

    let mut output = formatter.into_output();
    output.push_str(&token(level));
    let output = output.trim().to_string();

    tracing::trace!(%level, input = source.len(), output = output.len(), "minified");
    output
}
