//! Text-transform stages.
//!
//! Each stage is a pure function over the whole stylesheet text. [`crate::minify`]
//! runs them in the order they appear here; every stage assumes the ones before it
//! have already run (e.g. [`strip_punctuation_whitespace`] only expects single
//! spaces because [`collapse_horizontal_whitespace`] ran first).

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::Level;

/// A whole-text stage that does not depend on the level.
pub type Stage = fn(&str) -> String;

/// The level-independent cleanup stages, in pipeline order.
pub const CLEANUP_STAGES: [Stage; 5] = [
    strip_comments,
    strip_empty_rulesets,
    strip_vertical_whitespace,
    collapse_horizontal_whitespace,
    strip_punctuation_whitespace,
];

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment pattern is valid"));

static EMPTY_RULESET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[;}]+)[^{};]+\{\s*\}").expect("empty ruleset pattern is valid")
});

static VERTICAL_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\n\x0B\x0C\r\x{85}\x{2028}\x{2029}]+")
        .expect("vertical whitespace pattern is valid")
});

static HORIZONTAL_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t \x{A0}\x{1680}\x{180E}\x{2000}-\x{200A}\x{202F}\x{205F}\x{3000}]+")
        .expect("horizontal whitespace pattern is valid")
});

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?([{};]) ?").expect("punctuation pattern is valid"));

static STATEMENT_AT_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(?:charset|import|namespace)[^;]+;").expect("at-rule pattern is valid")
});

/// Remove every `/* ... */` comment, including multi-line ones.
#[must_use]
pub fn strip_comments(css: &str) -> String {
    COMMENT.replace_all(css, "").into_owned()
}

/// Remove rulesets whose body is only whitespace.
///
/// A ruleset is only recognised at the start of the text, right after a
/// closing brace or right after a statement's `;` (which is kept). Selectors
/// never span a `;`, so a preceding `@import` survives. Matches cannot
/// overlap, so the pass is repeated until nothing changes; that also catches
/// runs of empty rulesets.
#[must_use]
pub fn strip_empty_rulesets(css: &str) -> String {
    let mut current = css.to_string();
    while EMPTY_RULESET.is_match(&current) {
        current = EMPTY_RULESET.replace_all(&current, "${1}").into_owned();
    }
    current
}

/// Remove all line breaks, joining the text onto one line.
#[must_use]
pub fn strip_vertical_whitespace(css: &str) -> String {
    VERTICAL_WHITESPACE.replace_all(css, "").into_owned()
}

/// Collapse runs of spaces and tabs to a single space.
#[must_use]
pub fn collapse_horizontal_whitespace(css: &str) -> String {
    HORIZONTAL_WHITESPACE.replace_all(css, " ").into_owned()
}

/// Remove the space on either side of `{`, `}` and `;`.
#[must_use]
pub fn strip_punctuation_whitespace(css: &str) -> String {
    PUNCTUATION.replace_all(css, "${1}").into_owned()
}

/// Drop or restore the semicolon before each closing brace.
///
/// Above [`Level::Low`] the last declaration's semicolon is redundant and
/// removed. Up to [`Level::Low`] declarations stay readable, so a missing one
/// is inserted instead (see [`terminate_declarations`]).
#[must_use]
pub fn normalize_semicolons(css: &str, level: Level) -> String {
    if level > Level::Low {
        css.replace(";}", "}")
    } else {
        terminate_declarations(css)
    }
}

/// Insert `;` before every `}` that is not already preceded by `;` or `}`.
///
/// ```
/// use crunch_css::stages::terminate_declarations;
///
/// assert_eq!(terminate_declarations("a{color:red}"), "a{color:red;}");
/// assert_eq!(terminate_declarations("@media x{a{b:c;}}"), "@media x{a{b:c;}}");
/// ```
#[must_use]
pub fn terminate_declarations(css: &str) -> String {
    let mut out = String::with_capacity(css.len() + css.len() / 16);
    let mut previous = None;
    for c in css.chars() {
        if c == '}' && !matches!(previous, Some(';' | '}')) {
            out.push(';');
        }
        out.push(c);
        previous = Some(c);
    }
    out
}

/// Put a line break after `@charset`, `@import` and `@namespace` statements.
#[must_use]
pub fn break_after_statement_at_rules(css: &str) -> String {
    STATEMENT_AT_RULE.replace_all(css, "${0}\n").into_owned()
}

/// Put a line break after every closing brace.
#[must_use]
pub fn break_after_closing_braces(css: &str) -> String {
    css.replace('}', "}\n")
}

/// Put a line break in front of every ruleset nested inside another block.
///
/// Within a line, whatever follows an opening brace and itself runs up to
/// another opening brace is moved onto its own line, so `@media x{a{b:c}`
/// becomes `@media x{` and `a{b:c}`.
#[must_use]
pub fn break_before_nested_rulesets(css: &str) -> String {
    let mut out = String::with_capacity(css.len() + 16);
    for (index, line) in css.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        push_with_nested_breaks(&mut out, line);
    }
    out
}

/// Copy one line into `out`, breaking before each nested ruleset.
fn push_with_nested_breaks(out: &mut String, line: &str) {
    let mut copied = 0;
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find('{') {
        let start = cursor + offset + 1;
        // At least one character has to sit between the two braces.
        let Some(first) = line[start..].chars().next() else {
            break;
        };
        let after_first = start + first.len_utf8();
        let Some(next) = line[after_first..].find('{') else {
            break;
        };

        out.push_str(&line[copied..start]);
        out.push('\n');
        copied = start;
        cursor = after_first + next;
    }

    out.push_str(&line[copied..]);
}

/// Re-segment single-line CSS so each statement, block opening or ruleset
/// sits on its own line.
#[must_use]
pub fn segment(css: &str) -> String {
    let css = break_after_statement_at_rules(css);
    let css = break_after_closing_braces(&css);
    break_before_nested_rulesets(&css)
}

/// Replace `pattern` matches in `text` with a literal string.
pub(crate) fn replace_literal(pattern: &Regex, text: &str, with: &str) -> String {
    pattern.replace_all(text, NoExpand(with)).into_owned()
}
