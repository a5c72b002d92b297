//! Line-based reconstruction.
//!
//! After [`crate::stages::segment`] every line holds exactly one of:
//! - a statement ending in `;` (`@import url(a.css);`)
//! - a closing brace of a nested block (`}`)
//! - the opening of a nested block (`@media (min-width: 600px){`)
//! - a flat ruleset (`h1,h2{margin:0;color:red}`)
//!
//! [`LineFormatter`] lays each line out again for the requested level. Nesting
//! is tracked with a depth counter alone; indentation is a function of depth.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::Level;
use crate::stages::replace_literal;

/// A parenthesised feature condition such as `(min-width: 600px)`.
static FEATURE_CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s?(\([^:\s]+)\s*:\s*([^)]+\))\s?").expect("feature pattern is valid")
});

/// `selectors{declarations}` spanning the whole line.
static RULESET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<selectors>[^{]+)\{(?<declarations>[^}]+)\}$")
        .expect("ruleset pattern is valid")
});

static COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?, ?").expect("comma pattern is valid"));

/// Rebuilds segmented CSS one line at a time.
#[derive(Debug)]
pub struct LineFormatter {
    /// The level being formatted for
    level: Level,
    /// Current nesting depth; may go negative on unbalanced input
    depth: isize,
    /// Lines that did not have a recognisable shape
    skipped: usize,
    /// Formatted text so far
    output: String,
}

impl LineFormatter {
    /// Create a formatter for `level`.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self {
            level,
            depth: 0,
            skipped: 0,
            output: String::new(),
        }
    }

    /// Format every line in order.
    pub fn run<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        for line in lines {
            self.format_line(line);
        }
    }

    /// Current nesting depth. Zero after a well-formed stylesheet.
    #[must_use]
    pub const fn depth(&self) -> isize {
        self.depth
    }

    /// Number of lines dropped because they did not match any known shape.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// The formatted text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    fn format_line(&mut self, line: &str) {
        let line = line.trim();

        // Leaving a nested block
        if line.starts_with('}') {
            self.depth -= 1;
        }

        let indent = tabs(self.depth);

        let formatted = if line.ends_with(';') || line.starts_with('}') {
            Some(line.to_string())
        } else if line.ends_with('{') {
            let header = self.format_block_opening(line);
            self.depth += 1;
            Some(header)
        } else {
            self.format_ruleset(line, &indent)
        };

        let Some(formatted) = formatted else {
            self.skipped += 1;
            tracing::debug!(line, depth = self.depth, "skipping unrecognised line");
            return;
        };

        if self.level.keeps_layout() {
            self.output.push_str(&indent);
        }
        self.output.push_str(&formatted);
        if self.level.keeps_layout() {
            self.output.push('\n');
        }
    }

    /// `@media (min-width: 600px){` style headers.
    fn format_block_opening(&self, line: &str) -> String {
        let space = self.level.variable_space();
        let header = line.trim_end_matches('{');
        let header = FEATURE_CONDITION.replace_all(header, |caps: &Captures<'_>| {
            format!(" {}:{space}{} ", &caps[1], &caps[2])
        });
        format!("{}{space}{{", header.trim())
    }

    /// `selectors{declarations}` on one line.
    fn format_ruleset(&self, line: &str, indent: &str) -> Option<String> {
        let caps = RULESET.captures(line)?;
        let space = self.level.variable_space();
        let comma = format!(",{space}");

        let selectors = replace_literal(&COMMA, &caps["selectors"], &comma);

        let declaration_break = if self.level.breaks_declarations() {
            format!("\n{}", tabs(self.depth + 1))
        } else {
            String::new()
        };
        let declarations = replace_literal(&COMMA, &caps["declarations"], &comma);
        let declarations = declarations
            .split(';')
            .map(|declaration| spaced_property(declaration, space))
            .collect::<Vec<_>>()
            .join(&format!(";{declaration_break}"));

        let closing_break = if self.level.breaks_declarations() {
            format!("\n{indent}")
        } else {
            String::new()
        };

        Some(format!(
            "{}{space}{{{declaration_break}{}{closing_break}}}",
            selectors.trim(),
            declarations.trim()
        ))
    }
}

/// Normalise the space after a declaration's property name.
///
/// Only the first colon separates property from value; later colons belong
/// to the value (`url(http://...)`) and are left alone.
fn spaced_property(declaration: &str, space: &str) -> String {
    match declaration.split_once(':') {
        Some((property, value)) => {
            let property = property.strip_suffix(' ').unwrap_or(property);
            let value = value.strip_prefix(' ').unwrap_or(value);
            format!("{property}:{space}{value}")
        }
        None => declaration.to_string(),
    }
}

/// One tab per nesting level; negative depth indents nothing.
fn tabs(depth: isize) -> String {
    "\t".repeat(usize::try_from(depth).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_property_only_touches_first_colon() {
        assert_eq!(
            spaced_property("background :url(http://a.test/x.png)", " "),
            "background: url(http://a.test/x.png)"
        );
        assert_eq!(spaced_property("color : red", ""), "color:red");
        assert_eq!(spaced_property("", " "), "");
    }

    #[test]
    fn test_tabs_never_negative() {
        assert_eq!(tabs(-2), "");
        assert_eq!(tabs(2), "\t\t");
    }
}
