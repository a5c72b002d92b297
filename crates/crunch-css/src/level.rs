//! Minification levels.

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// How aggressively whitespace is removed.
///
/// Levels are totally ordered; every comparison in the formatter is phrased
/// as "below `Medium`" or "above `Low`" rather than by matching variants.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Level {
    /// Combine only: the text is trimmed but otherwise untouched.
    #[default]
    None = 0,
    /// Excess whitespace removed; one declaration per line, one space around separators.
    Low = 1,
    /// Most whitespace removed; one ruleset per line.
    Medium = 2,
    /// Only whitespace that is part of a value survives; a single line.
    High = 3,
}

impl Level {
    /// Convert a raw level, coercing anything outside `0..=3` to [`Level::None`].
    #[must_use]
    pub fn coerce(raw: i64) -> Self {
        u8::try_from(raw)
            .ok()
            .and_then(Self::from_index)
            .unwrap_or_default()
    }

    /// Convert an index strictly, returning `None` for anything outside `0..=3`.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::iter().find(|level| level.index() == index)
    }

    /// The level's ordinal (`0..=3`), as written into the trailing token.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The optional separator space: `" "` up to [`Level::Low`], nothing above it.
    #[must_use]
    pub fn variable_space(self) -> &'static str {
        if self > Self::Low { "" } else { " " }
    }

    /// Whether declarations are broken onto their own lines.
    #[must_use]
    pub fn breaks_declarations(self) -> bool {
        self < Self::Medium
    }

    /// Whether indentation and line breaks are emitted at all.
    #[must_use]
    pub fn keeps_layout(self) -> bool {
        self < Self::High
    }
}

impl From<i64> for Level {
    fn from(raw: i64) -> Self {
        Self::coerce(raw)
    }
}
