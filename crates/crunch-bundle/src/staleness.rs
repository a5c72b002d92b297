//! Deciding whether a bundle has to be rebuilt.

use std::fmt;
use std::time::SystemTime;

use crunch_css::Level;

/// Why the minifier has to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    /// The caller asked for a rebuild.
    Forced,
    /// No usable previous output.
    NoOutput,
    /// The previous output carries no recognisable level token.
    UnknownLevel,
    /// The previous output was produced at a different level.
    LevelChanged {
        /// Level recorded in the previous output.
        from: Level,
        /// Level requested now.
        to: Level,
    },
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forced => f.write_str("forced"),
            Self::NoOutput => f.write_str("no previous output"),
            Self::UnknownLevel => f.write_str("previous output has no level token"),
            Self::LevelChanged { from, to } => write!(f, "level changed from {from} to {to}"),
        }
    }
}

/// Outcome of a staleness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The previous output can be served as is.
    Reuse,
    /// The minifier has to run.
    Rebuild(RebuildReason),
}

/// Whether an existing output may be trusted at all: it must exist and be
/// strictly newer than the newest source.
#[must_use]
pub fn output_is_fresh(output: Option<SystemTime>, newest_source: Option<SystemTime>) -> bool {
    match (output, newest_source) {
        (Some(output), Some(source)) => output > source,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Decide whether to rebuild.
///
/// `previous` is the text of the last output (empty if there is none), and
/// `previous_level` the level recovered from its token (or remembered from an
/// earlier run in the same process).
#[must_use]
pub fn decide(
    requested: Level,
    force: bool,
    previous: &str,
    previous_level: Option<Level>,
) -> Decision {
    if force {
        return Decision::Rebuild(RebuildReason::Forced);
    }
    if previous.is_empty() {
        return Decision::Rebuild(RebuildReason::NoOutput);
    }
    match previous_level {
        None => Decision::Rebuild(RebuildReason::UnknownLevel),
        Some(from) if from != requested => Decision::Rebuild(RebuildReason::LevelChanged {
            from,
            to: requested,
        }),
        Some(_) => Decision::Reuse,
    }
}
