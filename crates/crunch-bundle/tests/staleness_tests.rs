//! Integration tests for rebuild decisions.

use std::time::{Duration, SystemTime};

use crunch_bundle::staleness::{Decision, RebuildReason, decide, output_is_fresh};
use crunch_css::Level;

#[test]
fn test_output_freshness() {
    let source = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
    let later = source + Duration::from_secs(1);

    assert!(output_is_fresh(Some(later), Some(source)));
    assert!(!output_is_fresh(Some(source), Some(source)));
    assert!(!output_is_fresh(Some(source), Some(later)));
    assert!(!output_is_fresh(None, Some(source)));
    assert!(output_is_fresh(Some(source), None));
}

#[test]
fn test_force_always_rebuilds() {
    assert_eq!(
        decide(Level::High, true, "a{}/*lmdcrunchcss=3*/", Some(Level::High)),
        Decision::Rebuild(RebuildReason::Forced)
    );
}

#[test]
fn test_missing_output_rebuilds() {
    assert_eq!(
        decide(Level::Low, false, "", Some(Level::Low)),
        Decision::Rebuild(RebuildReason::NoOutput)
    );
}

#[test]
fn test_unknown_level_rebuilds() {
    assert_eq!(
        decide(Level::Low, false, "a{b:c}", None),
        Decision::Rebuild(RebuildReason::UnknownLevel)
    );
}

#[test]
fn test_level_change_rebuilds() {
    let decision = decide(Level::Low, false, "a{b:c}/*lmdcrunchcss=3*/", Some(Level::High));
    assert_eq!(
        decision,
        Decision::Rebuild(RebuildReason::LevelChanged {
            from: Level::High,
            to: Level::Low,
        })
    );
    let Decision::Rebuild(reason) = decision else {
        unreachable!("checked above");
    };
    assert_eq!(reason.to_string(), "level changed from high to low");
}

#[test]
fn test_same_level_reused() {
    assert_eq!(
        decide(Level::None, false, "a{b:c}\n/*lmdcrunchcss=0*/", Some(Level::None)),
        Decision::Reuse
    );
}
