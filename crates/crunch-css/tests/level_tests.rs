//! Integration tests for minification levels.

use crunch_css::Level;
use strum::IntoEnumIterator;

#[test]
fn test_levels_are_ordered() {
    let levels: Vec<Level> = Level::iter().collect();
    assert_eq!(levels, [Level::None, Level::Low, Level::Medium, Level::High]);
    assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_coerce_out_of_range_to_none() {
    assert_eq!(Level::coerce(-1), Level::None);
    assert_eq!(Level::coerce(4), Level::None);
    assert_eq!(Level::coerce(i64::MAX), Level::None);
    assert_eq!(Level::coerce(2), Level::Medium);
    assert_eq!(Level::from(3), Level::High);
}

#[test]
fn test_from_index_is_strict() {
    assert_eq!(Level::from_index(1), Some(Level::Low));
    assert_eq!(Level::from_index(9), None);
}

#[test]
fn test_index_matches_discriminant() {
    for level in Level::iter() {
        assert_eq!(Level::from_index(level.index()), Some(level));
    }
}

#[test]
fn test_variable_space() {
    assert_eq!(Level::None.variable_space(), " ");
    assert_eq!(Level::Low.variable_space(), " ");
    assert_eq!(Level::Medium.variable_space(), "");
    assert_eq!(Level::High.variable_space(), "");
}

#[test]
fn test_names() {
    assert_eq!(Level::Medium.to_string(), "medium");
    assert_eq!("HIGH".parse::<Level>(), Ok(Level::High));
    assert!("extreme".parse::<Level>().is_err());
    assert_eq!(Level::default(), Level::None);
}
