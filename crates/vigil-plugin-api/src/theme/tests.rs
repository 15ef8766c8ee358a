//! Unit tests for theme palette types.

use super::*;

#[test]
fn empty_palette_has_no_slots() {
    let palette = ThemePalette::new("plain");
    assert_eq!(palette.name(), "plain");
    assert!(palette.colors().is_empty());
    assert!(palette.color("background").is_none());
}

#[test]
fn with_color_replaces_existing_slot() {
    let palette = ThemePalette::new("solar")
        .with_color("accent", "#268bd2")
        .with_color("accent", "#2aa198");
    assert_eq!(palette.color("accent"), Some("#2aa198"));
    assert_eq!(palette.colors().len(), 1);
}

#[test]
fn palette_serde_round_trip() {
    let palette = ThemePalette::new("solar")
        .with_color("background", "#fdf6e3")
        .with_color("accent", "#268bd2");
    let text = serde_json::to_string(&palette).expect("serialise");
    let back: ThemePalette = serde_json::from_str(&text).expect("deserialise");
    assert_eq!(back, palette);
}
