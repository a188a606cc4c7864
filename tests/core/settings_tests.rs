//! Tests for user settings persistence
//!
//! Tests cover:
//! - Default settings values
//! - Serialization/deserialization
//! - Settings roundtrip through a file
//! - Conversion to renderer configuration

#[path = "../common/mod.rs"]
mod common;

use std::path::PathBuf;

use common::write_temp_file;
use estateview::analysis::DEFAULT_THRESHOLD;
use estateview::render::{RenderConfig, DEFAULT_CACHE_CAPACITY};
use estateview::settings::UserSettings;

// ============================================
// Default Settings Tests
// ============================================

#[test]
fn test_settings_defaults() {
    let settings = UserSettings::default();
    assert_eq!(settings.version, 1);
    assert_eq!(settings.extrema_threshold, DEFAULT_THRESHOLD);
    assert_eq!(settings.cache_capacity, DEFAULT_CACHE_CAPACITY);
    assert!(settings.show_extrema);
    assert!(!settings.color_blind_mode);
    assert!(settings.last_dataset.is_none());
}

// ============================================
// Serialization Tests
// ============================================

#[test]
fn test_settings_missing_fields_use_defaults() {
    let settings: UserSettings = serde_json::from_str(r#"{"version": 1}"#).unwrap();
    assert_eq!(settings, UserSettings::default());
}

#[test]
fn test_settings_partial_json() {
    let settings: UserSettings =
        serde_json::from_str(r#"{"extrema_threshold": 0.05, "show_extrema": false}"#).unwrap();
    assert_eq!(settings.extrema_threshold, 0.05);
    assert!(!settings.show_extrema);
    assert_eq!(settings.cache_capacity, DEFAULT_CACHE_CAPACITY);
}

#[test]
fn test_settings_ignores_unknown_fields() {
    let settings: UserSettings =
        serde_json::from_str(r#"{"version": 1, "language": "en"}"#).unwrap();
    assert_eq!(settings.version, 1);
}

// ============================================
// File Roundtrip Tests
// ============================================

#[test]
fn test_settings_file_roundtrip() {
    let path = std::env::temp_dir()
        .join(format!("estateview-settings-{}", std::process::id()))
        .join("nested")
        .join("settings.json");

    let settings = UserSettings {
        extrema_threshold: 0.1,
        cache_capacity: 5,
        color_blind_mode: true,
        last_dataset: Some(PathBuf::from("/data/market.csv")),
        ..UserSettings::default()
    };
    settings.save_to(&path).unwrap();

    assert_eq!(UserSettings::load_from(&path), settings);
}

#[test]
fn test_settings_missing_file_gives_defaults() {
    let path = std::env::temp_dir().join("estateview-does-not-exist/settings.json");
    assert_eq!(UserSettings::load_from(&path), UserSettings::default());
}

#[test]
fn test_settings_corrupt_file_gives_defaults() {
    let path = write_temp_file("corrupt-settings.json", "{ not json");
    assert_eq!(UserSettings::load_from(&path), UserSettings::default());
}

// ============================================
// Render Config Tests
// ============================================

#[test]
fn test_render_config_follows_settings() {
    let settings = UserSettings {
        extrema_threshold: 0.07,
        cache_capacity: 0,
        ..UserSettings::default()
    };
    assert_eq!(
        settings.render_config(),
        RenderConfig {
            threshold: 0.07,
            cache_capacity: 0,
        }
    );
}

#[test]
fn test_invalid_threshold_fails_validation() {
    let settings = UserSettings {
        extrema_threshold: -1.0,
        ..UserSettings::default()
    };
    assert!(settings.render_config().validate().is_err());
}
