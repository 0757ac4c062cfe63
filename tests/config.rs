//! Configuration system tests
//!
//! Tests for config paths and layout config loading/saving.

use tilework::config::{LayoutConfig, MergeCleanupPolicy, Size};
use tilework::config_paths;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("tilework"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_preset_file_ends_with_layout_yaml() {
    let path = config_paths::preset_file().unwrap();
    assert!(path.to_string_lossy().ends_with("layout.yaml"));
}

#[test]
fn test_logs_dir_is_under_config_dir() {
    let dir = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&dir));
    assert!(logs.ends_with("logs"));
}

// ========================================================================
// Layout Config Tests
// ========================================================================

#[test]
fn test_defaults() {
    let config = LayoutConfig::default();
    assert_eq!(config.min_cell_size, 50.0);
    assert_eq!(config.divider_width, 6.0);
    assert_eq!(config.floating_size, Size::new(480.0, 320.0));
    assert_eq!(config.floating_min_size, Size::new(260.0, 180.0));
    assert_eq!(config.default_panel_class, "InfoPanel");
    assert_eq!(config.merge_cleanup, MergeCleanupPolicy::Drop);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = LayoutConfig {
        min_cell_size: 80.0,
        merge_cleanup: MergeCleanupPolicy::Invoke,
        default_panel_class: "Notes".to_string(),
        ..LayoutConfig::default()
    };
    config.save_to(&path).unwrap();
    assert!(path.exists());

    assert_eq!(LayoutConfig::load_from(&path), config);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "min_cell_size: 120\nmerge_cleanup: invoke\n").unwrap();

    let config = LayoutConfig::load_from(&path);
    assert_eq!(config.min_cell_size, 120.0);
    assert_eq!(config.merge_cleanup, MergeCleanupPolicy::Invoke);
    assert_eq!(config.divider_width, 6.0);
    assert_eq!(config.floating_offset, 12.0);
}

#[test]
fn test_invalid_yaml_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "min_cell_size: [not, a, number").unwrap();

    assert_eq!(LayoutConfig::load_from(&path), LayoutConfig::default());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = LayoutConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config, LayoutConfig::default());
}
