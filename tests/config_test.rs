//! Tests for loading game configuration files.

use std::fs;
use std::time::Duration;
use strictly_pairs::{GameConfig, Symbol};
use tempfile::TempDir;

/// Writes `content` to a config file inside a fresh temporary directory.
fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("strictly_pairs.toml");
    fs::write(&path, content).expect("write config");
    (dir, path)
}

#[test]
fn test_load_full_config() {
    let (_dir, path) = write_config(
        r#"
mismatch_delay_ms = 600
clock_tick_ms = 20
star_thresholds = [10, 20, 30]
max_stars = 4
seed = 17
"#,
    );

    let config = GameConfig::from_file(&path).unwrap();
    assert_eq!(*config.max_stars(), 4);
    assert_eq!(*config.seed(), Some(17));

    let rules = config.rules();
    assert_eq!(*rules.mismatch_delay(), Duration::from_millis(600));
    assert_eq!(*rules.clock_tick(), Duration::from_millis(20));
    assert_eq!(*rules.stars().thresholds(), vec![10, 20, 30]);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = GameConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_invalid_file_reports_error() {
    let (_dir, path) = write_config("mismatch_delay_ms = \"soon\"");
    let err = GameConfig::load_or_default(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_zero_delay_rejected() {
    let (_dir, path) = write_config("mismatch_delay_ms = 0");
    assert!(GameConfig::from_file(&path).is_err());
}

#[test]
fn test_seeded_config_deals_reproducibly() {
    let (_dir, path) = write_config("seed = 8");
    let config = GameConfig::from_file(&path).unwrap();

    let first = config.deck_source().deal();
    let second = config.deck_source().deal();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2 * Symbol::alphabet().len());
}
