//! Configuration tests
//!
//! Guard the config file format: what `to_toml` writes must parse back into
//! the same values, and precedence must hold per key.

use super::*;
use std::collections::HashMap;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap_or_else(|e| panic!("TOML:\n{}\nError: {}", toml_str, e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let reloaded = Config::from_sources(parse(&config.to_toml()), env_of(&[]));

    assert_eq!(reloaded.load, config.load);
    assert_eq!(reloaded.resources, None);
    assert_eq!(reloaded.icons.default_set, "classic");
    assert_eq!(reloaded.ui.toast_secs, config.ui.toast_secs);
    assert_eq!(reloaded.ui.tick_ms, config.ui.tick_ms);
    assert_eq!(reloaded.logging.level, "info");
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.load = "sitemap://house/".to_string();
    config.resources = Some(PathBuf::from("/srv/sitemaps"));
    config.icons.default_set = "material".to_string();
    config.ui.toast_secs = 5;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let reloaded = Config::from_sources(parse(&config.to_toml()), env_of(&[]));
    assert_eq!(reloaded.load, "sitemap://house/");
    assert_eq!(reloaded.resources, Some(PathBuf::from("/srv/sitemaps")));
    assert_eq!(reloaded.icons.default_set, "material");
    assert_eq!(reloaded.ui.toast_secs, 5);
    assert!(reloaded.logging.file_enabled);
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
load = "sitemap://file/"
resources = "/from/file"
"#,
    );
    let config = Config::from_sources(
        file,
        env_of(&[
            ("SITEMAP_LOAD", "sitemap://env/"),
            ("SITEMAP_NO_TUI", "true"),
        ]),
    );

    assert_eq!(config.load, "sitemap://env/");
    assert_eq!(config.resources, Some(PathBuf::from("/from/file")));
    assert!(!config.enable_tui);
}

#[test]
fn test_missing_sections_use_defaults() {
    let config = Config::from_sources(parse("[ui]\ntick_ms = 1\n"), env_of(&[]));
    assert_eq!(config.load, DEFAULT_LOAD);
    assert!(config.enable_tui);
    // Clamped to a sane redraw rate
    assert_eq!(config.ui.tick_ms, 16);
    assert_eq!(config.ui.toast_secs, 3);
}

#[test]
fn test_invalid_iconset_falls_back() {
    let config = Config::from_sources(parse("[icons]\ndefault_set = \"a/b\"\n"), env_of(&[]));
    assert_eq!(config.icons.default_set, "classic");
}

#[test]
fn test_unknown_rotation_is_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
}

#[test]
fn test_malformed_file_is_an_error() {
    assert!(toml::from_str::<FileConfig>("load = sitemap://demo/").is_err());
}
