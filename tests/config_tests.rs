//! Integration tests for configuration management

use sdg_dashboard::config::{Config, ConfigOverrides};
use sdg_dashboard::core::resolver::SourceResolver;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.data.roots.is_empty(),
        "Default data roots should not be empty"
    );
    assert_eq!(config.data.thesis_suffix.as_deref(), Some("-1"));
    assert_eq!(config.data.default_type, "course");
    assert!(
        !config.paths.export_dir.is_empty(),
        "Default export_dir should not be empty"
    );
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[data]
roots = ["/srv/sdg/data", "data"]
thesis_suffix = "-2"
default_type = "thesis"
default_year = "113"

[paths]
export_dir = "./exports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.data.roots, vec!["/srv/sdg/data", "data"]);
    assert_eq!(config.data.thesis_suffix.as_deref(), Some("-2"));
    assert_eq!(config.data.default_type, "thesis");
    assert_eq!(config.data.default_year, "113");
    assert_eq!(config.paths.export_dir, "./exports");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert!(config.data.roots.is_empty());
    assert_eq!(config.paths.export_dir, "");
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$SDG_DASH/test.log"

[data]
roots = ["$SDG_DASH/data"]

[paths]
export_dir = "$SDG_DASH/exports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("sdgdash"));
    assert!(!config.logging.file.contains("$SDG_DASH"));
    assert!(!config.data.roots[0].contains("$SDG_DASH"));
    assert!(config.paths.export_dir.ends_with("exports"));
    assert!(!config.paths.export_dir.contains("$SDG_DASH"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").as_deref(), Some("debug"));

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("roots", " /srv/a , data ,")
        .expect("Failed to set roots");
    assert_eq!(config.data.roots, vec!["/srv/a", "data"]);
    assert_eq!(config.get("roots").as_deref(), Some("/srv/a,data"));

    config
        .set("default-type", "產學")
        .expect("Failed to set default type");
    assert_eq!(config.get("default_type").as_deref(), Some("產學"));

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("roots", " , ").is_err());
    assert!(config.set("default_type", "poster").is_err());
    assert_eq!(config.data.default_type, "course");
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("thesis_suffix", "-2").expect("Failed to set suffix");
    config.set("roots", "/elsewhere").expect("Failed to set roots");

    config
        .unset("thesis_suffix", &defaults)
        .expect("Failed to unset suffix");
    config
        .unset("roots", &defaults)
        .expect("Failed to unset roots");

    assert_eq!(config.data.thesis_suffix, defaults.data.thesis_suffix);
    assert_eq!(config.data.roots, defaults.data.roots);
    assert!(config.unset("unknown_key", &defaults).is_err());
}

#[test]
fn test_config_save_and_load_roundtrip_through_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("roots", "/a,/b").expect("Failed to set roots");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.data.roots, vec!["/a", "/b"]);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        roots: Some(vec!["/mnt/data".to_string()]),
        thesis_suffix: Some("-2".to_string()),
        export_dir: Some("./custom_exports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.data.roots, vec!["/mnt/data"]);
    assert_eq!(config.data.thesis_suffix.as_deref(), Some("-2"));
    assert_eq!(config.paths.export_dir, "./custom_exports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.data.roots, defaults.data.roots);
    assert_eq!(config.paths.export_dir, defaults.paths.export_dir);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[data]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("roots = [\"data\"]"));
    assert!(display_str.contains("thesis_suffix"));
    assert!(display_str.contains("export_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[data]
roots = []
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(
        config.merge_defaults(&defaults),
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.data.roots, defaults.data.roots);
    assert_eq!(config.data.default_year, defaults.data.default_year);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[data]
roots = ["/custom/root"]
thesis_suffix = "-2"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.data.roots, vec!["/custom/root"]);
    assert_eq!(config.data.thesis_suffix.as_deref(), Some("-2"));
}

#[test]
fn test_empty_thesis_suffix_survives_merge() {
    let toml_str = r#"
[data]
roots = ["data"]
thesis_suffix = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());
    assert_eq!(config.data.thesis_suffix.as_deref(), Some(""));
    assert_eq!(config.get("thesis_suffix").as_deref(), Some(""));

    let resolver = SourceResolver::from_config(&config.data);
    assert_eq!(resolver.thesis_suffix(), "");
}

#[test]
fn test_missing_thesis_suffix_takes_default() {
    let toml_str = r#"
[data]
roots = ["data"]
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    assert!(config.data.thesis_suffix.is_none());
    assert!(config.merge_defaults(&Config::from_defaults()));
    assert_eq!(config.data.thesis_suffix.as_deref(), Some("-1"));
}

#[test]
fn test_resolver_built_from_config() {
    let mut config = Config::from_defaults();
    config.set("roots", "/first,/second").expect("Failed to set roots");
    config.set("thesis_suffix", "-2").expect("Failed to set suffix");

    let resolver = SourceResolver::from_config(&config.data);
    assert_eq!(
        resolver.roots(),
        &[PathBuf::from("/first"), PathBuf::from("/second")]
    );
    assert_eq!(resolver.thesis_suffix(), "-2");
}

#[test]
fn test_get_sdgdash_dir() {
    let dir = Config::get_sdgdash_dir();

    assert!(dir.to_string_lossy().contains("sdgdash"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
