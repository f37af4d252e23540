//! Configuration module for `sdg-dashboard`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory in path-like values
const DIR_VARIABLE: &str = "$SDG_DASH";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Input data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Candidate data roots in priority order; the first existing directory wins
    #[serde(default)]
    pub roots: Vec<String>,
    /// Suffix appended to the year in thesis summary file names
    ///
    /// `None` (key absent) means the default `-1`; an empty string means the
    /// files carry no sub-period suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thesis_suffix: Option<String>,
    /// Data type used when the CLI does not name one
    #[serde(default)]
    pub default_type: String,
    /// Academic year used when the CLI does not name one
    #[serde(default)]
    pub default_year: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for CSV exports
    #[serde(default)]
    pub export_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Input data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the candidate data roots (replaces the whole list)
    pub roots: Option<Vec<String>>,
    /// Override the thesis file suffix
    pub thesis_suffix: Option<String>,
    /// Override the export directory
    pub export_dir: Option<String>,
}

impl Config {
    /// Get the `$SDG_DASH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/sdgdash`
    /// - macOS: `~/Library/Application Support/sdgdash`
    /// - Windows: `%APPDATA%\sdgdash`
    #[must_use]
    pub fn get_sdgdash_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sdgdash")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are filled,
    /// so upgrading picks up new settings without clobbering user values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.data.roots.is_empty() && !defaults.data.roots.is_empty() {
            self.data.roots.clone_from(&defaults.data.roots);
            changed = true;
        }
        if self.data.thesis_suffix.is_none() && defaults.data.thesis_suffix.is_some() {
            self.data
                .thesis_suffix
                .clone_from(&defaults.data.thesis_suffix);
            changed = true;
        }
        if self.data.default_type.is_empty() && !defaults.data.default_type.is_empty() {
            self.data.default_type.clone_from(&defaults.data.default_type);
            changed = true;
        }
        if self.data.default_year.is_empty() && !defaults.data.default_year.is_empty() {
            self.data.default_year.clone_from(&defaults.data.default_year);
            changed = true;
        }

        if self.paths.export_dir.is_empty() && !defaults.paths.export_dir.is_empty() {
            self.paths.export_dir.clone_from(&defaults.paths.export_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only live for the current run; the config file is untouched.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     thesis_suffix: Some("-2".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(roots) = &overrides.roots {
            self.data.roots.clone_from(roots);
        }
        if let Some(suffix) = &overrides.thesis_suffix {
            self.data.thesis_suffix = Some(suffix.clone());
        }

        if let Some(export_dir) = &overrides.export_dir {
            self.paths.export_dir.clone_from(export_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// the directory returned by [`get_sdgdash_dir`].
    ///
    /// [`get_sdgdash_dir`]: Self::get_sdgdash_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_sdgdash_dir().join(CONFIG_FILE_NAME)
    }

    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_sdgdash_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$SDG_DASH` in path-like values is expanded to the config directory.
    /// Missing fields use their serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.data.roots = config
            .data
            .roots
            .iter()
            .map(|root| Self::expand_variables(root))
            .collect();
        config.paths.export_dir = Self::expand_variables(&config.paths.export_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed. The
    /// defaults are compiled into the binary, so this is a build defect.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with the defaults (and re-saved when that
    /// added fields). On first run the defaults are written out. Any read or
    /// parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created, or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `roots` (comma separated),
    /// `thesis_suffix`, `default_type`, `default_year`, `export_dir`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "roots" => Some(self.data.roots.join(",")),
            "thesis_suffix" | "thesis-suffix" => {
                Some(self.data.thesis_suffix.clone().unwrap_or_default())
            }
            "default_type" | "default-type" => Some(self.data.default_type.clone()),
            "default_year" | "default-year" => Some(self.data.default_year.clone()),
            "export_dir" | "export-dir" => Some(self.paths.export_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `roots` takes a comma-separated list in priority order. Call
    /// [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "roots" => {
                let roots: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|root| !root.is_empty())
                    .map(str::to_string)
                    .collect();
                if roots.is_empty() {
                    return Err("'roots' needs at least one directory".to_string());
                }
                self.data.roots = roots;
            }
            "thesis_suffix" | "thesis-suffix" => self.data.thesis_suffix = Some(value.to_string()),
            "default_type" | "default-type" => {
                value.parse::<super::models::DataType>()?;
                self.data.default_type = value.to_string();
            }
            "default_year" | "default-year" => self.data.default_year = value.to_string(),
            "export_dir" | "export-dir" => self.paths.export_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "roots" => self.data.roots.clone_from(&defaults.data.roots),
            "thesis_suffix" | "thesis-suffix" => self
                .data
                .thesis_suffix
                .clone_from(&defaults.data.thesis_suffix),
            "default_type" | "default-type" => self
                .data
                .default_type
                .clone_from(&defaults.data.default_type),
            "default_year" | "default-year" => self
                .data
                .default_year
                .clone_from(&defaults.data.default_year),
            "export_dir" | "export-dir" => self
                .paths
                .export_dir
                .clone_from(&defaults.paths.export_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[data]")?;
        let roots: Vec<String> = self
            .data
            .roots
            .iter()
            .map(|root| format!("\"{root}\""))
            .collect();
        writeln!(f, "  roots = [{}]", roots.join(", "))?;
        if let Some(suffix) = &self.data.thesis_suffix {
            writeln!(f, "  thesis_suffix = \"{suffix}\"")?;
        }
        writeln!(f, "  default_type = \"{}\"", self.data.default_type)?;
        writeln!(f, "  default_year = \"{}\"", self.data.default_year)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  export_dir = \"{}\"", self.paths.export_dir)?;

        Ok(())
    }
}
