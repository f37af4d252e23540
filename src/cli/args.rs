//! CLI argument definitions for `sdgdash`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sdg_dashboard::config::ConfigOverrides;
use sdg_dashboard::core::metrics::RankMetric;
use sdg_dashboard::core::models::DataType;
use sdg_dashboard::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `roots`, `export_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Data type and year of the snapshot to show
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Data type: course, industry or thesis (also accepts 課程, 產學, 論文)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub data_type: Option<DataType>,

    /// Academic year, e.g. 112
    #[arg(short = 'y', long, value_name = "YEAR")]
    pub year: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show headline figures and the most mentioned SDGs.
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Number of SDGs to list
        #[arg(long, value_name = "N", default_value_t = 5)]
        top: usize,
    },
    /// Analyze one unit: totals, alignment and its leading SDGs.
    Unit {
        /// Unit (department) name as it appears in the data
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Compare selected SDGs across units.
    Compare {
        /// SDG codes to compare (e.g. --sdg SDG4 --sdg SDG8)
        #[arg(long = "sdg", value_name = "SDG", num_args = 1.., required = true)]
        sdgs: Vec<String>,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Show the climate-action (SDG13) view.
    Climate {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Rank units by a metric.
    Rank {
        /// Metric: alignment, sdg-total, diversity or total
        #[arg(long, value_name = "METRIC", default_value = "alignment")]
        by: RankMetric,

        /// Number of units to list
        #[arg(long, value_name = "N", default_value_t = 10)]
        top: usize,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Print the pairwise correlation between SDG columns.
    Correlation {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Export the per-unit tables as CSV.
    ///
    /// Writes `<type>_<year>_counts.csv` and, when available,
    /// `<type>_<year>_percentages.csv`.
    Export {
        /// Output directory (optional; defaults to config `export_dir`)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        #[command(flatten)]
        selection: SelectionArgs,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "sdgdash",
    about = "SDG mapping dashboard command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the candidate data roots (repeatable, first existing wins)
    #[arg(long = "data-root", value_name = "DIR")]
    pub data_roots: Vec<PathBuf>,

    /// Override the thesis file suffix (e.g. -1)
    #[arg(long = "thesis-suffix", value_name = "SUFFIX", allow_hyphen_values = true)]
    pub thesis_suffix: Option<String>,

    /// Override config export directory
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    /// Repeated `--data-root` flags replace the configured root list as a whole.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            roots: (!self.data_roots.is_empty()).then(|| {
                self.data_roots
                    .iter()
                    .map(|p| p.to_string_lossy().to_string())
                    .collect()
            }),
            thesis_suffix: self.thesis_suffix.clone(),
            export_dir: self
                .export_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
