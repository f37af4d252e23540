//! Config command handler

use crate::args::ConfigSubcommand;
use sdg_dashboard::config::Config;
use sdg_dashboard::core::resolver::SourceResolver;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => {
            persist(config, &key, |c| c.set(&key, &value));
            println!("✓ Set {key} = {value}");
            report_data_root(config, &key);
        }
        Some(ConfigSubcommand::Unset { key }) => {
            persist(config, &key, |c| c.unset(&key, defaults));
            println!("✓ Reset {key} to default");
            report_data_root(config, &key);
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn show(config: &Config, key: Option<&str>) {
    if let Some(k) = key {
        match config.get(k) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("Unknown config key: '{k}'");
                std::process::exit(1);
            }
        }
    } else {
        println!("\n=== Configuration ===");
        println!("# {}\n", Config::get_config_file_path().display());
        print!("{config}");
    }
}

/// Apply one change and save, exiting on the first failure
fn persist<F>(config: &mut Config, key: &str, change: F)
where
    F: FnOnce(&mut Config) -> Result<(), String>,
{
    if let Err(e) = change(config) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        eprintln!("Failed to save config after changing '{key}': {e}");
        std::process::exit(1);
    }
}

/// After a root change, tell the user which root will actually be read
fn report_data_root(config: &Config, key: &str) {
    if key == "roots" {
        let resolver = SourceResolver::from_config(&config.data);
        let root = resolver.select_root();
        let state = if root.is_dir() { "found" } else { "missing" };
        println!("  data root in use: {} ({state})", root.display());
    }
}

fn reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            eprintln!("Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
