// Configuration commands: show the resolved config, its paths, and the environment

use anyhow::Result;
use colored::*;
use promptvault::{Storage, VaultConfig};
use std::env;

use crate::cli::ConfigAction;

pub fn handle_config(storage: &Storage, config: &VaultConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("⚙️  {}\n", "Configuration:".green());
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => show_configuration_paths(storage),
        ConfigAction::Env => show_environment_variables(),
    }
    Ok(())
}

fn exists_mark(exists: bool) -> ColoredString {
    if exists {
        "✓".green()
    } else {
        "✗".red()
    }
}

fn show_configuration_paths(storage: &Storage) {
    println!("📁 Configuration Paths:");
    println!("  Base directory: {}", storage.base_dir().display());

    let config_path = storage.config_path();
    println!("  Config file: {}", config_path.display());
    println!("    Exists: {}", exists_mark(config_path.exists()));

    let slot_path = storage.slot_path();
    println!("  Library slot '{}': {}", storage.slot(), slot_path.display());
    println!("    Exists: {}", exists_mark(slot_path.exists()));
}

fn show_environment_variables() {
    println!("🌍 Environment Variables:");

    let env_vars = [
        ("PROMPTVAULT_BASE_DIR", "Storage directory (default ~/.promptvault)"),
        ("PROMPTVAULT_SLOT", "Library slot name"),
        ("PROMPTVAULT_LOG_LEVEL", "Enables logging at this level"),
        ("PROMPTVAULT_LOG_FORMAT", "json, pretty or compact"),
        ("PROMPTVAULT_LOG_DIR", "Write logs to a daily file here"),
        ("PROMPTVAULT_LOG_COLOR", "Force colored log output on or off"),
    ];

    for (var_name, description) in &env_vars {
        match env::var(var_name) {
            Ok(value) => println!(
                "  ✓ {}: {} - {}",
                var_name.cyan(),
                value.green(),
                description
            ),
            Err(_) => println!("  - {}: {} - {}", var_name.cyan(), "unset".dimmed(), description),
        }
    }
}
