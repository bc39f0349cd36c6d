//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up erweapons CLI defaults.

use crate::config::{Config, DEFAULT_DATA_DIR, DEFAULT_OUTPUT};
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `data_dir` - Optional default source directory
/// * `output` - Optional default artifact path
/// * `pretty` - Optional default for pretty-printing
/// * `show` - If true, show current configuration
pub fn handle(
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: Option<bool>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if !apply(&mut config, data_dir, output, pretty) {
        show_usage();
        return Ok(());
    }

    config.save()?;
    show_config(&config);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Apply the given settings; returns false if there was nothing to set
pub fn apply(
    config: &mut Config,
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: Option<bool>,
) -> bool {
    let changed = data_dir.is_some() || output.is_some() || pretty.is_some();

    if let Some(dir) = data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(path) = output {
        config.output = Some(path);
    }
    if let Some(pretty) = pretty {
        config.pretty = pretty;
    }

    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.data_dir {
        Some(dir) => println!("Data directory: {}", dir.display()),
        None => println!("Data directory: {} (default)", DEFAULT_DATA_DIR),
    }
    match &config.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: {} (default)", DEFAULT_OUTPUT),
    }
    println!("Pretty JSON: {}", config.pretty);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: erweapons configure --data-dir DIR");
    println!("   or: erweapons configure --output weaponData.json --pretty true");
    println!("   or: erweapons configure --show");
    println!();
    println!("The data directory holds the Weapon Calculator CSV exports:");
    println!("  attack.csv, scaling.csv, extraData.csv, calcCorrectGraph.csv,");
    println!("  attackElementCorrect.csv, status.csv");
}
