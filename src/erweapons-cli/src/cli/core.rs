//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "erweapons")]
#[command(about = "Elden Ring weapon data compiler", long_about = None)]
pub struct Cli {
    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the six source tables into the weapon data artifact
    Compile {
        /// Directory holding attack.csv, scaling.csv, extraData.csv, ...
        #[arg(short, long, env = "ERWEAPONS_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Artifact path (uses configured default if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Compile without writing anything and report what would be written
    #[command(visible_alias = "k")]
    Check {
        /// Directory holding the source tables
        #[arg(short, long, env = "ERWEAPONS_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Decode an artifact and summarize it, or show one weapon per level
    #[command(visible_alias = "i")]
    Inspect {
        /// Artifact path (uses the configured output if not provided)
        input: Option<PathBuf>,

        /// Weapon name (e.g. "Longsword", "Moonveil")
        #[arg(short, long)]
        weapon: Option<String>,

        /// Only this affinity (e.g. "Heavy", "Flame Art")
        #[arg(short, long, requires = "weapon")]
        affinity: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default source directory
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Set the default artifact path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print compiled JSON by default
        #[arg(long)]
        pretty: Option<bool>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
