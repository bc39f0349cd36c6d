mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compile {
            data_dir,
            output,
            pretty,
        } => commands::compile::handle(data_dir, output, pretty),

        Commands::Check { data_dir } => commands::check::handle(data_dir),

        Commands::Inspect {
            input,
            weapon,
            affinity,
            json,
        } => commands::inspect::handle(input, weapon, affinity, json),

        Commands::Configure {
            data_dir,
            output,
            pretty,
            show,
        } => commands::configure::handle(data_dir, output, pretty, show),
    }
}

/// Log to stderr; stdout is reserved for command output
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "erweapons=debug,erweapons_cli=debug"
    } else {
        "erweapons=info,erweapons_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
