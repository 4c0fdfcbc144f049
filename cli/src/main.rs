mod cli;
mod commands;
mod config;
mod print;

use crate::cli::{Cli, Commands};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;
use tracing_subscriber::{EnvFilter, prelude::*};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Commands::Completion { shell } = cli.command {
        let mut cmd = Cli::command();
        let name = env!("CARGO_BIN_NAME");
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let resolver = config::load_resolver(cli.config.as_deref(), cli.policy)?;

    match cli.command {
        Commands::Resolve { headers, json } => {
            commands::resolve::handle(&resolver, headers, json)?;
        }
        Commands::Check { addresses } => {
            commands::check::handle(resolver.ranges(), &addresses);
        }
        Commands::Ranges { json } => {
            commands::ranges::handle(resolver.ranges(), json)?;
        }
        Commands::Completion { .. } => {}
    }

    Ok(())
}
