use clap::{Parser, Subcommand, value_parser};
use clap_complete::Shell;
use source_ip::ScanPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "xff",
    version,
    about = "Find the public client address in an X-Forwarded-For chain",
    long_about = None
)]
pub struct Cli {
    /// TOML file describing the resolver. Defaults to $SOURCE_IP_CONFIG
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Direction in which the chain is scanned: backward or forward
    #[arg(short, long, global = true)]
    pub policy: Option<ScanPolicy>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve header values given as arguments, or one per line on stdin
    Resolve {
        /// Raw X-Forwarded-For values
        headers: Vec<String>,
        #[arg(short, long, default_value = "false")]
        json: bool,
    },

    /// Classify single addresses as public or private
    Check {
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// List the active non-routable ranges
    Ranges {
        #[arg(short, long, default_value = "false")]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        // Shell type to generate completion script for
        #[arg(value_parser = value_parser!(Shell))]
        shell: Shell,
    },
}
