pub mod collect;
pub mod config;

use crate::errors::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "importcrawl",
    version,
    about = "Collect the files reachable through local imports"
)]
pub struct Cli {
    /// Log crawl progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Follow imports from start files and list every file reached
    Collect(collect::CollectArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Collect(args) => collect::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}
