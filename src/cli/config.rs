use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::show::render_show;
use crate::errors::{CrawlError, Result};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved configuration with provenance
    Show {
        /// Project root (defaults to current directory)
        root: Option<PathBuf>,
    },
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show { root } => {
            let working_dir = resolve_working_dir(root.as_deref())?;
            let config = resolve_config(&working_dir, &CliOverrides::default())?;
            let mut stdout = std::io::stdout();
            render_show(&mut stdout, &config)?;
        }
    }
    Ok(())
}

fn resolve_working_dir(path: Option<&Path>) -> Result<PathBuf> {
    let p = path.unwrap_or_else(|| Path::new("."));
    p.canonicalize()
        .map_err(|_| CrawlError::Config(format!("Invalid path: {}", p.display())))
}
