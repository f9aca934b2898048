use crate::config::resolve::{resolve_config, CliOverrides};
use crate::crawl::Crawler;
use crate::errors::{CrawlError, Result};
use crate::filter::IgnoreFilter;
use crate::output::json::{write_collect_json, CollectOutput, StatsOutput};
use crate::output::text::write_collect_text;
use crate::output::OutputFormat;
use crate::parse::ExtractionStrategy;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct CollectArgs {
    /// Project root; imports never resolve outside it
    pub root: PathBuf,

    /// Start files, relative to the root
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Maximum number of import hops to follow
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Glob pattern for resolved paths to leave out (repeatable)
    #[arg(long)]
    pub ignore: Vec<String>,

    /// How imports are extracted from source
    #[arg(long)]
    pub strategy: Option<ExtractionStrategy>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Disable the crawl and report no files
    #[arg(long)]
    pub no_imports: bool,
}

pub fn run(args: &CollectArgs) -> Result<()> {
    let start = Instant::now();

    let root = args
        .root
        .canonicalize()
        .map_err(|_| CrawlError::Config(format!("Invalid path: {}", args.root.display())))?;

    let overrides = CliOverrides {
        max_depth: args.max_depth,
        strategy: args.strategy,
        no_imports: args.no_imports,
        ignore: args.ignore.clone(),
    };
    let config = resolve_config(&root, &overrides)?.imports;

    let (files, stats) = if config.enabled {
        let crawler = Crawler::new(&root)
            .max_depth(config.max_depth)
            .max_file_size(config.max_file_size)
            .strategy(config.strategy)
            .ignore(IgnoreFilter::new(&config.ignore_patterns)?);
        let outcome = crawler.crawl(&args.files);
        (outcome.files, Some(StatsOutput::from(outcome.stats)))
    } else {
        tracing::info!("Import crawl disabled");
        (Vec::new(), None)
    };

    tracing::info!(
        "Collected {} files in {}ms",
        files.len(),
        start.elapsed().as_millis()
    );

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => write_collect_text(&mut stdout, &files)?,
        OutputFormat::Json => {
            let output = CollectOutput {
                root,
                start_files: args.files.clone(),
                max_depth: config.max_depth,
                files,
                stats,
            };
            write_collect_json(&mut stdout, &output)?;
        }
    }
    Ok(())
}
