use crate::crawl::CrawlStats;
use crate::errors::Result;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct CollectOutput {
    pub root: PathBuf,
    pub start_files: Vec<String>,
    pub max_depth: usize,
    pub files: Vec<String>,
    /// Absent when the crawl was disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsOutput>,
}

#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub files_read: usize,
    pub nodes_skipped: usize,
    pub unresolved_imports: usize,
    pub ignored_imports: usize,
}

impl From<CrawlStats> for StatsOutput {
    fn from(stats: CrawlStats) -> Self {
        Self {
            files_read: stats.files_read,
            nodes_skipped: stats.nodes_skipped,
            unresolved_imports: stats.unresolved_imports,
            ignored_imports: stats.ignored_imports,
        }
    }
}

/// Write collect output as pretty-printed JSON.
pub fn write_collect_json<W: Write>(writer: &mut W, output: &CollectOutput) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, output)?;
    writeln!(writer)?;
    Ok(())
}
