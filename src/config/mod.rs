pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::crawl::DEFAULT_MAX_DEPTH;
use crate::parse::ExtractionStrategy;
use crate::read::DEFAULT_MAX_FILE_SIZE;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Fully resolved configuration, no Option fields.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub imports: ImportsConfig,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

/// Settings consumed by the configuration-aware crawl entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportsConfig {
    /// When false the crawl returns nothing without touching the filesystem.
    pub enabled: bool,
    pub max_depth: usize,
    pub max_file_size: u64,
    pub strategy: ExtractionStrategy,
    pub ignore_patterns: Vec<String>,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_depth: DEFAULT_MAX_DEPTH,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            strategy: ExtractionStrategy::default(),
            ignore_patterns: Vec::new(),
        }
    }
}
