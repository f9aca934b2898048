//! Follow local imports from a set of start files and collect every project
//! file they reach, up to a bounded number of hops.
//!
//! Supported languages: JavaScript/TypeScript, C/C++, Python and Rust.

pub mod cli;
pub mod config;
pub mod crawl;
pub mod errors;
pub mod filter;
pub mod output;
pub mod parse;
pub mod read;

pub use config::ImportsConfig;
pub use crawl::{
    collect_imported_file_paths, collect_imported_files, CrawlOutcome, CrawlStats, Crawler,
    DEFAULT_MAX_DEPTH,
};
pub use errors::{CrawlError, Result};
pub use filter::{IgnoreFilter, IgnorePredicate};
pub use parse::{ExtractionStrategy, ImportHandler, Registry};
pub use read::{FsReader, SourceReader};
