//! Breadth-first import crawl bounded by depth.
//!
//! Start files sit at depth 0 and are pre-visited, so they never show up in
//! the result. A node at depth `max_depth` or deeper is dequeued but never
//! read; everything discovered is reported in breadth-first acceptance order.

use crate::config::ImportsConfig;
use crate::errors::Result;
use crate::filter::{IgnoreFilter, IgnorePredicate};
use crate::parse::common::{extension_of, normalize_relative, parent_dir, to_relative_slash};
use crate::parse::{ExtractionStrategy, Registry};
use crate::read::{FsReader, SourceReader, DEFAULT_MAX_FILE_SIZE};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Import hops expanded when no depth is configured.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Counters gathered during one crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Nodes whose content was read and scanned.
    pub files_read: usize,
    /// Nodes dropped without expansion: too deep, unreadable, empty or no handler.
    pub nodes_skipped: usize,
    /// Specifiers that resolved to nothing.
    pub unresolved_imports: usize,
    /// Resolved paths rejected by the ignore predicate.
    pub ignored_imports: usize,
}

/// Result of a crawl: discovered files plus counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlOutcome {
    pub files: Vec<String>,
    pub stats: CrawlStats,
}

struct Node {
    path: String,
    depth: usize,
}

/// Configurable crawler. Owns its collaborators; each call to [`Crawler::crawl`]
/// starts from a fresh queue and visited set.
pub struct Crawler {
    root: PathBuf,
    max_depth: usize,
    max_file_size: u64,
    registry: Registry,
    reader: Box<dyn SourceReader>,
    ignore: Box<dyn IgnorePredicate>,
}

impl Crawler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            registry: Registry::default(),
            reader: Box::new(FsReader),
            ignore: Box::new(IgnoreFilter::empty()),
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn strategy(mut self, strategy: ExtractionStrategy) -> Self {
        self.registry = Registry::new(strategy);
        self
    }

    pub fn reader(mut self, reader: impl SourceReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    pub fn ignore(mut self, ignore: impl IgnorePredicate + 'static) -> Self {
        self.ignore = Box::new(ignore);
        self
    }

    /// Crawl from `start_files` (project-relative) and return discovered files.
    pub fn collect<S: AsRef<str>>(&self, start_files: &[S]) -> Vec<String> {
        self.crawl(start_files).files
    }

    /// Crawl from `start_files` and return discovered files with counters.
    pub fn crawl<S: AsRef<str>>(&self, start_files: &[S]) -> CrawlOutcome {
        let mut queue: VecDeque<Node> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut outcome = CrawlOutcome::default();

        for start in start_files {
            let Some(path) = self.normalize_start(start.as_ref()) else {
                tracing::warn!("Ignoring start file outside the project: {}", start.as_ref());
                continue;
            };
            if visited.insert(path.clone()) {
                queue.push_back(Node { path, depth: 0 });
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            start_files = queue.len(),
            max_depth = self.max_depth,
            "starting import crawl"
        );

        while let Some(node) = queue.pop_front() {
            if node.depth >= self.max_depth {
                outcome.stats.nodes_skipped += 1;
                continue;
            }

            let Some(ext) = extension_of(&node.path) else {
                tracing::trace!("No extension: {}", node.path);
                outcome.stats.nodes_skipped += 1;
                continue;
            };
            let Some(handler) = self.registry.handler_for(ext) else {
                tracing::trace!("No handler for {}: {}", ext, node.path);
                outcome.stats.nodes_skipped += 1;
                continue;
            };

            let content = match self.reader.read(&self.root.join(&node.path), self.max_file_size) {
                Some(content) if !content.is_empty() => content,
                _ => {
                    tracing::debug!("Skipping unreadable or empty file: {}", node.path);
                    outcome.stats.nodes_skipped += 1;
                    continue;
                }
            };
            outcome.stats.files_read += 1;

            let from_dir = parent_dir(&node.path);
            for spec in handler.extract_imports(&content) {
                let Some(resolved) = handler.resolve_import_path(&spec, from_dir, &self.root)
                else {
                    tracing::trace!("Unresolved import {:?} in {}", spec, node.path);
                    outcome.stats.unresolved_imports += 1;
                    continue;
                };
                if self.ignore.is_ignored(&resolved) {
                    tracing::trace!("Ignored import {} from {}", resolved, node.path);
                    outcome.stats.ignored_imports += 1;
                    continue;
                }
                if visited.insert(resolved.clone()) {
                    tracing::trace!("{} -> {} (depth {})", node.path, resolved, node.depth + 1);
                    outcome.files.push(resolved.clone());
                    queue.push_back(Node {
                        path: resolved,
                        depth: node.depth + 1,
                    });
                }
            }
        }

        tracing::debug!(
            files = outcome.files.len(),
            files_read = outcome.stats.files_read,
            skipped = outcome.stats.nodes_skipped,
            unresolved = outcome.stats.unresolved_imports,
            "import crawl finished"
        );
        outcome
    }

    /// Project-relative, slash-separated form of a start file. Absolute paths
    /// under the root are accepted and made relative.
    fn normalize_start(&self, start: &str) -> Option<String> {
        let path = Path::new(start);
        if path.is_absolute() {
            let relative = path.strip_prefix(&self.root).ok()?;
            return to_relative_slash(&path_clean::clean(relative)).filter(|p| !p.is_empty());
        }
        normalize_relative(start).filter(|p| !p.is_empty())
    }
}

/// Collect every file reachable from `start_files` within `max_depth` import hops,
/// excluding the start files themselves.
pub fn collect_imported_files<S: AsRef<str>>(
    start_files: &[S],
    root: &Path,
    max_depth: usize,
) -> Vec<String> {
    Crawler::new(root).max_depth(max_depth).collect(start_files)
}

/// Configuration-aware variant of [`collect_imported_files`].
///
/// Returns an empty list without touching the filesystem when imports are
/// disabled. Malformed ignore patterns are reported as errors.
pub fn collect_imported_file_paths<S: AsRef<str>>(
    start_files: &[S],
    root: &Path,
    config: &ImportsConfig,
) -> Result<Vec<String>> {
    if !config.enabled {
        tracing::debug!("Import crawl disabled");
        return Ok(Vec::new());
    }
    let filter = IgnoreFilter::new(&config.ignore_patterns)?;
    let crawler = Crawler::new(root)
        .max_depth(config.max_depth)
        .max_file_size(config.max_file_size)
        .strategy(config.strategy)
        .ignore(filter);
    Ok(crawler.collect(start_files))
}
