pub mod c;
pub mod common;
pub mod javascript;
pub mod probe;
pub mod python;
pub mod registry;
pub mod rust;
pub mod syntax;

pub use registry::Registry;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-language import handler. Each supported language family implements this.
pub trait ImportHandler {
    /// Extract raw import specifiers from a file's content, in source order
    /// with duplicates removed.
    fn extract_imports(&self, content: &str) -> Vec<String>;

    /// Resolve a specifier written in a file under `from_dir` (project-relative,
    /// `""` for the root) to an existing project-relative file.
    /// Returns None if the import is external or no candidate exists.
    fn resolve_import_path(&self, spec: &str, from_dir: &str, root: &Path) -> Option<String>;
}

/// How handlers pull specifiers out of source text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    /// Line and pattern scanning; available for every language.
    #[default]
    Regex,
    /// tree-sitter parsing for Python and Rust, regex for the rest.
    SyntaxTree,
}

impl std::str::FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regex" => Ok(ExtractionStrategy::Regex),
            "syntax-tree" | "syntax_tree" | "tree-sitter" => Ok(ExtractionStrategy::SyntaxTree),
            _ => Err(format!("unsupported extraction strategy: {s}")),
        }
    }
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::Regex => write!(f, "regex"),
            ExtractionStrategy::SyntaxTree => write!(f, "syntax-tree"),
        }
    }
}
