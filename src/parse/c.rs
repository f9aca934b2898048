use crate::parse::common::{dedup_preserving_order, join_relative};
use crate::parse::probe::first_existing;
use crate::parse::ImportHandler;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*#[ \t]*include[ \t]*[<"]([^">\n]+)[">]"#)
        .expect("valid C include regex")
});

/// C / C++ handler for `#include` directives.
///
/// Both `"..."` and `<...>` forms are extracted; only specifiers starting with
/// `.` resolve, and they resolve to exactly one candidate with no extension
/// substitution.
pub struct CHandler;

impl CHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportHandler for CHandler {
    fn extract_imports(&self, content: &str) -> Vec<String> {
        let includes = INCLUDE_RE
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect();
        dedup_preserving_order(includes)
    }

    fn resolve_import_path(&self, spec: &str, from_dir: &str, root: &Path) -> Option<String> {
        if !spec.starts_with('.') {
            return None;
        }
        let candidate = join_relative(from_dir, spec)?;
        first_existing(root, [candidate])
    }
}
