use crate::parse::common::{dedup_preserving_order, join_relative};
use crate::parse::probe::first_existing;
use crate::parse::ImportHandler;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions tried, in order, after the specifier as written.
pub const JS_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".json"];

// `import x from "./a"`, `import { a, b } from './a'`, `import "./side-effect"`
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s+(?:[^'";]*?\bfrom\s*)?['"]([^'"\n]+)['"]"#)
        .expect("valid JS import regex")
});

static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\(\s*['"]([^'"\n]+)['"]\s*\)"#).expect("valid JS require regex")
});

// `export * from "./a"`, `export { x } from './a'`
static EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bexport\s+[^'";]*?\bfrom\s*['"]([^'"\n]+)['"]"#)
        .expect("valid JS export regex")
});

/// JavaScript / TypeScript handler. Only relative (`.`-prefixed) specifiers
/// are kept; package imports never reach resolution.
pub struct JavaScriptHandler;

impl JavaScriptHandler {
    pub fn new() -> Self {
        Self
    }

    /// Candidate paths for `base` in precedence order.
    fn candidates(base: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(1 + JS_EXTENSIONS.len() * 2);
        candidates.push(base.to_string());
        for ext in JS_EXTENSIONS {
            candidates.push(format!("{base}{ext}"));
        }
        for ext in JS_EXTENSIONS {
            if base.is_empty() {
                candidates.push(format!("index{ext}"));
            } else {
                candidates.push(format!("{base}/index{ext}"));
            }
        }
        // `./utils.js` written for a `utils.ts` source
        if let Some(stem) = JS_EXTENSIONS
            .iter()
            .find_map(|ext| base.strip_suffix(ext))
            .filter(|stem| !stem.is_empty() && !stem.ends_with('/'))
        {
            for ext in JS_EXTENSIONS {
                candidates.push(format!("{stem}{ext}"));
            }
            for ext in JS_EXTENSIONS {
                candidates.push(format!("{stem}/index{ext}"));
            }
        }
        candidates
    }
}

impl Default for JavaScriptHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportHandler for JavaScriptHandler {
    fn extract_imports(&self, content: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();
        for re in [&*IMPORT_RE, &*REQUIRE_RE, &*EXPORT_RE] {
            for caps in re.captures_iter(content) {
                if let Some(m) = caps.get(1) {
                    found.push((m.start(), m.as_str().to_string()));
                }
            }
        }
        found.sort_by_key(|(pos, _)| *pos);

        let relative = found
            .into_iter()
            .map(|(_, spec)| spec)
            .filter(|spec| spec.starts_with('.'))
            .collect();
        dedup_preserving_order(relative)
    }

    fn resolve_import_path(&self, spec: &str, from_dir: &str, root: &Path) -> Option<String> {
        if !spec.starts_with('.') {
            return None;
        }
        let base = join_relative(from_dir, spec)?;
        first_existing(root, Self::candidates(&base))
    }
}
