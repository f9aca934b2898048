use crate::parse::common::{dedup_preserving_order, join_relative, parent_dir};
use crate::parse::probe::first_existing;
use crate::parse::{syntax, ExtractionStrategy, ImportHandler};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static MOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:#\[[^\]]*\][ \t]*)*(?:pub(?:\([^)]*\))?[ \t]+)?mod[ \t]+([A-Za-z_][A-Za-z0-9_]*)[ \t]*;")
        .expect("valid Rust mod regex")
});

static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\binclude!\s*\(\s*"([^"]+)"\s*\)"#).expect("valid Rust include regex")
});

static USE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?use[ \t]+((?:crate|self|super)::[^;]+);")
        .expect("valid Rust use regex")
});

/// Rust handler for `mod x;`, `include!("...")` and `use crate|self|super::...`.
///
/// Specifiers come in three kinds: a bare identifier (`mod` declaration), a
/// `crate::` / `self::` / `super::` path (`use`), or an `include!("...")`
/// specifier whose path is taken verbatim. Anything else does not resolve.
pub struct RustHandler {
    strategy: ExtractionStrategy,
}

impl RustHandler {
    pub fn new() -> Self {
        Self {
            strategy: ExtractionStrategy::Regex,
        }
    }

    pub fn with_strategy(strategy: ExtractionStrategy) -> Self {
        Self { strategy }
    }

    fn extract_with_regex(content: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();
        for caps in MOD_RE.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                found.push((m.start(), m.as_str().to_string()));
            }
        }
        for caps in INCLUDE_RE.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                found.push((m.start(), include_spec(m.as_str())));
            }
        }
        for caps in USE_RE.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                for path in expand_use_tree(m.as_str()) {
                    found.push((m.start(), path));
                }
            }
        }
        // stable sort keeps expansion order for paths sharing one `use`
        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, spec)| spec).collect()
    }

    /// Split a `use` path into its base directory and the module segments.
    fn rebase<'a>(spec: &'a str, from_dir: &'a str) -> Option<(Vec<&'a str>, Vec<&'a str>)> {
        if let Some(rest) = spec.strip_prefix("crate::") {
            // crate root is the project root, or `src/` for a Cargo layout
            return Some((vec!["", "src"], segments(rest)));
        }
        if let Some(rest) = spec.strip_prefix("self::") {
            return Some((vec![from_dir], segments(rest)));
        }
        let mut base = from_dir;
        let mut rest = spec;
        while let Some(next) = rest.strip_prefix("super::") {
            if base.is_empty() {
                return None;
            }
            base = parent_dir(base);
            rest = next;
        }
        if rest.len() == spec.len() {
            return None;
        }
        Some((vec![base], segments(rest)))
    }

    /// `[<path>.rs, <path>/mod.rs]`, dropping trailing item names until a
    /// module file turns up.
    fn find_module_file(base: &str, segments: &[&str], root: &Path) -> Option<String> {
        for len in (1..=segments.len()).rev() {
            let module = join_relative(base, &segments[..len].join("/"))?;
            if let Some(found) =
                first_existing(root, [format!("{module}.rs"), format!("{module}/mod.rs")])
            {
                return Some(found);
            }
        }
        None
    }
}

impl Default for RustHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportHandler for RustHandler {
    fn extract_imports(&self, content: &str) -> Vec<String> {
        let specs = match self.strategy {
            ExtractionStrategy::SyntaxTree => {
                syntax::rust_imports(content).unwrap_or_else(|| Self::extract_with_regex(content))
            }
            ExtractionStrategy::Regex => Self::extract_with_regex(content),
        };
        dedup_preserving_order(specs)
    }

    fn resolve_import_path(&self, spec: &str, from_dir: &str, root: &Path) -> Option<String> {
        if let Some(path) = include_path(spec) {
            let candidate = join_relative(from_dir, path)?;
            return first_existing(root, [candidate]);
        }
        if is_identifier(spec) {
            let module = join_relative(from_dir, spec)?;
            return first_existing(root, [format!("{module}.rs"), format!("{module}/mod.rs")]);
        }
        if spec.starts_with("crate::") || spec.starts_with("self::") || spec.starts_with("super::") {
            let (bases, segments) = Self::rebase(spec, from_dir)?;
            return bases
                .into_iter()
                .find_map(|base| Self::find_module_file(base, &segments, root));
        }
        None
    }
}

/// Specifier for an `include!` argument, kept distinct from `mod` names so
/// `include!("generated")` is never resolved as `generated.rs`.
pub(crate) fn include_spec(path: &str) -> String {
    format!("include!(\"{path}\")")
}

fn include_path(spec: &str) -> Option<&str> {
    spec.strip_prefix("include!(\"")?.strip_suffix("\")")
}

fn is_identifier(spec: &str) -> bool {
    let mut chars = spec.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn segments(path: &str) -> Vec<&str> {
    path.split("::")
        .filter(|s| !s.is_empty() && *s != "*" && *s != "self")
        .collect()
}

/// Expand a `use` tree into flat paths.
///
/// `crate::a::{b, c::{d, e as f}, self}` →
/// `crate::a::b`, `crate::a::c::d`, `crate::a::c::e`, `crate::a`
pub(crate) fn expand_use_tree(tree: &str) -> Vec<String> {
    let compact: String = tree.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut paths = Vec::new();
    expand_into("", &compact, &mut paths);
    paths
}

fn expand_into(prefix: &str, tree: &str, out: &mut Vec<String>) {
    let tree = tree.trim();
    if tree.is_empty() {
        return;
    }
    if let Some(open) = tree.find('{') {
        let head = tree[..open].trim().trim_end_matches("::");
        let close = tree.rfind('}').unwrap_or(tree.len());
        let inner = &tree[open + 1..close.max(open + 1)];
        let next_prefix = join_use(prefix, head);
        for item in split_top_level(inner) {
            expand_into(&next_prefix, item, out);
        }
        return;
    }

    // `x as y` keeps the original path
    let item = tree.split(" as ").next().unwrap_or(tree).trim();
    let item = item.trim_end_matches("::*").trim_end_matches("::");
    match item {
        "" | "*" | "self" => {
            if !prefix.is_empty() {
                out.push(prefix.to_string());
            }
        }
        _ => out.push(join_use(prefix, item)),
    }
}

fn join_use(prefix: &str, item: &str) -> String {
    match (prefix.is_empty(), item.is_empty()) {
        (true, _) => item.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}::{item}"),
    }
}

/// Split on commas that are not nested inside braces.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&list[start..]);
    items
}
