use crate::parse::common::{dedup_preserving_order, join_relative, parent_dir};
use crate::parse::probe::{exists, first_existing};
use crate::parse::{syntax, ExtractionStrategy, ImportHandler};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*from\s+(\.+[\w.]*|[A-Za-z_][\w.]*)\s+import\s+(.+)$")
        .expect("valid Python from-import regex")
});

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+(.+)$").expect("valid Python import regex"));

pub struct PythonHandler {
    strategy: ExtractionStrategy,
}

impl PythonHandler {
    pub fn new() -> Self {
        Self {
            strategy: ExtractionStrategy::Regex,
        }
    }

    pub fn with_strategy(strategy: ExtractionStrategy) -> Self {
        Self { strategy }
    }

    fn extract_with_regex(content: &str) -> Vec<String> {
        let mut specs = Vec::new();
        for line in logical_lines(content) {
            for statement in line.split(';') {
                if let Some(caps) = FROM_RE.captures(statement) {
                    let names = split_names(&caps[2]);
                    specs.extend(from_import_specs(&caps[1], &names));
                } else if let Some(caps) = IMPORT_RE.captures(statement) {
                    specs.extend(split_names(&caps[1]));
                }
            }
        }
        specs
    }

    /// `[<path>.py, <path>/__init__.py]` for dotted `segments` under `base`.
    fn resolve_segments(base: &str, segments: &[&str], root: &Path) -> Option<String> {
        if segments.is_empty() {
            let init = join_relative(base, "__init__.py")?;
            return first_existing(root, [init]);
        }
        let module = join_relative(base, &segments.join("/"))?;
        first_existing(
            root,
            [format!("{module}.py"), format!("{module}/__init__.py")],
        )
    }

    fn resolve_relative(spec: &str, from_dir: &str, root: &Path) -> Option<String> {
        let level = spec.chars().take_while(|&c| c == '.').count();
        let mut base = from_dir;
        for _ in 1..level {
            if base.is_empty() {
                return None;
            }
            base = parent_dir(base);
        }

        let segments: Vec<&str> = spec[level..].split('.').filter(|s| !s.is_empty()).collect();
        if let Some(found) = Self::resolve_segments(base, &segments, root) {
            return Some(found);
        }
        // `from .models import User`: the last segment may be a symbol, not a module
        match segments.split_last() {
            Some((_, parent)) => Self::resolve_segments(base, parent, root),
            None => None,
        }
    }

    fn resolve_absolute(spec: &str, root: &Path) -> Option<String> {
        let segments: Vec<&str> = spec.split('.').filter(|s| !s.is_empty()).collect();
        let first = segments.first()?;
        // Only project-local packages; site-packages and stdlib imports stop here
        if !exists(&root.join(first)) && !exists(&root.join(format!("{first}.py"))) {
            return None;
        }
        Self::resolve_segments("", &segments, root)
    }
}

impl Default for PythonHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportHandler for PythonHandler {
    fn extract_imports(&self, content: &str) -> Vec<String> {
        let specs = match self.strategy {
            ExtractionStrategy::SyntaxTree => syntax::python_imports(content)
                .unwrap_or_else(|| Self::extract_with_regex(content)),
            ExtractionStrategy::Regex => Self::extract_with_regex(content),
        };
        dedup_preserving_order(specs)
    }

    fn resolve_import_path(&self, spec: &str, from_dir: &str, root: &Path) -> Option<String> {
        if spec.starts_with('.') {
            Self::resolve_relative(spec, from_dir, root)
        } else {
            Self::resolve_absolute(spec, root)
        }
    }
}

/// Specifiers produced by `from <module> import <names>`.
///
/// Relative modules yield one specifier per imported name so that submodule
/// imports (`from . import utils`) reach the submodule file; absolute modules
/// yield the module itself.
pub(crate) fn from_import_specs(module: &str, names: &[String]) -> Vec<String> {
    if !module.starts_with('.') {
        return vec![module.to_string()];
    }
    if names.is_empty() || names.iter().any(|n| n == "*") {
        return vec![module.to_string()];
    }
    let all_dots = module.chars().all(|c| c == '.');
    names
        .iter()
        .map(|name| {
            if all_dots {
                format!("{module}{name}")
            } else {
                format!("{module}.{name}")
            }
        })
        .collect()
}

/// `a, b.c as d, (e)` → `["a", "b.c", "e"]`
fn split_names(list: &str) -> Vec<String> {
    list.replace(['(', ')'], " ")
        .split(',')
        .filter_map(|part| part.split_whitespace().next())
        .map(|name| name.to_string())
        .collect()
}

/// Join parenthesised and backslash-continued import statements onto one line
/// and strip trailing comments. Non-import lines pass through untouched.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut buf = String::new();
    let mut depth: i32 = 0;

    for raw in content.lines() {
        let line = raw.split('#').next().unwrap_or_default().trim_end();
        if buf.is_empty() {
            let trimmed = line.trim_start();
            if !(trimmed.starts_with("from ") || trimmed.starts_with("import ")) {
                lines.push(line.to_string());
                continue;
            }
        }

        let continued = line.ends_with('\\');
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(line.trim_end_matches('\\'));
        depth += line.matches('(').count() as i32 - line.matches(')').count() as i32;

        if depth > 0 || continued {
            continue;
        }
        lines.push(std::mem::take(&mut buf));
        depth = 0;
    }
    if !buf.is_empty() {
        lines.push(buf);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn extracts_simple_and_multiple_imports() {
        let imports = PythonHandler::new().extract_imports("import os\nimport a, b.c as d\n");
        assert_eq!(imports, vec!["os", "a", "b.c"]);
    }

    #[test]
    fn extracts_absolute_from_import() {
        let imports = PythonHandler::new().extract_imports("from pkg.helper import func, other\n");
        assert_eq!(imports, vec!["pkg.helper"]);
    }

    #[test]
    fn extracts_relative_from_import_per_name() {
        let imports =
            PythonHandler::new().extract_imports("from .pkg import mod, other as o\nfrom . import utils\nfrom .. import config\n");
        assert_eq!(imports, vec![".pkg.mod", ".pkg.other", ".utils", "..config"]);
    }

    #[test]
    fn extracts_parenthesised_names() {
        let source = "from .models import (\n    User,  # the user\n    Group,\n)\nimport json\n";
        let imports = PythonHandler::new().extract_imports(source);
        assert_eq!(imports, vec![".models.User", ".models.Group", "json"]);
    }

    #[test]
    fn wildcard_import_yields_module() {
        let imports = PythonHandler::new().extract_imports("from .consts import *\n");
        assert_eq!(imports, vec![".consts"]);
    }

    #[test]
    fn skips_comments_and_strings() {
        let source = "# import hidden\nx = 'from a import b'\n";
        assert!(PythonHandler::new().extract_imports(source).is_empty());
    }

    #[test]
    fn resolves_relative_submodule() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "pkg/__init__.py");
        write(tmp.path(), "pkg/helper.py");
        let handler = PythonHandler::new();
        assert_eq!(
            handler.resolve_import_path(".pkg.helper", "", tmp.path()),
            Some("pkg/helper.py".to_string())
        );
    }

    #[test]
    fn resolves_parent_levels() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "app/config.py");
        let handler = PythonHandler::new();
        assert_eq!(
            handler.resolve_import_path("..config", "app/sub", tmp.path()),
            Some("app/config.py".to_string())
        );
    }

    #[test]
    fn too_many_levels_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "config.py");
        let handler = PythonHandler::new();
        assert_eq!(handler.resolve_import_path("...config", "a", tmp.path()), None);
    }

    #[test]
    fn module_file_beats_package() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "util.py");
        write(tmp.path(), "util/__init__.py");
        let handler = PythonHandler::new();
        assert_eq!(
            handler.resolve_import_path("util", "", tmp.path()),
            Some("util.py".to_string())
        );
    }

    #[test]
    fn symbol_import_falls_back_to_module() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "app/models.py");
        let handler = PythonHandler::new();
        assert_eq!(
            handler.resolve_import_path(".models.User", "app", tmp.path()),
            Some("app/models.py".to_string())
        );
    }

    #[test]
    fn dot_name_falls_back_to_package_init() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "app/__init__.py");
        let handler = PythonHandler::new();
        assert_eq!(
            handler.resolve_import_path(".helper_fn", "app", tmp.path()),
            Some("app/__init__.py".to_string())
        );
    }

    #[test]
    fn resolves_absolute_local_package() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "pkg/__init__.py");
        write(tmp.path(), "pkg/helper.py");
        let handler = PythonHandler::new();
        assert_eq!(
            handler.resolve_import_path("pkg.helper", "nested/dir", tmp.path()),
            Some("pkg/helper.py".to_string())
        );
    }

    #[test]
    fn external_absolute_import_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "main.py");
        let handler = PythonHandler::new();
        assert_eq!(handler.resolve_import_path("requests", "", tmp.path()), None);
        assert_eq!(handler.resolve_import_path("os.path", "", tmp.path()), None);
    }

    #[test]
    fn from_import_specs_shapes() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(from_import_specs("pkg", &names), vec!["pkg"]);
        assert_eq!(from_import_specs(".", &names), vec![".a", ".b"]);
        assert_eq!(from_import_specs("..x", &names), vec!["..x.a", "..x.b"]);
        assert_eq!(from_import_specs(".x", &["*".to_string()]), vec![".x"]);
    }
}
