//! tree-sitter backed extraction for Python and Rust.
//!
//! Produces specifiers in exactly the shape the regex extractors do, so both
//! strategies feed the same resolvers. Returns `None` when the source does not
//! parse cleanly; callers fall back to regex scanning.

use crate::parse::python::from_import_specs;
use crate::parse::rust::{expand_use_tree, include_spec};
use std::sync::LazyLock;
use streaming_iterator::StreamingIterator;

fn parse(content: &str, language: tree_sitter::Language) -> Option<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&language).ok()?;
    let tree = parser.parse(content, None)?;
    if tree.root_node().has_error() {
        tracing::debug!("syntax tree has errors; falling back to regex extraction");
        return None;
    }
    Some(tree)
}

fn text<'a>(node: tree_sitter::Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

/// Python specifiers from `import` and `from ... import` statements.
pub fn python_imports(content: &str) -> Option<Vec<String>> {
    let tree = parse(content, tree_sitter_python::LANGUAGE.into())?;
    let mut specs = Vec::new();
    walk_python(tree.root_node(), content.as_bytes(), &mut specs);
    Some(specs)
}

fn walk_python(node: tree_sitter::Node, source: &[u8], specs: &mut Vec<String>) {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                let module = python_name(name, source);
                if !module.is_empty() {
                    specs.push(module.to_string());
                }
            }
        }
        "import_from_statement" => {
            let Some(module_node) = node.child_by_field_name("module_name") else {
                return;
            };
            let module = text(module_node, source);

            let mut names: Vec<String> = Vec::new();
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "wildcard_import" {
                    names.push("*".to_string());
                }
            }
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                let name = python_name(name, source);
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
            specs.extend(from_import_specs(module, &names));
        }
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                walk_python(child, source, specs);
            }
        }
    }
}

/// `a.b` for a dotted_name, the original name for `a.b as c`.
fn python_name<'a>(node: tree_sitter::Node, source: &'a [u8]) -> &'a str {
    if node.kind() == "aliased_import" {
        return node
            .child_by_field_name("name")
            .map(|n| text(n, source))
            .unwrap_or_default();
    }
    text(node, source)
}

/// File-backed `mod` items, local `use` trees and `include!` string arguments.
const RUST_IMPORT_QUERY: &str = r#"
(mod_item !body name: (identifier) @mod)
(use_declaration argument: (_) @use)
(macro_invocation
  macro: (identifier) @macro
  (token_tree (string_literal) @include)
  (#eq? @macro "include"))
"#;

static RUST_QUERY: LazyLock<tree_sitter::Query> = LazyLock::new(|| {
    tree_sitter::Query::new(&tree_sitter_rust::LANGUAGE.into(), RUST_IMPORT_QUERY)
        .expect("failed to compile Rust import query")
});

/// Rust specifiers from file-backed `mod` items, `include!` and local `use` paths.
pub fn rust_imports(content: &str) -> Option<Vec<String>> {
    let tree = parse(content, tree_sitter_rust::LANGUAGE.into())?;
    let query = &*RUST_QUERY;
    let capture_names = query.capture_names();
    let source = content.as_bytes();

    let mut specs = Vec::new();
    let mut cursor = tree_sitter::QueryCursor::new();
    let mut matches = cursor.matches(query, tree.root_node(), source);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let value = text(capture.node, source);
            match capture_names[capture.index as usize] {
                "mod" => specs.push(value.to_string()),
                "use" => specs.extend(
                    expand_use_tree(value)
                        .into_iter()
                        .filter(|p| is_local_use_path(p)),
                ),
                "include" => specs.push(include_spec(value.trim_matches('"'))),
                _ => {}
            }
        }
    }
    Some(specs)
}

fn is_local_use_path(path: &str) -> bool {
    path.starts_with("crate::") || path.starts_with("self::") || path.starts_with("super::")
}
