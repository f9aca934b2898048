use std::collections::HashSet;
use std::path::{Component, Path};

/// Join `relative` onto the project-relative directory `base` and normalize
/// the result lexically.
///
/// Returns `None` when the joined path is absolute or climbs above the
/// project root, so callers never produce a path outside `root`.
pub fn join_relative(base: &str, relative: &str) -> Option<String> {
    let joined = Path::new(base).join(relative);
    let cleaned = path_clean::clean(&joined);
    to_relative_slash(&cleaned)
}

/// Render a relative path with `/` separators, dropping `.` components.
///
/// Absolute paths, prefixes and leftover `..` components yield `None`.
pub fn to_relative_slash(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.join("/"))
}

/// Normalize a caller-supplied project-relative path (`./a\\b.js` → `a/b.js`).
pub fn normalize_relative(path: &str) -> Option<String> {
    join_relative("", &path.replace('\\', "/"))
}

/// Directory part of a project-relative path (`""` for files at the root).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Extension of a project-relative path including the leading dot.
pub fn extension_of(path: &str) -> Option<&str> {
    let file_name = &path[path.rfind('/').map_or(0, |i| i + 1)..];
    let idx = file_name.rfind('.')?;
    if idx == 0 {
        // dotfiles such as `.bashrc` have no extension
        return None;
    }
    Some(&file_name[idx..])
}

/// Remove duplicates while keeping the first occurrence of each specifier.
pub fn dedup_preserving_order(specs: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    specs
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
