use std::path::{Path, PathBuf};

pub const IGNORE_FILE_NAME: &str = ".importcrawlignore";

/// Load `.importcrawlignore` by walking up from the given directory.
/// Parses gitignore-style patterns (skip blank lines and # comments).
pub fn load_ignore_file(start: &Path) -> Option<(PathBuf, Vec<String>)> {
    let mut dir = start.to_path_buf();
    loop {
        let ignore_path = dir.join(IGNORE_FILE_NAME);
        if ignore_path.is_file() {
            match std::fs::read_to_string(&ignore_path) {
                Ok(content) => return Some((ignore_path, parse_ignore_patterns(&content))),
                Err(e) => tracing::warn!("Could not read {}: {}", ignore_path.display(), e),
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.to_string())
        .collect()
}
