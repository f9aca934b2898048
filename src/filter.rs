use crate::errors::Result;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Decides whether a resolved project-relative path is excluded from the crawl.
pub trait IgnorePredicate {
    fn is_ignored(&self, relative_path: &str) -> bool;
}

impl<F> IgnorePredicate for F
where
    F: Fn(&str) -> bool,
{
    fn is_ignored(&self, relative_path: &str) -> bool {
        self(relative_path)
    }
}

/// Glob-based ignore predicate with gitignore-flavoured pattern handling.
///
/// - `*` never crosses `/`; use `**` for that
/// - a pattern without `/` matches at any depth (`ignored.js`, `*.gen.ts`)
///   and, when it names a directory, everything below it
/// - a trailing `/` (`vendor/`) matches everything under that directory
/// - a leading `/` anchors the pattern at the project root
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    set: GlobSet,
}

impl IgnoreFilter {
    /// Compile `patterns`; a malformed pattern is an error, not a silent skip.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for raw in patterns {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            for expanded in expand_pattern(raw) {
                let glob = GlobBuilder::new(&expanded).literal_separator(true).build()?;
                builder.add(glob);
            }
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    /// A filter that ignores nothing.
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }
}

impl IgnorePredicate for IgnoreFilter {
    fn is_ignored(&self, relative_path: &str) -> bool {
        self.set.is_match(relative_path)
    }
}

fn expand_pattern(pattern: &str) -> Vec<String> {
    let anchored = pattern.starts_with('/');
    let dir_only = pattern.ends_with('/');
    let body = pattern.trim_start_matches('/').trim_end_matches('/');
    let floating = !anchored && !body.contains('/');

    let mut globs = Vec::new();
    if !dir_only {
        globs.push(body.to_string());
    }
    globs.push(format!("{body}/**"));
    if floating {
        if !dir_only {
            globs.push(format!("**/{body}"));
        }
        globs.push(format!("**/{body}/**"));
    }
    globs
}
