use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Default,
    UserConfig(PathBuf),
    ProjectConfig(PathBuf),
    IgnoreFile(PathBuf),
    EnvVar(String),
    CliFlag(String),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Default => write!(f, "default"),
            Source::UserConfig(path) => write!(f, "user config ({})", path.display()),
            Source::ProjectConfig(path) => write!(f, "project config ({})", path.display()),
            Source::IgnoreFile(path) => write!(f, "ignore file ({})", path.display()),
            Source::EnvVar(name) => write!(f, "env var ({})", name),
            Source::CliFlag(name) => write!(f, "CLI flag ({})", name),
        }
    }
}

/// Tracks the source of each configuration value by dotted key.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceMap {
    entries: BTreeMap<String, Source>,
}

impl ProvenanceMap {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, source: Source) {
        self.entries.insert(key.into(), source);
    }

    pub fn get(&self, key: &str) -> Option<&Source> {
        self.entries.get(key)
    }

    /// Return all entries sorted by key.
    pub fn sorted_entries(&self) -> Vec<(&str, &Source)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut map = ProvenanceMap::new();
        map.set("imports.enabled", Source::Default);
        map.set(
            "imports.max_depth",
            Source::ProjectConfig(PathBuf::from("/project/.importcrawl.toml")),
        );

        assert_eq!(map.get("imports.enabled"), Some(&Source::Default));
        assert_eq!(
            map.get("imports.max_depth"),
            Some(&Source::ProjectConfig(PathBuf::from(
                "/project/.importcrawl.toml"
            )))
        );
        assert_eq!(map.get("nonexistent"), None);
    }

    #[test]
    fn later_set_wins_and_order_is_sorted() {
        let mut map = ProvenanceMap::new();
        map.set("imports.strategy", Source::Default);
        map.set("imports.enabled", Source::Default);
        map.set("imports.strategy", Source::CliFlag("--strategy".into()));

        let entries = map.sorted_entries();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["imports.enabled", "imports.strategy"]);
        assert_eq!(entries[1].1, &Source::CliFlag("--strategy".into()));
    }

    #[test]
    fn display_sources() {
        assert_eq!(format!("{}", Source::Default), "default");
        assert_eq!(
            format!(
                "{}",
                Source::ProjectConfig(PathBuf::from("/project/.importcrawl.toml"))
            ),
            "project config (/project/.importcrawl.toml)"
        );
        assert_eq!(
            format!("{}", Source::EnvVar("IMPORTCRAWL_MAX_DEPTH".to_string())),
            "env var (IMPORTCRAWL_MAX_DEPTH)"
        );
        assert_eq!(
            format!("{}", Source::CliFlag("--max-depth".to_string())),
            "CLI flag (--max-depth)"
        );
    }
}
