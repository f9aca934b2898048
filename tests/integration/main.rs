mod collect_test;
mod config_test;

use assert_cmd::Command;
use std::path::Path;

/// The binary with user-level config and environment overrides isolated to `home`.
pub fn importcrawl(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("importcrawl").unwrap();
    cmd.env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env_remove("IMPORTCRAWL_MAX_DEPTH")
        .env_remove("IMPORTCRAWL_ENABLED")
        .env_remove("IMPORTCRAWL_STRATEGY")
        .env_remove("RUST_LOG");
    cmd
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
