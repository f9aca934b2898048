use crate::{importcrawl, write};
use predicates::prelude::*;

#[test]
fn config_show_defaults() {
    // No config file present, so everything comes from defaults
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    importcrawl(home.path())
        .args(["config", "show", project.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files: (none)"))
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("imports.enabled: true <- default"))
        .stdout(predicate::str::contains("imports.max_depth: 3 <- default"))
        .stdout(predicate::str::contains("imports.strategy: regex <- default"))
        .stdout(predicate::str::contains(
            "imports.max_file_size: 52428800 <- default",
        ));
}

#[test]
fn config_show_with_project_config() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    write(
        project.path(),
        ".importcrawl.toml",
        r#"
[imports]
max_depth = 6
strategy = "syntax-tree"
ignore = ["vendor/**"]
"#,
    );

    importcrawl(home.path())
        .args(["config", "show", project.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(".importcrawl.toml"))
        .stdout(predicate::str::contains(
            "imports.max_depth: 6 <- project config",
        ))
        .stdout(predicate::str::contains(
            "imports.strategy: syntax-tree <- project config",
        ))
        .stdout(predicate::str::contains(
            "imports.ignore: [\"vendor/**\"] <- project config",
        ));
}

#[test]
fn config_show_with_user_config() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    write(
        home.path(),
        "importcrawl/config.toml",
        "[imports]\nenabled = false\n",
    );

    importcrawl(home.path())
        .args(["config", "show", project.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "imports.enabled: false <- user config",
        ));
}

#[test]
fn config_show_env_var() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();

    importcrawl(home.path())
        .env("IMPORTCRAWL_STRATEGY", "syntax-tree")
        .args(["config", "show", project.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "imports.strategy: syntax-tree <- env var (IMPORTCRAWL_STRATEGY)",
        ));
}

#[test]
fn config_show_rejects_unknown_keys() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    write(project.path(), ".importcrawl.toml", "[imports]\ndepth = 2\n");

    importcrawl(home.path())
        .args(["config", "show", project.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project config"));
}
