use crate::{importcrawl, write};
use predicates::prelude::*;
use std::path::Path;

fn js_chain(root: &Path) {
    write(root, "index.js", "import a from './a';\nimport pad from 'left-pad';\n");
    write(root, "a.js", "const b = require('./b');\n");
    write(root, "b.js", "export * from './c';\n");
    write(root, "c.js", "export const c = 1;\n");
}

#[test]
fn collect_text_lists_files_in_discovery_order() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());

    importcrawl(home.path())
        .args(["collect", project.path().to_str().unwrap(), "index.js"])
        .assert()
        .success()
        .stdout("a.js\nb.js\nc.js\n");
}

#[test]
fn collect_respects_max_depth_flag() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());

    importcrawl(home.path())
        .args([
            "collect",
            project.path().to_str().unwrap(),
            "index.js",
            "--max-depth",
            "1",
        ])
        .assert()
        .success()
        .stdout("a.js\n");
}

#[test]
fn collect_json_output() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());

    let output = importcrawl(home.path())
        .args([
            "collect",
            project.path().to_str().unwrap(),
            "index.js",
            "--max-depth",
            "2",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["start_files"], serde_json::json!(["index.js"]));
    assert_eq!(json["max_depth"], 2);
    assert_eq!(json["files"], serde_json::json!(["a.js", "b.js"]));
    assert_eq!(json["stats"]["files_read"], 2);
}

#[test]
fn collect_ignore_flag_drops_matches() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());

    importcrawl(home.path())
        .args([
            "collect",
            project.path().to_str().unwrap(),
            "index.js",
            "--ignore",
            "b.js",
        ])
        .assert()
        .success()
        .stdout("a.js\n");
}

#[test]
fn collect_no_imports_prints_nothing() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());

    importcrawl(home.path())
        .args([
            "collect",
            project.path().to_str().unwrap(),
            "index.js",
            "--no-imports",
        ])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn collect_reads_project_config_and_ignore_file() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());
    write(project.path(), ".importcrawl.toml", "[imports]\nmax_depth = 5\n");
    write(project.path(), ".importcrawlignore", "# skip the tail\nc.js\n");

    importcrawl(home.path())
        .args(["collect", project.path().to_str().unwrap(), "index.js"])
        .assert()
        .success()
        .stdout("a.js\nb.js\n");
}

#[test]
fn collect_env_var_overrides_config() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());
    write(project.path(), ".importcrawl.toml", "[imports]\nmax_depth = 5\n");

    importcrawl(home.path())
        .env("IMPORTCRAWL_MAX_DEPTH", "1")
        .args(["collect", project.path().to_str().unwrap(), "index.js"])
        .assert()
        .success()
        .stdout("a.js\n");
}

#[test]
fn collect_mixed_languages() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let root = project.path();
    write(root, "app/main.py", "from .models import user\nimport os\n");
    write(root, "app/models/__init__.py", "");
    write(root, "app/models/user.py", "");
    write(root, "native/lib.c", "#include \"./lib.h\"\n#include <stdio.h>\n");
    write(root, "native/lib.h", "");
    write(root, "src/lib.rs", "mod parser;\n");
    write(root, "src/parser.rs", "use super::lib;\n");

    importcrawl(home.path())
        .args([
            "collect",
            root.to_str().unwrap(),
            "app/main.py",
            "native/lib.c",
            "src/lib.rs",
        ])
        .assert()
        .success()
        .stdout("app/models/user.py\nnative/lib.h\nsrc/parser.rs\n");
}

#[test]
fn collect_syntax_tree_strategy() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let root = project.path();
    write(
        root,
        "main.py",
        "DOC = \"\"\"\nimport fake\n\"\"\"\nfrom pkg.helper import func\n",
    );
    write(root, "pkg/__init__.py", "");
    write(root, "pkg/helper.py", "");
    write(root, "fake.py", "");

    importcrawl(home.path())
        .args([
            "collect",
            root.to_str().unwrap(),
            "main.py",
            "--strategy",
            "syntax-tree",
        ])
        .assert()
        .success()
        .stdout("pkg/helper.py\n");
}

#[test]
fn collect_invalid_root_fails() {
    let home = tempfile::tempdir().unwrap();
    importcrawl(home.path())
        .args(["collect", "/nonexistent/project/root", "index.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid path: /nonexistent/project/root",
        ));
}

#[test]
fn collect_invalid_ignore_pattern_fails() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());

    importcrawl(home.path())
        .args([
            "collect",
            project.path().to_str().unwrap(),
            "index.js",
            "--ignore",
            "[unclosed",
        ])
        .assert()
        .failure();
}

#[test]
fn collect_zero_depth_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    js_chain(project.path());

    importcrawl(home.path())
        .args([
            "collect",
            project.path().to_str().unwrap(),
            "index.js",
            "--max-depth",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_depth must be at least 1"));
}
