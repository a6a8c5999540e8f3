//! End-to-end tests driving the `syllabus` binary.

mod common;

use common::TestContext;
use predicates::prelude::*;

#[test]
fn test_init_writes_config_and_modules_dir() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(ctx.tree.path("modules").is_dir());
    let config = ctx.tree.read(".syllabus/config.yaml").unwrap();
    assert!(config.contains("preambles:"));
}

#[test]
fn test_init_keeps_existing_config() {
    let ctx = TestContext::new();
    ctx.tree.file(".syllabus/config.yaml", "style:\n  preserve_headings: true\n");

    ctx.command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("kept"));

    assert_eq!(
        ctx.tree.read(".syllabus/config.yaml").unwrap(),
        "style:\n  preserve_headings: true\n"
    );
}

#[test]
fn test_module_then_list() {
    let ctx = TestContext::with_dirs(&["001-Arrays"]);

    ctx.command()
        .args(["module", "linked lists"])
        .assert()
        .success()
        .stdout(predicate::str::contains("002-Linked-Lists"));

    let output = ctx
        .command()
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["modules"][1]["name"], "Linked Lists");
    assert_eq!(value["modules"][1]["ordinal"], 2);
}

#[test]
fn test_duplicate_module_fails() {
    let ctx = TestContext::with_dirs(&["001-Linked-Lists"]);

    ctx.command()
        .args(["module", "linked_lists"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("module already exists"));
}

#[test]
fn test_add_with_flags() {
    let ctx = TestContext::new();

    ctx.command()
        .args(["add", "--module", "Arrays", "--topic", "Intro", "--topic", "searching"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 2 of 2 topic(s) in Arrays"));

    assert_eq!(
        ctx.tree.children("modules/001-Arrays"),
        vec!["001-Intro", "002-Searching"]
    );
    assert_eq!(ctx.tree.children("modules/001-Arrays/002-Searching").len(), 6);
}

#[test]
fn test_add_interactive_from_piped_answers() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("add")
        .write_stdin("1\nArrays\n2\nTraversal\nSearching\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 2 of 2"))
        .stderr(predicate::str::contains("Topic Name?"));

    assert_eq!(
        ctx.tree.children("modules/001-Arrays"),
        vec!["001-Traversal", "002-Searching"]
    );
}

#[test]
fn test_add_cancelled_partway_reports_progress() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("add")
        .write_stdin("1\nArrays\n3\nTraversal\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 1 of 3"))
        .stdout(predicate::str::contains("Cancelled"));

    assert_eq!(ctx.tree.children("modules/001-Arrays"), vec!["001-Traversal"]);
}

#[test]
fn test_add_cancelled_before_count_exits_130() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("add")
        .write_stdin("1\nArrays\n")
        .assert()
        .code(130);

    assert!(ctx.tree.children("modules").is_empty());
}

#[test]
fn test_add_rejects_bad_count() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("add")
        .write_stdin("1\nArrays\nthree\n")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("must be a number"));

    assert!(ctx.tree.children("modules").is_empty());
}

#[test]
fn test_adhere_json_report() {
    let ctx = TestContext::with_dirs(&["003-graphs/004-bfs", "007-trees"]);

    let output = ctx
        .command()
        .args(["adhere", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["modules"], 2);
    assert_eq!(report["populated"], 1);
    assert_eq!(report["cumulative"], 1);
    assert_eq!(ctx.tree.children("modules"), vec!["001-Graphs", "002-Trees"]);
    assert!(ctx.tree.path("modules/001-Graphs/001-Bfs/Cumulative.md").is_file());
}

#[test]
fn test_root_flag_and_missing_root() {
    let ctx = TestContext::new();
    let other = TestContext::with_dirs(&["001-Arrays"]);

    ctx.command()
        .args(["list", "--root"])
        .arg(other.tree.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Arrays"));

    ctx.command()
        .args(["list", "--root", "does/not/exist"])
        .assert()
        .code(3);
}

#[test]
fn test_bad_config_exits_2() {
    let ctx = TestContext::new();
    ctx.tree.file(".syllabus/config.yaml", "watch:\n  channel_capacity: 0\n");

    ctx.command().arg("list").assert().code(2);
}
