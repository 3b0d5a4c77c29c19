#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn zk_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin("zk"));
    cmd.env_remove("ZK_LOG").env("NO_COLOR", "1");
    cmd
}

fn zettelkasten() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".zk-root"), "").unwrap();
    temp
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_version() {
    zk_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ZK Version: "));
}

#[test]
fn test_no_command_prints_usage_and_exits_2() {
    zk_cmd()
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("mv"));
}

#[test]
fn test_unknown_command_prints_usage_and_exits_2() {
    zk_cmd()
        .arg("frobnicate")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_help_exits_cleanly() {
    zk_cmd().arg("--help").assert().success();
}

#[test]
fn test_mv_without_both_paths_prints_mv_usage() {
    let zk = zettelkasten();
    zk_cmd()
        .current_dir(zk.path())
        .args(["mv", "a.html"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("zk mv usage:"));
}

#[test]
fn test_mv_rewrites_exact_links() {
    let zk = zettelkasten();
    let root = zk.path();
    write(root, "a.html", "<p>A</p>");
    write(root, "index.html", r#"<a href="a.html">A</a>"#);

    zk_cmd()
        .current_dir(root)
        .args(["mv", "a.html", "b.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved a.html to b.html"));

    assert!(!root.join("a.html").exists());
    assert_eq!(read(root, "b.html"), "<p>A</p>");
    let index = read(root, "index.html");
    assert!(index.contains(r#"href="b.html""#));
    assert!(index.ends_with(">A</a>"));
}

#[test]
fn test_mv_rewrites_directory_form_links() {
    let zk = zettelkasten();
    let root = zk.path();
    write(root, "notes/index.html", "<p>notes</p>");
    fs::create_dir_all(root.join("archive")).unwrap();
    write(
        root,
        "index.html",
        r#"<a href="notes">n</a><a href="notes/index.html">n</a>"#,
    );

    zk_cmd()
        .current_dir(root)
        .args(["mv", "notes/index.html", "archive/index.html"])
        .assert()
        .success();

    assert!(root.join("archive/index.html").exists());
    let index = read(root, "index.html");
    assert_eq!(index.matches(r#"href="archive""#).count(), 2);
    assert!(!index.contains("notes"));
}

#[test]
fn test_mv_rewrites_pretty_links() {
    let zk = zettelkasten();
    let root = zk.path();
    write(root, "x/y.html", "<p>y</p>");
    write(root, "page.html", r#"<a href="x/y">pretty</a>"#);

    zk_cmd()
        .current_dir(root)
        .args(["mv", "x/y.html", "x/z.html"])
        .assert()
        .success();

    let page = read(root, "page.html");
    assert!(page.contains(r#"href="x/z""#));
    assert!(!page.contains(r#"href="x/y""#));
}

#[test]
fn test_mv_from_subdirectory_resolves_relative_paths() {
    let zk = zettelkasten();
    let root = zk.path();
    write(root, "notes/a.html", "<p>a</p>");
    write(root, "index.html", r#"<a href="notes/a.html">a</a>"#);

    zk_cmd()
        .current_dir(root.join("notes"))
        .args(["mv", "a.html", "b.html"])
        .assert()
        .success();

    assert!(root.join("notes/b.html").exists());
    assert!(read(root, "index.html").contains(r#"href="notes/b.html""#));
}

#[test]
fn test_mv_missing_source_fails() {
    let zk = zettelkasten();
    zk_cmd()
        .current_dir(zk.path())
        .args(["mv", "ghost.html", "b.html"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_mv_onto_existing_destination_fails_without_changes() {
    let zk = zettelkasten();
    let root = zk.path();
    write(root, "a.html", "<p>a</p>");
    write(root, "b.html", "<p>b</p>");
    write(root, "index.html", r#"<a href="a.html">a</a>"#);

    zk_cmd()
        .current_dir(root)
        .args(["mv", "a.html", "b.html"])
        .assert()
        .code(1);

    assert_eq!(read(root, "b.html"), "<p>b</p>");
    assert_eq!(read(root, "index.html"), r#"<a href="a.html">a</a>"#);
}

#[test]
fn test_mv_dry_run_changes_nothing() {
    let zk = zettelkasten();
    let root = zk.path();
    write(root, "a.html", "<p>a</p>");
    write(root, "index.html", r#"<a href="a.html">a</a>"#);

    zk_cmd()
        .current_dir(root)
        .args(["mv", "--dry-run", "a.html", "b.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update index.html"))
        .stdout(predicate::str::contains("Would move a.html to b.html"));

    assert!(root.join("a.html").exists());
    assert!(!root.join("b.html").exists());
    assert_eq!(read(root, "index.html"), r#"<a href="a.html">a</a>"#);
}

#[test]
fn test_mv_outside_any_zettelkasten_fails() {
    let temp = TempDir::new().unwrap();
    if temp.path().ancestors().any(|a| a.join(".zk-root").exists()) {
        return;
    }
    write(temp.path(), "a.html", "<p>a</p>");

    zk_cmd()
        .current_dir(temp.path())
        .args(["mv", "a.html", "b.html"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    assert!(temp.path().join("a.html").exists());
}

#[test]
fn test_init_then_mv() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("kasten");
    fs::create_dir_all(&root).unwrap();

    zk_cmd()
        .current_dir(temp.path())
        .args(["init", "kasten"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized zettelkasten"));
    assert!(root.join(".zk-root").exists());

    zk_cmd()
        .current_dir(&root)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));

    write(&root, "a.html", "<p>a</p>");
    write(&root, "index.html", r#"<a href="a.html">a</a>"#);
    zk_cmd()
        .current_dir(&root)
        .args(["move", "a.html", "b.html"])
        .assert()
        .success();
    assert!(read(&root, "index.html").contains(r#"href="b.html""#));
}

#[test]
fn test_serve_without_root_fails() {
    let temp = TempDir::new().unwrap();
    if temp.path().ancestors().any(|a| a.join(".zk-root").exists()) {
        return;
    }

    zk_cmd()
        .current_dir(temp.path())
        .args(["serve", "--port", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
