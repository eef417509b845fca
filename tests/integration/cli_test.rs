//! Integration tests for the CLI binary.

use assert_cmd::Command;
use predicates::prelude::*;

use super::helpers::temp_preset;

fn tgm() -> Command {
    Command::cargo_bin("tgm").expect("binary builds")
}

#[test]
fn init_writes_demo_preset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.json");

    tgm()
        .arg("init")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote demo preset"));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("typingMsPerChar"));
    assert!(raw.contains("cat index.js"));
}

#[test]
fn init_refuses_existing_file() {
    let (_dir, path) = temp_preset("{}");

    tgm()
        .arg("init")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let (_dir, path) = temp_preset("old contents");

    tgm().arg("init").arg(&path).arg("--force").assert().success();
}

#[test]
fn export_gif_rejects_missing_preset() {
    tgm()
        .args(["export", "gif", "/nonexistent/preset.json", "-o", "/dev/null"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load preset"));
}

#[test]
fn export_gif_rejects_non_object_preset() {
    let (_dir, path) = temp_preset("[1, 2, 3]");

    tgm()
        .arg("export")
        .arg("gif")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn preview_requires_a_tty() {
    tgm()
        .arg("preview")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn completions_emit_script() {
    tgm()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tgm"));
}

#[test]
fn help_lists_subcommands() {
    tgm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("init"));
}
