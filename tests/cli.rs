//! CLI surface tests: argument handling and early failure paths.
//!
//! These run the real binary but never reach the deployment tools; every
//! scenario fails (or exits) before the first external command.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn requires_a_product_name() {
    Command::cargo_bin("qtpack")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn help_describes_the_packager() {
    Command::cargo_bin("qtpack")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("platform-specific distributable artifact"));
}

#[test]
fn rejects_a_name_with_path_separators() {
    Command::cargo_bin("qtpack")
        .unwrap()
        .args(["--name", "../evil"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path separators"));
}

#[test]
fn fails_cleanly_without_a_version_file() {
    let tmp = tempfile::tempdir().unwrap();

    Command::cargo_bin("qtpack")
        .unwrap()
        .args(["--name", "Procyon", "--project-dir"])
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("version file"));

    // A failed run leaves no output directory behind.
    assert!(!tmp.path().join("out").exists());
}
