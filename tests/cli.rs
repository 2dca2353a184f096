//! CLI integration tests for the chirpy binary.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chirpy").expect("failed to find binary");
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("JWT_SECRET")
        .env_remove("POLKA_APIKEY");
    cmd
}

#[test]
fn test_help_lists_serve() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_requires_jwt_secret() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["serve", "--port", "0", "--data-dir", "data"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JWT_SECRET must be set"));

    // nothing is created before configuration is valid
    assert!(!dir.path().join("data").exists());
}

#[test]
fn test_serve_rejects_bad_host() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("JWT_SECRET", "cli-test-secret")
        .args(["serve", "--host", "not a host", "--data-dir", "data"])
        .assert()
        .failure();

    // stores are opened before the address is parsed
    assert!(dir.path().join("data/users.json").exists());
    assert!(dir.path().join("data/chirps.json").exists());
}
