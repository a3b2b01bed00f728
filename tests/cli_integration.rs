//! Integration tests for the lockdir CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts are bypassed through the `LOCKDIR_PASSWORD` and
//! `LOCKDIR_RECOVERY_KEY` environment variables, which is also how the
//! tool is meant to be scripted.

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "CorrectHorse1234";

/// Helper: get a Command pointing at the lockdir binary.
fn lockdir() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("lockdir").expect("binary should exist")
}

/// Helper: a lockdir invocation with the password preset in the
/// environment, rooted at `vault_dir`.
fn lockdir_at(vault_dir: &std::path::Path) -> Command {
    let mut cmd = lockdir();
    cmd.env("LOCKDIR_PASSWORD", PASSWORD)
        .env_remove("LOCKDIR_RECOVERY_KEY")
        .args(["--vault", vault_dir.to_str().unwrap()]);
    cmd
}

/// Pull the dash-grouped recovery key out of `init` output.
fn find_recovery_key(output: &str) -> String {
    output
        .split_whitespace()
        .find(|tok| tok.len() == 71 && tok.split('-').count() == 8)
        .expect("init output should contain the recovery key")
        .to_string()
}

// ---------------------------------------------------------------------------
// Basic CLI surface
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    lockdir()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Encrypt a directory's files behind a password",
        ))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("drop"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("clear"))
        .stdout(predicate::str::contains("recover"));
}

#[test]
fn version_flag_shows_version() {
    lockdir()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockdir"));
}

#[test]
fn no_args_shows_help() {
    lockdir()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_on_missing_vault_fails() {
    let tmp = TempDir::new().unwrap();

    lockdir_at(tmp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vault not found"));
}

#[test]
fn completions_bash_generates_script() {
    lockdir()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockdir"));
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_vault_and_prints_recovery_key() {
    let tmp = TempDir::new().unwrap();

    let assert = lockdir_at(tmp.path()).arg("init").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    assert!(tmp.path().join(".lockdir").is_dir());
    let key = find_recovery_key(&stdout);
    assert_eq!(key.len(), 71);
}

#[test]
fn init_encrypts_preexisting_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "hello vault").unwrap();

    lockdir_at(tmp.path()).arg("init").assert().success();

    // Plaintext is gone, but the vault lists it.
    assert!(!tmp.path().join("notes.txt").exists());
    lockdir_at(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"));
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();

    lockdir_at(tmp.path()).arg("init").assert().success();
    lockdir_at(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already"));
}

#[test]
fn init_rejects_short_password() {
    let tmp = TempDir::new().unwrap();

    lockdir()
        .env("LOCKDIR_PASSWORD", "short")
        .args(["--vault", tmp.path().to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least"));
}

// ---------------------------------------------------------------------------
// Add / list / extract / remove through the binary
// ---------------------------------------------------------------------------

#[test]
fn add_list_extract_flow() {
    let tmp = TempDir::new().unwrap();
    lockdir_at(tmp.path()).arg("init").assert().success();

    // Add a file from outside the vault root.
    let src = TempDir::new().unwrap();
    let src_file = src.path().join("report.txt");
    fs::write(&src_file, "quarterly numbers").unwrap();

    lockdir_at(tmp.path())
        .args(["add", src_file.to_str().unwrap()])
        .assert()
        .success();

    // `add` securely deletes the original.
    assert!(!src_file.exists());

    lockdir_at(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("report.txt"));

    // Fuzzy extraction into a fresh directory.
    let out = TempDir::new().unwrap();
    lockdir_at(tmp.path())
        .args(["extract", "report", "--out", out.path().to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.path().join("report.txt")).unwrap(),
        "quarterly numbers"
    );
}

#[test]
fn wrong_password_is_rejected() {
    let tmp = TempDir::new().unwrap();
    lockdir_at(tmp.path()).arg("init").assert().success();

    lockdir()
        .env("LOCKDIR_PASSWORD", "NotThePassword1")
        .args(["--vault", tmp.path().to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password"));
}

#[test]
fn remove_takes_file_out_of_listing() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("gone.txt"), "bye").unwrap();
    lockdir_at(tmp.path()).arg("init").assert().success();

    lockdir_at(tmp.path())
        .args(["remove", "gone.txt"])
        .assert()
        .success();

    lockdir_at(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("gone.txt").not());
}

#[test]
fn clear_with_force_empties_vault() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "a").unwrap();
    fs::write(tmp.path().join("b.txt"), "b").unwrap();
    lockdir_at(tmp.path()).arg("init").assert().success();

    lockdir_at(tmp.path())
        .args(["clear", "--force"])
        .assert()
        .success();

    lockdir_at(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt").not());
}

#[test]
fn drop_extracts_and_removes() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("doc.txt"), "contents").unwrap();
    lockdir_at(tmp.path()).arg("init").assert().success();

    let out = TempDir::new().unwrap();
    lockdir_at(tmp.path())
        .args(["drop", "doc", "--out", out.path().to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.path().join("doc.txt")).unwrap(),
        "contents"
    );
    lockdir_at(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("doc.txt").not());
}

// ---------------------------------------------------------------------------
// Recovery path
// ---------------------------------------------------------------------------

#[test]
fn recover_list_with_key_from_init_output() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("secret.txt"), "classified").unwrap();

    let assert = lockdir_at(tmp.path()).arg("init").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let key = find_recovery_key(&stdout);

    // No password in the environment: recovery key alone must work.
    lockdir()
        .env_remove("LOCKDIR_PASSWORD")
        .env("LOCKDIR_RECOVERY_KEY", &key)
        .args(["--vault", tmp.path().to_str().unwrap(), "recover", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secret.txt"));
}

#[test]
fn recover_extract_with_key_flag() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("secret.txt"), "classified").unwrap();

    let assert = lockdir_at(tmp.path()).arg("init").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let key = find_recovery_key(&stdout);

    let out = TempDir::new().unwrap();
    lockdir()
        .env_remove("LOCKDIR_PASSWORD")
        .env_remove("LOCKDIR_RECOVERY_KEY")
        .args([
            "--vault",
            tmp.path().to_str().unwrap(),
            "recover",
            "extract",
            "secret",
            "--out",
            out.path().to_str().unwrap(),
            "--key",
            &key,
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.path().join("secret.txt")).unwrap(),
        "classified"
    );
}

#[test]
fn recover_with_bad_key_fails() {
    let tmp = TempDir::new().unwrap();
    lockdir_at(tmp.path()).arg("init").assert().success();

    lockdir()
        .env_remove("LOCKDIR_PASSWORD")
        .env("LOCKDIR_RECOVERY_KEY", "not-a-real-key")
        .args(["--vault", tmp.path().to_str().unwrap(), "recover", "list"])
        .assert()
        .failure();
}
