//! End-to-end tests for CLI exit codes.
//!
//! - Exit code 0: success, including batches in which some items failed
//! - Exit code 1: a failure that stopped the command as a whole
//! - Exit code 2: invalid command-line usage (handled by clap)

mod common;
use common::prelude::*;

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("repohome");

    cmd.arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("clone"))
        .stdout(predicate::str::contains("rebuild"));
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("repohome");

    cmd.arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("repohome"));
}

/// Exit code 2 is returned for an unknown subcommand.
#[test]
fn test_exit_code_unknown_subcommand() {
    let mut cmd = cargo_bin_cmd!("repohome");

    cmd.arg("frobnicate").assert().code(2);
}

/// Exit code 2 is returned when a required argument is missing.
#[test]
fn test_exit_code_missing_argument() {
    let fixture = TestFixture::new();

    fixture.command().arg("clone").assert().code(2);
    fixture.command().arg("remove").assert().code(2);
    fixture.command().arg("each").assert().code(2);
}

/// Exit code 1 is returned for an unreadable index.
#[test]
fn test_exit_code_corrupt_index() {
    let fixture = TestFixture::new();
    fixture
        .child("state/repositories.json")
        .write_str("{ not json")
        .unwrap();

    fixture
        .command()
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Repository index"))
        .stderr(predicate::str::contains("hint: Run 'repohome rebuild'"));
}

/// Exit code 1 is returned when removing something outside the root.
#[test]
fn test_exit_code_remove_outside_root() {
    let fixture = TestFixture::new();
    let outside = fixture.child("elsewhere/repo");
    outside.child(".git").create_dir_all().unwrap();

    fixture
        .command()
        .arg("remove")
        .arg("--yes")
        .arg(outside.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not inside the root directory"));

    assert!(outside.path().exists());
}

/// Exit code 0 is returned when one of several URLs cannot be parsed.
#[test]
fn test_exit_code_clone_batch_with_bad_url() {
    let fixture = TestFixture::new().with_repo("example.com/a/b");

    fixture
        .command()
        .arg("clone")
        .arg("definitely not a url")
        .arg("https://example.com/a/b.git")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("definitely not a url"))
        .stderr(predicate::str::contains("1 failed"));

    // the valid URL pointed at an existing repository, which got registered
    assert_eq!(
        fixture.index_entries(),
        vec![fixture.root().join("example.com/a/b")]
    );
}

/// Exit code 1 is returned when rebuilding with a missing root.
#[test]
fn test_exit_code_rebuild_missing_root() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("--root")
        .arg(fixture.path().join("missing"))
        .arg("rebuild")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Root directory does not exist"));
}
