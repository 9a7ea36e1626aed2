mod common;

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use common::Fixture;

/// Run the binary inside `dir` with the libgit2 backend, feeding `stdin`
fn tagbump(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tagbump"))
        .args(args)
        .args(["--backend", "libgit2"])
        .current_dir(dir)
        .env_remove("TAGBUMP_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tagbump");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for tagbump")
}

fn tagged_fixture() -> Fixture {
    let mut fixture = Fixture::new();
    fixture.commit("initial commit");
    fixture.tag("v1.0.0");
    fixture.commit("second commit");
    fixture
}

#[test]
fn test_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_tagbump"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("tagbump"));
    assert!(stdout.contains("--push"));
}

#[test]
fn test_confirm_creates_tag() {
    let fixture = tagged_fixture();

    let output = tagbump(fixture.path(), &[], "y\n");

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("v1.0.1"));
    assert!(stdout.contains("second commit"));
    assert_eq!(fixture.tag_names(), vec!["v1.0.0", "v1.0.1"]);
}

#[test]
fn test_decline_exits_zero_without_tag() {
    let fixture = tagged_fixture();

    let output = tagbump(fixture.path(), &["minor"], "n\n");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cancelled"));
    assert_eq!(fixture.tag_names(), vec!["v1.0.0"]);
}

#[test]
fn test_invalid_bump_type_exits_one() {
    let fixture = tagged_fixture();

    let output = tagbump(fixture.path(), &["huge", "--yes"], "");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bump type"), "stderr: {}", stderr);
    assert_eq!(fixture.tag_names(), vec!["v1.0.0"]);
}

#[test]
fn test_uppercase_bump_type() {
    let fixture = tagged_fixture();

    let output = tagbump(fixture.path(), &["MAJOR", "--yes"], "");

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(fixture.tag_names(), vec!["v1.0.0", "v2.0.0"]);
}

#[test]
fn test_no_tags_uses_baseline() {
    let mut fixture = Fixture::new();
    fixture.commit("initial commit");

    let output = tagbump(fixture.path(), &["--yes"], "");

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(fixture.tag_names(), vec!["v0.0.1"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tags found"), "stdout: {}", stdout);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("WARNING"));
}

#[test]
fn test_no_new_commits_notice_goes_to_stdout() {
    let mut fixture = Fixture::new();
    fixture.commit("initial commit");
    fixture.tag("v1.0.0");

    let output = tagbump(fixture.path(), &["--yes", "--dry-run"], "");

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No changes since 'v1.0.0'"), "stdout: {}", stdout);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("No changes"));
}

#[test]
fn test_dry_run_creates_nothing() {
    let fixture = tagged_fixture();

    let output = tagbump(fixture.path(), &["--yes", "--dry-run"], "");

    assert!(output.status.success(), "{:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("v1.0.1"));
    assert_eq!(fixture.tag_names(), vec!["v1.0.0"]);
}

#[test]
fn test_push_failure_keeps_tag_and_exits_one() {
    let fixture = tagged_fixture();

    let output = tagbump(fixture.path(), &["--yes", "--push"], "");

    // No remote named origin in the fixture
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("git push origin v1.0.1"), "stdout: {}", stdout);
    assert_eq!(fixture.tag_names(), vec!["v1.0.0", "v1.0.1"]);
}

#[test]
fn test_local_config_file() {
    let fixture = tagged_fixture();
    fs::write(
        fixture.path().join("tagbump.toml"),
        "default_bump = \"minor\"\nconfirm = false\n",
    )
    .unwrap();

    let output = tagbump(fixture.path(), &[], "");

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(fixture.tag_names(), vec!["v1.0.0", "v1.1.0"]);
}

#[test]
fn test_repo_flag_finds_config_in_repo_dir() {
    let fixture = tagged_fixture();
    fs::write(
        fixture.path().join("tagbump.toml"),
        "default_bump = \"minor\"\nconfirm = false\n",
    )
    .unwrap();
    let elsewhere = tempfile::TempDir::new().unwrap();
    let repo = fixture.path().to_str().unwrap();

    let output = tagbump(elsewhere.path(), &["-C", repo], "");

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(fixture.tag_names(), vec!["v1.0.0", "v1.1.0"]);
}

#[test]
fn test_broken_config_file_exits_one() {
    let fixture = tagged_fixture();
    fs::write(fixture.path().join("tagbump.toml"), "timeout_secs = 0\n").unwrap();

    let output = tagbump(fixture.path(), &["--yes"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading config"));
    assert_eq!(fixture.tag_names(), vec!["v1.0.0"]);
}
