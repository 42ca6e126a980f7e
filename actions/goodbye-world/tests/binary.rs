#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn goodbye_world() -> Command {
    let mut cmd = Command::cargo_bin("goodbye-world").unwrap();
    cmd.env_clear();
    cmd
}

#[test]
fn writes_date_and_message_to_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("github_output");
    std::fs::write(&output, "").unwrap();

    goodbye_world()
        .env("INPUT_WHO-TO-FAREWELL", "Test User")
        .env("GITHUB_OUTPUT", &output)
        .assert()
        .success()
        .stdout("Goodbye Test User!\n");

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("date<<ghadelimiter_"));
    assert!(lines[3].starts_with("message<<ghadelimiter_"));
    assert_eq!(lines[4], "Farewell Test User, until we meet again!");
}

#[test]
fn falls_back_to_set_output_command() {
    goodbye_world()
        .env("INPUT_WHO-TO-FAREWELL", "Mona")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::set-output name=message::Farewell Mona, until we meet again!",
        ));
}

#[test]
fn empty_input_still_says_farewell() {
    goodbye_world()
        .env("INPUT_WHO-TO-FAREWELL", "")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Goodbye !\n"))
        .stdout(predicate::str::contains(
            "::set-output name=message::Farewell , until we meet again!",
        ))
        .stdout(predicate::str::contains("::error::").not());
}

#[cfg(unix)]
#[test]
fn non_utf8_environment_is_tolerated() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    goodbye_world()
        .env("INPUT_WHO-TO-FAREWELL", "Mona")
        .env("UNRELATED", OsStr::from_bytes(b"\xff\xfe"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye Mona!"))
        .stdout(predicate::str::contains("::set-output name=date::"));
}

#[test]
fn missing_output_file_fails() {
    let dir = TempDir::new().unwrap();
    goodbye_world()
        .env("INPUT_WHO-TO-FAREWELL", "Mona")
        .env("GITHUB_OUTPUT", dir.path().join("absent"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("::error::Missing file at path"));
}
