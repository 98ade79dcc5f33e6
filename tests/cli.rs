#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn jsonkv() -> Command {
    let mut cmd = Command::cargo_bin("jsonkv").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

// `jsonkv -V` should print the version
#[test]
fn cli_version() {
    jsonkv()
        .args(["-V"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// `jsonkv a b` should error
#[test]
fn cli_extra_args() {
    jsonkv().args(["a.json", "b.json"]).assert().failure();
}

#[test]
fn cli_exit_on_end_of_input() {
    jsonkv()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye"));
}

#[test]
fn cli_preloads_file_argument() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(&path, r#"{"a": "x", "b": "x", "c": "y"}"#).unwrap();

    jsonkv()
        .arg(&path)
        .write_stdin("4\n7\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Loaded 3 keys")
                .and(predicate::str::contains("Duplicate value: x: Keys: [a, b]")),
        );
}

#[test]
fn cli_bad_file_argument_starts_unloaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.txt");
    fs::write(&path, "{}").unwrap();

    jsonkv()
        .arg(&path)
        .write_stdin("search\nexit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains(".json extension")
                .and(predicate::str::contains("Load a JSON file first!")),
        );
}

#[test]
fn cli_full_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(&path, r#"{"greeting": "Hello"}"#).unwrap();

    let script = format!(
        "load\n{}\nadd\nfarewell\nGoodbye, hello!\nsearch\nHELLO\nremove\ngreeting\nexit\n",
        path.display()
    );
    jsonkv()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Key added successfully!")
                .and(predicate::str::contains("🔑 greeting: Hello"))
                .and(predicate::str::contains("🔑 farewell: Goodbye, hello!"))
                .and(predicate::str::contains("Key removed successfully!")),
        );

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n  \"farewell\": \"Goodbye, hello!\"\n}"
    );
}
