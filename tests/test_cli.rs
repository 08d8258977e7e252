//! Integration tests for the bashly binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PAGE: &str = "NAME\n       grep - print lines that match patterns\n\nOPTIONS\n       -i, --ignore-case\n              Ignore case distinctions.\n\n       -r, --recursive\n              Read all files.\n\n";

fn bashly(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bashly").unwrap();
    // Keep a real ~/.bashly.toml out of the tests
    cmd.env("HOME", home.path()).env_remove("BASHLY_LOG");
    cmd
}

#[test]
fn test_locate_from_stdin() {
    let home = TempDir::new().unwrap();
    bashly(&home)
        .args(["locate", "-", "8"])
        .write_stdin("grep -i -r foo\n")
        .assert()
        .success()
        .stdout("grep -i -r\n");
}

#[test]
fn test_locate_from_file_as_json() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("build.sh");
    fs::write(&script, "make clean && make -j4 all\n").unwrap();

    bashly(&home)
        .args(["locate", script.to_str().unwrap(), "15", "--json"])
        .assert()
        .success()
        .stdout("{\"name\":\"make\",\"options\":[\"-j4\"]}\n");
}

#[test]
fn test_locate_nothing_exits_with_failure() {
    let home = TempDir::new().unwrap();
    bashly(&home)
        .args(["locate", "-", "5"])
        .write_stdin("ls # comment\n")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn test_locate_missing_file() {
    let home = TempDir::new().unwrap();
    bashly(&home)
        .args(["locate", "/nonexistent/script.sh", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_options_prints_manual_sections() {
    let home = TempDir::new().unwrap();
    let page = home.path().join("grep.1.txt");
    fs::write(&page, PAGE).unwrap();

    bashly(&home)
        .args(["options", "-", "0", "--page", page.to_str().unwrap()])
        .write_stdin("grep -r --ignore-case x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Read all files."))
        .stdout(predicate::str::contains("Ignore case distinctions."));
}

#[test]
fn test_bad_arguments() {
    let home = TempDir::new().unwrap();
    bashly(&home)
        .args(["locate", "-", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid offset"));
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    fs::write(&config, "hint = 3\n").unwrap();

    bashly(&home)
        .args(["--config", config.to_str().unwrap(), "locate", "-", "0"])
        .write_stdin("ls\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_log_directory_receives_trace() {
    let home = TempDir::new().unwrap();
    let logs = home.path().join("logs");
    let config = home.path().join(".bashly.toml");
    fs::write(
        &config,
        format!("log_directory = {:?}\nlog_level = \"bashly=trace\"\n", logs.to_str().unwrap()),
    )
    .unwrap();

    bashly(&home)
        .args(["locate", "-", "0"])
        .write_stdin("ls\n")
        .assert()
        .success()
        .stdout("ls\n");

    let log = fs::read_to_string(logs.join("bashly.log")).unwrap();
    assert!(log.contains("collected command"));
}

#[test]
fn test_help_and_version() {
    let home = TempDir::new().unwrap();
    bashly(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bashly locate"));
    bashly(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bashly-"));
}
