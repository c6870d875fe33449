use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::{tempdir, TempDir};

fn setup_repo() -> TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::create_dir_all(root.join("node_modules/auth")).unwrap();
    fs::write(root.join("src/auth.rs"), "pub fn login() {}\n").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();
    fs::write(root.join("docs/zoom.md"), "recording link\n").unwrap();
    fs::write(root.join("node_modules/auth/index.js"), "login()\n").unwrap();
    temp
}

#[allow(deprecated)]
fn smart_find(workdir: &std::path::Path, oracle_mode: &str, stub: &str) -> Command {
    let mut cmd = Command::cargo_bin("smart-find").expect("binary");
    cmd.current_dir(workdir)
        .env("SMART_FIND_ORACLE_MODE", oracle_mode)
        .env("SMART_FIND_ORACLE_STUB", stub)
        .env_remove("SMART_FIND_ORACLE_CMD")
        .env_remove("SMART_FIND_ORACLE_TIMEOUT_SECS")
        .env_remove("SMART_FIND_COMMAND_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn empty_query_prints_usage_and_fails() {
    let temp = setup_repo();
    smart_find(temp.path(), "off", "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: smart-find"));

    smart_find(temp.path(), "off", "")
        .args(["   ", "--fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: smart-find"));
}

#[test]
fn semantic_pick_is_listed_and_hallucinations_dropped() {
    let temp = setup_repo();
    smart_find(
        temp.path(),
        "stub",
        "src/auth.rs\nsrc/invented.rs\nnode_modules/auth/index.js\n",
    )
    .args(["--list", "where", "do", "users", "log", "in"])
    .assert()
    .success()
    .stdout("src/auth.rs\n");
}

#[test]
fn json_envelope_reports_full_strategy() {
    let temp = setup_repo();
    let body = json_output(
        smart_find(temp.path(), "stub", "docs/zoom.md\n").args(["--json", "zoom recording"]),
    );
    assert_eq!(body["strategy"], "full");
    assert_eq!(body["mode"], "full");
    assert_eq!(body["query"], "zoom recording");
    assert_eq!(body["results"], serde_json::json!(["docs/zoom.md"]));
    assert_eq!(body["semantic_hits"], 1);
    assert_eq!(body["programmatic_hits"], 0);
    assert!(body.get("command").is_none());
}

#[test]
fn full_mode_reports_final_count_on_stderr() {
    let temp = setup_repo();
    smart_find(temp.path(), "stub", "docs/zoom.md\n")
        .args(["zoom", "recording"])
        .assert()
        .success()
        .stdout("docs/zoom.md\n")
        .stderr(predicate::str::contains("Final ranked: 1 files"));
}

#[test]
fn fast_mode_without_oracle_finds_nothing() {
    let temp = setup_repo();
    let body = json_output(
        smart_find(temp.path(), "off", "").args(["--fast", "--json", "authentication code"]),
    );
    assert_eq!(body["strategy"], "fast");
    assert_eq!(body["results"], serde_json::json!([]));

    smart_find(temp.path(), "off", "")
        .args(["-f", "authentication", "code"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn fast_mode_ignores_semantic_picks() {
    let temp = setup_repo();
    // The stub answer is a valid listing pick but not a command.
    smart_find(temp.path(), "stub", "src/auth.rs\n")
        .args(["--fast", "--list", "login", "handler"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn instant_pattern_reports_fd_command() {
    let temp = setup_repo();
    let body = json_output(smart_find(temp.path(), "off", "").args(["--json", "*.rs"]));
    assert_eq!(body["strategy"], "instant");
    let command = body["command"].as_str().expect("command");
    assert!(command.starts_with("fd -e rs -t f -E node_modules"), "{command}");
    assert!(body.get("semantic_hits").is_none());
}

#[test]
fn keyword_rule_reports_rule_strategy() {
    let temp = setup_repo();
    let body = json_output(
        smart_find(temp.path(), "off", "").args(["--json", "recent", "python", "scripts"]),
    );
    assert_eq!(body["strategy"], "rule");
    let command = body["command"].as_str().expect("command");
    assert!(command.starts_with("fd -t f --changed-within 7d"), "{command}");
}

#[test]
fn config_file_and_env_are_validated() {
    let temp = setup_repo();
    smart_find(temp.path(), "off", "")
        .args(["--config", "missing.toml", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));

    smart_find(temp.path(), "bogus", "")
        .arg("anything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported oracle mode"));

    fs::write(temp.path().join(".smart-find.toml"), "[search]\nrank_window = 0\n").unwrap();
    smart_find(temp.path(), "off", "")
        .arg("anything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("rank_window"));
}
