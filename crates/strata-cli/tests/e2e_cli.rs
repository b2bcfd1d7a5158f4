//! E2E tests for the `strata` binary.
//!
//! Covers file and stdin input, every subcommand in text and JSON modes,
//! config-file precedence, and error reporting for cyclic or malformed input.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LARGE_DAG: &str = "\
# two sources, one sink
x -> a
x -> b
y -> b
y -> c
y -> d
a -> h
b -> h
b -> f
c -> e
d -> f
e -> f
f -> g
g -> j
h -> i
h -> j
i -> k
j -> k
";

fn strata_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("strata"));
    cmd.current_dir(dir);
    cmd.env("STRATA_LOG", "error");
    cmd.env_remove("STRATA_LEVEL_STRATEGY");
    cmd.env("FORMAT", "text");
    cmd
}

fn write_graph(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write edge list");
    path
}

fn json_output(dir: &Path, args: &[&str]) -> Value {
    let output = strata_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// topo
// ---------------------------------------------------------------------------

#[test]
fn topo_text_from_file() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", LARGE_DAG);

    strata_cmd(dir.path())
        .args(["topo", "deps.txt"])
        .assert()
        .success()
        .stdout("y\nd\nc\ne\nx\nb\nf\ng\na\nh\nj\ni\nk\n");
}

#[test]
fn topo_reads_stdin() {
    let dir = TempDir::new().expect("temp dir");

    strata_cmd(dir.path())
        .args(["topo", "-"])
        .write_stdin("x a\ny a\na b\nb c\n")
        .assert()
        .success()
        .stdout("y\nx\na\nb\nc\n");
}

#[test]
fn topo_json_order() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "x -> a\na -> b\ny -> c\nc -> d\n");

    let json = json_output(dir.path(), &["topo", "deps.txt"]);
    assert_eq!(json["order"], serde_json::json!(["y", "c", "d", "x", "a", "b"]));
}

#[test]
fn topo_cyclic_fails_with_code() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "x -> a\na -> x\n");

    strata_cmd(dir.path())
        .args(["topo", "deps.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2002]"))
        .stderr(predicate::str::contains("x -> a -> x"));
}

#[test]
fn topo_cyclic_json_error_object() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> b\nb -> b\n");

    let output = strata_cmd(dir.path())
        .args(["topo", "deps.txt", "--format", "json"])
        .output()
        .expect("command should not crash");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    // The JSON object comes first; the trailing line is the process error.
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut stream = serde_json::Deserializer::from_str(&stderr).into_iter::<Value>();
    let error = stream
        .next()
        .expect("error object")
        .expect("valid JSON error");
    assert_eq!(error["error"]["error_code"], "E2002");
}

// ---------------------------------------------------------------------------
// levels
// ---------------------------------------------------------------------------

#[test]
fn levels_text_all_nodes() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> x\na -> b\nb -> c\nc -> d\n");

    strata_cmd(dir.path())
        .args(["levels", "deps.txt"])
        .assert()
        .success()
        .stdout("a 0\nx 1\nb 1\nc 2\nd 3\n");
}

#[test]
fn levels_single_node_both_strategies() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", LARGE_DAG);

    for strategy in ["relaxation", "longest-path"] {
        let json = json_output(
            dir.path(),
            &["levels", "deps.txt", "--node", "k", "--strategy", strategy],
        );
        assert_eq!(json["strategy"], strategy);
        assert_eq!(json["levels"], serde_json::json!([{"node": "k", "level": 6}]));
    }
}

#[test]
fn levels_strategy_from_config_and_env() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> b\n");
    std::fs::write(
        dir.path().join("strata.toml"),
        "[analysis]\nlevel_strategy = \"relaxation\"\n",
    )
    .expect("write config");

    let json = json_output(dir.path(), &["levels", "deps.txt"]);
    assert_eq!(json["strategy"], "relaxation");

    let output = strata_cmd(dir.path())
        .env("STRATA_LEVEL_STRATEGY", "longest-path")
        .args(["levels", "deps.txt", "--json"])
        .output()
        .expect("command should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["strategy"], "longest-path");
}

#[test]
fn levels_invalid_env_strategy_fails() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> b\n");

    strata_cmd(dir.path())
        .env("STRATA_LEVEL_STRATEGY", "fastest")
        .args(["levels", "deps.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[invalid_strategy]"));
}

#[test]
fn levels_cyclic_fails() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "x -> a\na -> x\ny -> b\nb -> y\n");

    strata_cmd(dir.path())
        .args(["levels", "deps.txt", "--node", "y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no support for cyclic graphs"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_acyclic_succeeds() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", LARGE_DAG);

    strata_cmd(dir.path())
        .args(["check", "deps.txt"])
        .assert()
        .success()
        .stdout("is_dag true\n");
}

#[test]
fn check_cyclic_reports_cycle_and_fails() {
    let dir = TempDir::new().expect("temp dir");
    let mut cyclic = LARGE_DAG.to_string();
    cyclic.push_str("j -> a\n");
    write_graph(dir.path(), "deps.txt", &cyclic);

    strata_cmd(dir.path())
        .args(["check", "deps.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("is_dag false\ncycle "))
        .stderr(predicate::str::contains("graph contains a cycle"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_text_report() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "x -> a\na -> b\n");

    strata_cmd(dir.path())
        .args(["show", "deps.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "nodes     [x, a, b]\nedges     [x->a, a->b]\nsources   [x]\nsinks     [b]\nis_dag    true\ntopo_sort [x, a, b]\n",
        ))
        .stdout(predicate::str::contains("parents   'a': [x]"));
}

#[test]
fn show_json_report() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "x\na\n");

    let json = json_output(dir.path(), &["show", "deps.txt"]);
    assert_eq!(json["topo_sort"], serde_json::json!(["a", "x"]));
    assert_eq!(json["sources"], serde_json::json!(["x", "a"]));
    assert_eq!(json["is_dag"], true);
}

#[test]
fn config_output_format_applies_without_env() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> b\n");
    std::fs::write(dir.path().join("strata.toml"), "[output]\nformat = \"json\"\n")
        .expect("write config");

    let output = strata_cmd(dir.path())
        .env_remove("FORMAT")
        .args(["topo", "deps.txt"])
        .output()
        .expect("command should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["order"], serde_json::json!(["a", "b"]));
}

// ---------------------------------------------------------------------------
// input errors
// ---------------------------------------------------------------------------

#[test]
fn malformed_line_reports_line_number() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> b\nb c d\n");

    strata_cmd(dir.path())
        .args(["topo", "deps.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[invalid_input]"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().expect("temp dir");

    strata_cmd(dir.path())
        .args(["topo", "absent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> b\n");
    std::fs::write(dir.path().join("strata.toml"), "[analysis\n").expect("write config");

    strata_cmd(dir.path())
        .args(["topo", "deps.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[invalid_config]"))
        .stderr(predicate::str::contains("strata.toml"));
}

#[test]
fn invalid_config_json_error_object() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> b\n");
    std::fs::write(dir.path().join("strata.toml"), "[analysis\n").expect("write config");

    let output = strata_cmd(dir.path())
        .args(["topo", "deps.txt", "--json"])
        .output()
        .expect("command should not crash");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut stream = serde_json::Deserializer::from_str(&stderr).into_iter::<Value>();
    let error = stream
        .next()
        .expect("error object")
        .expect("valid JSON error");
    assert_eq!(error["error"]["error_code"], "invalid_config");
}

#[test]
fn unknown_config_format_warns_and_falls_back() {
    let dir = TempDir::new().expect("temp dir");
    write_graph(dir.path(), "deps.txt", "a -> b\n");
    std::fs::write(dir.path().join("strata.toml"), "[output]\nformat = \"yaml\"\n")
        .expect("write config");

    strata_cmd(dir.path())
        .env_remove("FORMAT")
        .env("STRATA_LOG", "warn")
        .args(["topo", "deps.txt"])
        .assert()
        .success()
        .stdout("a\nb\n")
        .stderr(predicate::str::contains("unknown [output] format"));
}
