//! CLI smoke tests for wareplan.
//!
//! These tests verify that every subcommand runs against small JSON fixtures and
//! returns appropriate exit codes.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the wareplan binary.
fn wareplan_cmd() -> Command {
  cargo_bin_cmd!("wareplan")
}

/// Write `content` to `name` inside a fresh temp directory.
fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join(name);
  std::fs::write(&path, content).unwrap();
  (temp, path)
}

/// A two-step pipeline with a nested module in the middle.
const MODULE: &str = r#"{
  "imports": {
    "base": "catalog:publishing.group/base:v2018:bin-linux-amd64"
  },
  "steps": {
    "stepC": {
      "operation": {
        "inputs": { "base": "/", "stepB.barred": "/bar" },
        "action": { "exec": ["/bar/thinger"] },
        "outputs": { "final": "/bar" }
      }
    },
    "stepB": {
      "module": {
        "imports": { "wodget": "parent:stepA.intermediate" },
        "steps": {
          "op": {
            "operation": {
              "inputs": { "wodget": "/src" },
              "action": { "exec": ["/bin/tool"] },
              "outputs": { "intermediate": "/out" }
            }
          }
        },
        "exports": { "barred": "op.intermediate" }
      }
    },
    "stepA": {
      "operation": {
        "inputs": { "base": "/" },
        "action": { "exec": ["/bin/true"] },
        "outputs": { "intermediate": "/out" }
      }
    }
  }
}"#;

/// Two steps that each depend on the other.
const CYCLIC_MODULE: &str = r#"{
  "steps": {
    "a": { "operation": { "inputs": { "b.out": "/in" }, "outputs": { "out": "/out" } } },
    "b": { "operation": { "inputs": { "a.out": "/in" }, "outputs": { "out": "/out" } } }
  }
}"#;

const FORMULA: &str = r#"{
  "inputs": { "/": "tar:6q7G4hWr283FpTa5Lf8heVqw9t97b5VoMU6AGszuBYAz9EzQdeHVFAou7c4W9vFcQ6", "/src": "git:f00f" },
  "action": { "exec": ["/bin/echo", "hello"], "env": { "B": "2", "A": "1" } },
  "outputs": { "/out": { "packtype": "tar" } }
}"#;

/// The same formula with every map written in a different order.
const FORMULA_REORDERED: &str = r#"{
  "outputs": { "/out": { "packtype": "tar" } },
  "action": { "env": { "A": "1", "B": "2" }, "exec": ["/bin/echo", "hello"] },
  "inputs": { "/src": "git:f00f", "/": "tar:6q7G4hWr283FpTa5Lf8heVqw9t97b5VoMU6AGszuBYAz9EzQdeHVFAou7c4W9vFcQ6" }
}"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  wareplan_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage: wareplan"));
}

#[test]
fn version_flag_works() {
  wareplan_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("wareplan"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["order", "hash", "filter"] {
    wareplan_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// order
// =============================================================================

#[test]
fn order_prints_dependencies_first() {
  let (_temp, path) = temp_file("module.json", MODULE);

  wareplan_cmd()
    .arg("order")
    .arg(&path)
    .arg("--format")
    .arg("json")
    .assert()
    .success()
    .stdout(predicate::str::is_match(r#"(?s)"stepA".*"stepB".*"stepC""#).unwrap());
}

#[test]
fn order_deep_expands_submodules() {
  let (_temp, path) = temp_file("module.json", MODULE);

  wareplan_cmd()
    .arg("order")
    .arg(&path)
    .arg("--deep")
    .assert()
    .success()
    .stdout(predicate::str::contains("stepB.op"))
    .stdout(predicate::str::contains("stepB\n").not());
}

#[test]
fn order_rejects_cycles() {
  let (_temp, path) = temp_file("module.json", CYCLIC_MODULE);

  wareplan_cmd()
    .arg("order")
    .arg(&path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to order module"))
    .stderr(predicate::str::contains("loop detected"));
}

#[test]
fn order_nonexistent_module_fails() {
  wareplan_cmd()
    .arg("order")
    .arg("/nonexistent/path/module.json")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to read module"));
}

#[test]
fn order_malformed_json_fails() {
  let (_temp, path) = temp_file("module.json", "{ not json");

  wareplan_cmd()
    .arg("order")
    .arg(&path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to parse module"));
}

// =============================================================================
// hash
// =============================================================================

#[test]
fn hash_is_independent_of_key_order() {
  let (_a, first) = temp_file("a.json", FORMULA);
  let (_b, second) = temp_file("b.json", FORMULA_REORDERED);

  let out_a = wareplan_cmd().arg("hash").arg(&first).assert().success().get_output().stdout.clone();
  let out_b = wareplan_cmd().arg("hash").arg(&second).assert().success().get_output().stdout.clone();

  assert_eq!(out_a, out_b);
  let hash = String::from_utf8(out_a).unwrap();
  assert!(!hash.trim().is_empty());
  assert!(!hash.trim().contains(' '));
}

#[test]
fn hash_changes_with_formula() {
  let (_a, first) = temp_file("a.json", FORMULA);
  let (_b, second) = temp_file("b.json", &FORMULA.replace("hello", "goodbye"));

  let out_a = wareplan_cmd().arg("hash").arg(&first).assert().success().get_output().stdout.clone();
  let out_b = wareplan_cmd().arg("hash").arg(&second).assert().success().get_output().stdout.clone();

  assert_ne!(out_a, out_b);
}

// =============================================================================
// filter
// =============================================================================

#[test]
fn filter_layers_over_preset() {
  wareplan_cmd()
    .args(["filter", "pack", "uid=1000", "--preset", "lossless"])
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "uid=1000,gid=keep,mtime=keep,sticky=keep,setid=keep,dev=keep",
    ))
    .stdout(predicate::str::contains("complete: yes"));
}

#[test]
fn filter_partial_warns_incomplete() {
  wareplan_cmd()
    .args(["filter", "pack", "mtime=2010-01-01T00:00:00Z"])
    .assert()
    .success()
    .stdout(predicate::str::contains("mtime=@1262304000"))
    .stdout(predicate::str::contains("complete: no"))
    .stderr(predicate::str::contains("incomplete"));
}

#[test]
fn filter_unpack_reports_altering_as_json() {
  wareplan_cmd()
    .args(["filter", "unpack", "", "--preset", "lowpriv", "--format", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""complete": true"#))
    .stdout(predicate::str::contains(r#""altering": true"#));
}

#[test]
fn filter_unknown_key_fails() {
  wareplan_cmd()
    .args(["filter", "pack", "bogus=1"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown option"));
}

#[test]
fn filter_unknown_preset_fails() {
  wareplan_cmd()
    .args(["filter", "unpack", "", "--preset", "reckless"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("reckless"));
}
