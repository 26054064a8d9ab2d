//! `eval`, `build`, `describe`, `path-info`, `ensure` and `inspect`.

use predicates::prelude::*;

use super::common::{DRV, HELLO, OUT, TestEnv};

#[test]
fn eval_prints_strings_raw() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["eval", "nixpkgs#hello.version"])
    .assert()
    .success()
    .stdout("2.12.1\n");
}

#[test]
fn eval_json_keeps_quotes() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["-o", "json", "eval", "nixpkgs#hello.version", "--apply", "v: v"])
    .assert()
    .success()
    .stdout("\"2.12.1\"\n");
}

#[test]
fn build_reports_paths() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["build", HELLO])
    .assert()
    .success()
    .stdout(predicate::str::contains(OUT).and(predicate::str::contains(DRV)));

  assert!(env.is_realized());
}

#[test]
fn describe_does_not_build() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["describe", HELLO, "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""system": "x86_64-linux""#));

  assert_eq!(env.count("build"), 0);
}

#[test]
fn path_info_of_missing_path_fails_with_stderr() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["path-info", HELLO])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not valid"));
}

#[test]
fn path_info_of_realized_path() {
  let env = TestEnv::new().realized();

  env
    .cmd()
    .args(["path-info", HELLO, "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""valid": true"#));
}

#[test]
fn ensure_builds_then_reuses() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["ensure", HELLO, "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""built": true"#));

  env
    .cmd()
    .args(["ensure", HELLO, "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""built": false"#));

  assert_eq!(env.count("build"), 1);
}

#[test]
fn inspect_describes_missing_output() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["inspect", HELLO])
    .assert()
    .success()
    .stdout(predicate::str::contains("not realized").and(predicate::str::contains(OUT)));

  assert!(!env.is_realized());
}
