//! `copy` and `remote-exists`.

use predicates::prelude::*;

use super::common::{OUT, TestEnv};

const REMOTE: &str = "ssh://deploy@10.1.2.3";

#[test]
fn copy_passes_flags_and_ssh_options() {
  let env = TestEnv::new().with_copy(r#"echo "$NIX_SSHOPTS" > "$(dirname "$0")/ssh.log""#);

  env
    .cmd()
    .args(["copy", OUT, "--to", REMOTE, "--no-check-sigs", "--ssh-option", "-p 2222"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Copied"));

  let ssh = std::fs::read_to_string(env.temp.path().join("ssh.log")).unwrap();
  assert_eq!(ssh.trim(), "-p 2222");
  assert_eq!(env.count("copy --no-update-lock-file --no-write-lock-file"), 1);
}

#[test]
fn remote_exists_true() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["remote-exists", OUT, "--store", REMOTE, "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""exists": true"#));
}

#[test]
fn remote_missing_is_reported_not_failed() {
  let env = TestEnv::new().with_copy(
    r#"echo "error: path is required, but there is no substituter that can build it" >&2; exit 1"#,
  );

  env
    .cmd()
    .args(["remote-exists", OUT, "--store", REMOTE, "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""exists": false"#));
}

#[test]
fn remote_probe_failure_fails() {
  let env = TestEnv::new().with_copy(r#"echo "error: cannot connect to 'deploy@10.1.2.3'" >&2; exit 1"#);

  env
    .cmd()
    .args(["remote-exists", OUT, "--store", REMOTE])
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot connect"));
}
