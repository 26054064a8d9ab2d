//! Test utilities for nixstate-lib.
//!
//! `FakeRunner` answers invocations from canned replies and records every call.
//! `fake_nix` writes a shell script that stands in for the `nix` binary.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::exec::{Invocation, NixError, Runner, Subcommand};

#[derive(Debug, Clone)]
enum Reply {
  Stdout(String),
  Fail { code: i32, stderr: String },
}

#[derive(Debug, Default)]
pub struct FakeRunner {
  replies: Mutex<Vec<(Subcommand, String, Reply)>>,
  calls: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reply with `stdout` to `subcommand` calls whose arguments contain `target`.
  ///
  /// An empty target matches every call of that subcommand. Replies are not consumed.
  pub fn on(self, subcommand: Subcommand, target: &str, stdout: &str) -> Self {
    self.push(subcommand, target, Reply::Stdout(stdout.to_string()))
  }

  /// Fail `subcommand` calls matching `target` with exit code 1 and `stderr`.
  pub fn fail(self, subcommand: Subcommand, target: &str, stderr: &str) -> Self {
    self.push(
      subcommand,
      target,
      Reply::Fail {
        code: 1,
        stderr: stderr.to_string(),
      },
    )
  }

  fn push(self, subcommand: Subcommand, target: &str, reply: Reply) -> Self {
    self.replies.lock().unwrap().push((subcommand, target.to_string(), reply));
    self
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().clone()
  }

  pub fn count(&self, subcommand: Subcommand) -> usize {
    self.calls().iter().filter(|call| call.subcommand == subcommand).count()
  }
}

impl Runner for FakeRunner {
  async fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, NixError> {
    self.calls.lock().unwrap().push(invocation.clone());

    let reply = self
      .replies
      .lock()
      .unwrap()
      .iter()
      .find(|(subcommand, target, _)| {
        *subcommand == invocation.subcommand && (target.is_empty() || invocation.args.iter().any(|a| a == target))
      })
      .map(|(_, _, reply)| reply.clone());

    match reply {
      Some(Reply::Stdout(stdout)) => Ok(stdout.into_bytes()),
      Some(Reply::Fail { code, stderr }) => Err(NixError::Execution {
        command: invocation.command_line("nix"),
        code: Some(code),
        stderr,
      }),
      None => Err(NixError::Execution {
        command: invocation.command_line("nix"),
        code: Some(1),
        stderr: "fake runner: no reply configured".to_string(),
      }),
    }
  }
}

/// Write an executable `nix` script with the given body into `dir`.
#[cfg(unix)]
pub fn fake_nix(dir: &Path, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join("nix");
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

pub const HELLO: &str = "nixpkgs#hello";
pub const HELLO_DRV: &str = "/nix/store/qnavcbp5ydyd12asgz7rpr7is7hlswaz-hello-2.12.1.drv";
pub const HELLO_OUT: &str = "/nix/store/63l345l7dgcfz789w1y93j1540czafqh-hello-2.12.1";

/// `nix build --json` output for one derivation with an `out` output.
pub fn build_json(drv: &str, out: &str) -> String {
  format!(r#"[{{"drvPath":"{drv}","outputs":{{"out":"{out}"}},"startTime":1700000000,"stopTime":1700000042}}]"#)
}

/// `nix derivation show` output for one derivation with an `out` output.
pub fn derivation_json(drv: &str, out: &str, system: &str) -> String {
  format!(r#"{{"{drv}":{{"name":"hello-2.12.1","system":"{system}","outputs":{{"out":{{"path":"{out}"}}}}}}}}"#)
}

/// `nix path-info --json` output for one path.
pub fn path_info_json(deriver: &str, path: &str, valid: bool) -> String {
  format!(r#"[{{"deriver":"{deriver}","path":"{path}","valid":{valid}}}]"#)
}
