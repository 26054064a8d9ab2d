//! Process-backed runner.
//!
//! Spawns the configured `nix` binary directly (no intermediate shell) with the
//! invocation's argv, inherits the parent environment and overlays the invocation env.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::NixConfig;
use crate::exec::{Invocation, NixError, Runner};

/// Runner that executes the real `nix` command line.
#[derive(Debug, Clone, Default)]
pub struct NixCli {
  config: NixConfig,
}

impl NixCli {
  pub fn new(config: NixConfig) -> Self {
    Self { config }
  }

  fn program(&self) -> String {
    self.config.program.to_string_lossy().into_owned()
  }
}

impl Runner for NixCli {
  /// Run the invocation to completion.
  ///
  /// stdout and stderr are captured separately. On a non-zero exit stdout is dropped
  /// and stderr is returned verbatim inside [`NixError::Execution`]. The child is
  /// killed when the returned future is dropped or the configured timeout elapses.
  async fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, NixError> {
    let program = self.program();
    let command_line = invocation.command_line(&program);

    if invocation.subcommand.is_mutating() {
      info!(command = %command_line, "running nix");
    } else {
      debug!(command = %command_line, "running nix");
    }

    let mut command = Command::new(&self.config.program);
    command
      .args(invocation.argv())
      .envs(invocation.env.iter().map(|(key, value)| (key, value)))
      .stdin(Stdio::null())
      .kill_on_drop(true);

    let output = match self.config.timeout {
      Some(after) => tokio::time::timeout(after, command.output())
        .await
        .map_err(|_| NixError::TimedOut {
          command: command_line.clone(),
          after,
        })?,
      None => command.output().await,
    }
    .map_err(|source| NixError::Spawn {
      program: program.clone(),
      source,
    })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
      debug!(command = %command_line, code = ?output.status.code(), "nix exited with failure");

      return Err(NixError::Execution {
        command: command_line,
        code: output.status.code(),
        stderr,
      });
    }

    debug!(bytes = output.stdout.len(), "nix output captured");

    Ok(output.stdout)
  }
}
