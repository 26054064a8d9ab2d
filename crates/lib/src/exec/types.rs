//! Error type shared by the executor, the decoders and the engine.

use std::time::Duration;

use thiserror::Error;

/// Failures surfaced to callers. Nothing is retried or recovered inside this crate.
#[derive(Debug, Error)]
pub enum NixError {
  /// The child exited non-zero. `stderr` is the engine's own diagnostic, kept verbatim.
  #[error("command `{command}` failed with exit code {code:?}:\n{stderr}")]
  Execution {
    command: String,
    code: Option<i32>,
    stderr: String,
  },

  /// The binary could not be started at all.
  #[error("failed to spawn `{program}`")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The child was killed after running longer than the configured timeout.
  #[error("command `{command}` timed out after {after:?}")]
  TimedOut { command: String, after: Duration },

  /// Output did not match the expected JSON shape.
  #[error("unable to decode output for installable '{installable}'")]
  Decode {
    installable: String,
    #[source]
    source: serde_json::Error,
  },

  /// The subcommand resolved the installable to nothing.
  #[error("no result for installable '{installable}'")]
  NotFound { installable: String },

  /// The subcommand resolved the installable to several targets.
  #[error("more than one result for installable '{installable}' ({count} found)")]
  Ambiguous { installable: String, count: usize },

  /// The remote existence probe failed for a reason other than a missing path.
  #[error("unable to check whether '{installable}' exists in {store}:\n{stderr}")]
  RemoteProbe {
    installable: String,
    store: String,
    stderr: String,
  },
}

impl NixError {
  /// Captured stderr for failures that carry one.
  pub fn stderr(&self) -> Option<&str> {
    match self {
      NixError::Execution { stderr, .. } | NixError::RemoteProbe { stderr, .. } => Some(stderr),
      _ => None,
    }
  }
}
