//! Command execution.
//!
//! Invocations are built as argument lists, never as shell strings, and each
//! subcommand only receives the flags its builder knows about.

pub mod process;
pub mod types;

use std::future::Future;

use crate::consts::LOCK_FILE_FLAGS;

pub use process::NixCli;
pub use types::NixError;

/// The `nix` subcommands this crate drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
  Eval,
  Build,
  DerivationShow,
  PathInfo,
  Copy,
  StoreDelete,
}

impl Subcommand {
  pub fn words(self) -> &'static [&'static str] {
    match self {
      Subcommand::Eval => &["eval"],
      Subcommand::Build => &["build"],
      Subcommand::DerivationShow => &["derivation", "show"],
      Subcommand::PathInfo => &["path-info"],
      Subcommand::Copy => &["copy"],
      Subcommand::StoreDelete => &["store", "delete"],
    }
  }

  /// Whether the subcommand can change the store.
  pub fn is_mutating(self) -> bool {
    matches!(self, Subcommand::Build | Subcommand::Copy | Subcommand::StoreDelete)
  }
}

/// One structured call to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub subcommand: Subcommand,
  pub args: Vec<String>,
  /// Overlaid on the inherited environment of the child.
  pub env: Vec<(String, String)>,
}

impl Invocation {
  pub fn new(subcommand: Subcommand) -> Self {
    Self {
      subcommand,
      args: Vec::new(),
      env: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  /// Appends `flag value` as two separate arguments.
  pub fn opt(self, flag: &str, value: impl Into<String>) -> Self {
    self.arg(flag).arg(value)
  }

  pub fn envs(mut self, env: impl IntoIterator<Item = (String, String)>) -> Self {
    self.env.extend(env);
    self
  }

  /// Arguments following the program name.
  pub fn argv(&self) -> Vec<String> {
    self
      .subcommand
      .words()
      .iter()
      .chain(LOCK_FILE_FLAGS.iter())
      .map(|s| s.to_string())
      .chain(self.args.iter().cloned())
      .collect()
  }

  /// Human-readable command line for logs and error messages.
  pub fn command_line(&self, program: &str) -> String {
    std::iter::once(program.to_string())
      .chain(self.argv())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// Runs an invocation and returns its stdout.
///
/// Implementations must fail with [`NixError::Execution`] on a non-zero exit and must not
/// leave the child running when the returned future is dropped.
pub trait Runner: Send + Sync {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<Vec<u8>, NixError>> + Send;
}
