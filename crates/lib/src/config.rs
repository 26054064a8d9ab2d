//! Runner configuration.
//!
//! `NixConfig` describes how the `nix` binary is spawned and is read once from the
//! environment. `TransportOptions` travels with each copy call instead of being set
//! on the process, so concurrent calls never observe each other's options.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::consts::{DEFAULT_NIX_PROGRAM, SSH_OPTS_ENV};

/// Overrides the binary used for every invocation.
pub const NIX_PROGRAM_ENV: &str = "NIXSTATE_NIX";

/// Per-invocation timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "NIXSTATE_TIMEOUT";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{var} must be a positive number of seconds, got '{value}'")]
  InvalidTimeout { var: &'static str, value: String },

  #[error("{0} is set but empty")]
  EmptyProgram(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NixConfig {
  /// The `nix` executable, resolved through `PATH` when not absolute.
  pub program: PathBuf,
  /// Kill the child and fail when an invocation runs longer than this.
  pub timeout: Option<Duration>,
}

impl Default for NixConfig {
  fn default() -> Self {
    Self {
      program: PathBuf::from(DEFAULT_NIX_PROGRAM),
      timeout: None,
    }
  }
}

impl NixConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if let Ok(program) = std::env::var(NIX_PROGRAM_ENV) {
      if program.trim().is_empty() {
        return Err(ConfigError::EmptyProgram(NIX_PROGRAM_ENV));
      }
      config.program = PathBuf::from(program);
    }

    if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
      let secs = raw
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::InvalidTimeout {
          var: TIMEOUT_ENV,
          value: raw.clone(),
        })?;
      config.timeout = Some(Duration::from_secs(secs));
    }

    Ok(config)
  }

  pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
    self.program = program.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }
}

/// Connection options for remote (SSH) stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
  /// Raw ssh arguments, e.g. `-o StrictHostKeyChecking=no`.
  pub ssh_options: Vec<String>,
}

impl TransportOptions {
  pub fn ssh(options: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      ssh_options: options.into_iter().map(Into::into).collect(),
    }
  }

  /// Environment overlay for the child process; empty when no option is set.
  pub fn env(&self) -> Vec<(String, String)> {
    if self.ssh_options.is_empty() {
      return Vec::new();
    }
    vec![(SSH_OPTS_ENV.to_string(), self.ssh_options.join(" "))]
  }
}
