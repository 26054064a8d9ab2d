//! Store artifact identities.
//!
//! Every value here is decoded fresh from a `nix` invocation. The store is the only
//! source of truth, so nothing is cached between calls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The derivation file and primary output of a build.
///
/// Either side may be empty: an evaluated-only artifact has no output yet, and a
/// plain source path has no deriver. When both are set they belong to the same build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactPath {
  pub drv_path: String,
  pub output_path: String,
}

impl ArtifactPath {
  pub fn new(drv_path: impl Into<String>, output_path: impl Into<String>) -> Self {
    Self {
      drv_path: drv_path.into(),
      output_path: output_path.into(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.drv_path.is_empty() && self.output_path.is_empty()
  }
}

impl fmt::Display for ArtifactPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.drv_path.is_empty(), self.output_path.is_empty()) {
      (false, false) => write!(f, "{} -> {}", self.drv_path, self.output_path),
      (false, true) => write!(f, "{}", self.drv_path),
      (true, false) => write!(f, "{}", self.output_path),
      (true, true) => write!(f, "<empty>"),
    }
  }
}

/// A described derivation: its paths plus name and target system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
  pub name: String,
  /// Platform double the derivation builds for, e.g. `x86_64-linux`.
  pub system: String,
  #[serde(flatten)]
  pub path: ArtifactPath,
}

impl From<Artifact> for ArtifactPath {
  fn from(artifact: Artifact) -> Self {
    artifact.path
  }
}

/// Result of a `path-info` probe.
///
/// `valid == false` is not an error: the store holds a record for the path but its
/// content is gone (typically garbage collected).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
  pub valid: bool,
  pub path: ArtifactPath,
}

/// The identity persisted by a caller between reconciliation passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
  pub installable: String,
  pub drv_path: String,
  pub output_path: String,
  #[serde(default)]
  pub system: String,
}

impl ArtifactRecord {
  pub fn new(installable: impl Into<String>, path: ArtifactPath, system: impl Into<String>) -> Self {
    Self {
      installable: installable.into(),
      drv_path: path.drv_path,
      output_path: path.output_path,
      system: system.into(),
    }
  }

  pub fn path(&self) -> ArtifactPath {
    ArtifactPath::new(&self.drv_path, &self.output_path)
  }
}
