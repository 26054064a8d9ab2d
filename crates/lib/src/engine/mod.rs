//! Resolution engine.
//!
//! Each primitive is one invocation plus the matching decoder. The engine holds no
//! state besides its runner: every call re-reads the store.

pub mod reconcile;

use serde_json::Value;
use tracing::{info, warn};

use crate::artifact::{Artifact, ArtifactPath, Validity};
use crate::config::NixConfig;
use crate::decode::{decode_build, decode_derivation, decode_eval, decode_path_info};
use crate::exec::{Invocation, NixCli, NixError, Runner, Subcommand};

pub use reconcile::{Change, Converged, Ensured, Inspection, Refresh, Removal};

/// Warning callers must relay after a delete.
pub const GC_NOTICE: &str = "deleting a store path does not reclaim dependencies that are now unreferenced; \
   run nix-collect-garbage if needed";

#[derive(Debug, Clone, Default)]
pub struct Engine<R = NixCli> {
  runner: R,
}

impl Engine<NixCli> {
  pub fn from_config(config: NixConfig) -> Self {
    Self::new(NixCli::new(config))
  }
}

impl<R: Runner> Engine<R> {
  pub fn new(runner: R) -> Self {
    Self { runner }
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  pub(crate) async fn run(&self, invocation: Invocation) -> Result<Vec<u8>, NixError> {
    self.runner.run(&invocation).await
  }

  /// Evaluate an installable to JSON, optionally through an `--apply` function.
  pub async fn evaluate(&self, installable: &str, apply: Option<&str>) -> Result<Value, NixError> {
    let mut invocation = Invocation::new(Subcommand::Eval).arg(installable).arg("--json");
    if let Some(apply) = apply {
      invocation = invocation.opt("--apply", apply);
    }

    let stdout = self.run(invocation).await?;
    decode_eval(installable, &stdout)
  }

  /// Build the installable, or fetch it when it already names a store path.
  ///
  /// Potentially slow and always potentially mutating.
  pub async fn build(&self, installable: &str) -> Result<ArtifactPath, NixError> {
    info!(installable, "building");

    let stdout = self
      .run(
        Invocation::new(Subcommand::Build)
          .arg("--no-link")
          .arg("--json")
          .arg(installable),
      )
      .await?;

    let path = decode_build(installable, &stdout)?;
    info!(installable, drv = %path.drv_path, out = %path.output_path, "built");
    Ok(path)
  }

  /// Read-only description of the derivation behind an installable. Never builds.
  pub async fn describe(&self, installable: &str) -> Result<Artifact, NixError> {
    let stdout = self
      .run(Invocation::new(Subcommand::DerivationShow).arg(installable))
      .await?;
    decode_derivation(installable, &stdout)
  }

  /// Read-only probe of whether the installable is realized in the local store.
  pub async fn check_validity(&self, installable: &str) -> Result<Validity, NixError> {
    let stdout = self
      .run(Invocation::new(Subcommand::PathInfo).arg("--json").arg(installable))
      .await?;
    decode_path_info(installable, &stdout)
  }

  /// Remove a path from the store.
  ///
  /// Only the given path is deleted; see [`GC_NOTICE`].
  pub async fn delete(&self, installable: &str) -> Result<(), NixError> {
    info!(installable, "deleting store path");
    self
      .run(Invocation::new(Subcommand::StoreDelete).arg(installable))
      .await?;
    warn!(installable, "{}", GC_NOTICE);
    Ok(())
  }
}
