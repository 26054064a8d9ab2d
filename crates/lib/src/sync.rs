//! Copying closures between stores.
//!
//! Copies are never cached: remote stores change out of band, so every call runs
//! `nix copy` again.

use tracing::{debug, info};

use crate::config::TransportOptions;
use crate::consts::MISSING_SUBSTITUTER_MARKER;
use crate::engine::Engine;
use crate::exec::{Invocation, NixError, Runner, Subcommand};

/// A request to copy the closure of `installable` from one store to another.
///
/// Unset stores fall back to the engine's configured default store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyRequest {
  pub installable: String,
  pub from: Option<String>,
  pub to: Option<String>,
  /// Only `Some(false)` disables signature checks.
  pub check_sigs: Option<bool>,
  /// Only `Some(true)` lets the destination substitute paths itself.
  pub substitute_on_destination: Option<bool>,
  pub transport: TransportOptions,
}

impl CopyRequest {
  pub fn new(installable: impl Into<String>) -> Self {
    Self {
      installable: installable.into(),
      ..Self::default()
    }
  }

  pub fn invocation(&self) -> Invocation {
    let mut invocation = Invocation::new(Subcommand::Copy).arg(&self.installable);

    if let Some(from) = &self.from {
      invocation = invocation.opt("--from", from);
    }
    if let Some(to) = &self.to {
      invocation = invocation.opt("--to", to);
    }
    if self.check_sigs == Some(false) {
      invocation = invocation.arg("--no-check-sigs");
    }
    if self.substitute_on_destination == Some(true) {
      invocation = invocation.arg("--substitute-on-destination");
    }

    invocation.envs(self.transport.env())
  }
}

fn remote_probe_invocation(installable: &str, store: &str, transport: &TransportOptions) -> Invocation {
  Invocation::new(Subcommand::Copy)
    .arg("--offline")
    .opt("--from", store)
    .opt("--to", store)
    .arg(installable)
    .envs(transport.env())
}

impl<R: Runner> Engine<R> {
  /// Copy the closure described by `request`.
  pub async fn copy(&self, request: &CopyRequest) -> Result<(), NixError> {
    info!(
      installable = %request.installable,
      from = request.from.as_deref().unwrap_or("<default>"),
      to = request.to.as_deref().unwrap_or("<default>"),
      "copying closure"
    );
    self.run(request.invocation()).await?;
    Ok(())
  }

  /// Best-effort check that `installable` exists in `store`.
  ///
  /// Runs an offline copy from the store onto itself. Success means the path exists;
  /// a failure mentioning the missing substituter means it does not. This relies on
  /// the wording of Nix's diagnostics; see [`MISSING_SUBSTITUTER_MARKER`].
  pub async fn remote_store_path_exists(
    &self,
    installable: &str,
    store: &str,
    transport: &TransportOptions,
  ) -> Result<bool, NixError> {
    match self.run(remote_probe_invocation(installable, store, transport)).await {
      Ok(_) => Ok(true),
      Err(NixError::Execution { stderr, .. }) if stderr.contains(MISSING_SUBSTITUTER_MARKER) => {
        debug!(installable, store, "path missing from remote store");
        Ok(false)
      }
      Err(NixError::Execution { stderr, .. }) => Err(NixError::RemoteProbe {
        installable: installable.to_string(),
        store: store.to_string(),
        stderr,
      }),
      Err(err) => Err(err),
    }
  }

  /// Copy again unconditionally. Prior copy results are never reused.
  pub async fn replicate(&self, request: &CopyRequest) -> Result<(), NixError> {
    self.copy(request).await
  }

  /// Whether a previous copy is still present at its destination.
  ///
  /// Without a destination the default store is probed through `path-info`.
  pub async fn refresh_copy(&self, request: &CopyRequest) -> Result<bool, NixError> {
    match &request.to {
      Some(store) => {
        self
          .remote_store_path_exists(&request.installable, store, &request.transport)
          .await
      }
      None => Ok(self.check_validity(&request.installable).await?.valid),
    }
  }
}
