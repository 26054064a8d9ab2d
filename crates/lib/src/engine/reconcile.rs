//! Reconciliation policy.
//!
//! Composes the engine primitives into desired-state convergence:
//! - `ensure`: reuse a realized path, build only when the store lacks it
//! - `refresh`: check that a recorded artifact is still present
//! - `converge`: bring a recorded artifact in line with the desired installable
//!
//! Reads are validity-first: a recorded artifact is rebuilt only when one of its
//! recorded paths is no longer valid. Rebuilds are always full builds.

use serde::Serialize;
use tracing::{debug, info};

use crate::artifact::{ArtifactPath, ArtifactRecord, Validity};
use crate::consts::INVALID_PATH_MARKER;
use crate::engine::{Engine, GC_NOTICE};
use crate::exec::{NixError, Runner};

/// Outcome of [`Engine::ensure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ensured {
  pub path: ArtifactPath,
  /// `false` when the store already held a valid path and no build ran.
  pub built: bool,
}

/// Outcome of [`Engine::refresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
  Current(ArtifactRecord),
  RebuildRequired { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
  /// Nothing was recorded; the installable was realized.
  Created,
  /// The recorded artifact is still valid.
  Unchanged,
  /// The recorded artifact went missing and was rebuilt.
  Rebuilt,
  /// The desired installable differs from the recorded one.
  Replaced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Converged {
  pub record: ArtifactRecord,
  pub change: Change,
}

impl Converged {
  pub fn changed(&self) -> bool {
    self.change != Change::Unchanged
  }
}

/// Outcome of [`Engine::inspect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
  pub valid: bool,
  pub path: ArtifactPath,
}

/// Outcome of [`Engine::remove`]. `notice` must be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
  pub deleted: Option<String>,
  pub notice: &'static str,
}

impl<R: Runner> Engine<R> {
  /// Probe a path, mapping "the store has no record of it" to `None`.
  ///
  /// `path-info` exits non-zero for paths it does not know, so execution failures
  /// count as a missing record. Decoding problems still propagate.
  async fn probe(&self, installable: &str) -> Result<Option<Validity>, NixError> {
    match self.check_validity(installable).await {
      Ok(validity) => Ok(Some(validity)),
      Err(err @ (NixError::NotFound { .. } | NixError::Execution { .. })) => {
        debug!(installable, error = %err, "no store record");
        Ok(None)
      }
      Err(err) => Err(err),
    }
  }

  /// Whether a recorded path is still valid. Empty paths are not probed.
  ///
  /// Only a missing result or the store's own "not valid" diagnostic count as
  /// invalid; any other failure propagates instead of triggering a rebuild.
  async fn is_valid(&self, path: &str) -> Result<bool, NixError> {
    if path.is_empty() {
      return Ok(true);
    }
    match self.check_validity(path).await {
      Ok(validity) => Ok(validity.valid),
      Err(NixError::NotFound { .. }) => Ok(false),
      Err(NixError::Execution { stderr, .. }) if stderr.contains(INVALID_PATH_MARKER) => {
        debug!(path, "store reports path as not valid");
        Ok(false)
      }
      Err(err) => Err(err),
    }
  }

  /// Make sure the installable is realized, building only when needed.
  pub async fn ensure(&self, installable: &str) -> Result<Ensured, NixError> {
    if let Some(validity) = self.probe(installable).await? {
      if validity.valid {
        debug!(installable, path = %validity.path, "already realized");
        return Ok(Ensured {
          path: validity.path,
          built: false,
        });
      }
      debug!(installable, "store record present but content missing");
    }

    let path = self.build(installable).await?;
    Ok(Ensured { path, built: true })
  }

  /// Build the installable and record it together with its target system.
  pub async fn realize(&self, installable: &str) -> Result<ArtifactRecord, NixError> {
    let path = self.build(installable).await?;

    let system = if path.drv_path.is_empty() {
      String::new()
    } else {
      self.describe(&path.drv_path).await?.system
    };

    Ok(ArtifactRecord::new(installable, path, system))
  }

  /// Check that both recorded paths are still valid.
  ///
  /// The derivation and output probes run concurrently and are independent.
  pub async fn refresh(&self, record: &ArtifactRecord) -> Result<Refresh, NixError> {
    if record.path().is_empty() {
      return Ok(Refresh::RebuildRequired {
        reason: "no path recorded".to_string(),
      });
    }

    let (drv_valid, output_valid) =
      tokio::try_join!(self.is_valid(&record.drv_path), self.is_valid(&record.output_path))?;

    if !drv_valid {
      return Ok(Refresh::RebuildRequired {
        reason: format!("derivation {} is no longer valid", record.drv_path),
      });
    }
    if !output_valid {
      return Ok(Refresh::RebuildRequired {
        reason: format!("output {} is no longer valid", record.output_path),
      });
    }

    Ok(Refresh::Current(record.clone()))
  }

  /// Converge a possibly stale record towards the desired installable.
  pub async fn converge(&self, installable: &str, recorded: Option<&ArtifactRecord>) -> Result<Converged, NixError> {
    let change = match recorded {
      None => Change::Created,
      Some(record) if record.installable != installable => {
        info!(from = %record.installable, to = installable, "installable changed");
        Change::Replaced
      }
      Some(record) => match self.refresh(record).await? {
        Refresh::Current(record) => {
          return Ok(Converged {
            record,
            change: Change::Unchanged,
          });
        }
        Refresh::RebuildRequired { reason } => {
          info!(installable, %reason, "rebuild required");
          Change::Rebuilt
        }
      },
    };

    let record = self.realize(installable).await?;
    Ok(Converged { record, change })
  }

  /// Report whether the installable is realized, describing it when it is not.
  pub async fn inspect(&self, installable: &str) -> Result<Inspection, NixError> {
    if let Some(validity) = self.probe(installable).await?
      && validity.valid
    {
      return Ok(Inspection {
        valid: true,
        path: validity.path,
      });
    }

    let artifact = self.describe(installable).await?;
    Ok(Inspection {
      valid: false,
      path: artifact.path,
    })
  }

  /// Delete the recorded output (or the derivation when no output was recorded).
  pub async fn remove(&self, record: &ArtifactRecord) -> Result<Removal, NixError> {
    let target = [&record.output_path, &record.drv_path]
      .into_iter()
      .find(|path| !path.is_empty())
      .cloned();

    if let Some(target) = &target {
      self.delete(target).await?;
    }

    Ok(Removal {
      deleted: target,
      notice: GC_NOTICE,
    })
  }
}
