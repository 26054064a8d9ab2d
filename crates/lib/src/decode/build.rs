//! `nix build --no-link --json` output.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::artifact::ArtifactPath;
use crate::decode::{parse, select_output, single};
use crate::exec::NixError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuiltTarget {
  #[serde(default)]
  drv_path: Option<String>,
  #[serde(default)]
  outputs: HashMap<String, String>,
  /// Set instead of `drvPath`/`outputs` when the installable is an opaque store path.
  #[serde(default)]
  path: Option<String>,
  #[serde(default)]
  start_time: Option<u64>,
  #[serde(default)]
  stop_time: Option<u64>,
}

pub fn decode_build(installable: &str, stdout: &[u8]) -> Result<ArtifactPath, NixError> {
  let targets: Vec<BuiltTarget> = parse(installable, stdout)?;
  let target = single(installable, targets)?;

  if let (Some(start), Some(stop)) = (target.start_time, target.stop_time) {
    debug!(installable, seconds = stop.saturating_sub(start), "build finished");
  }

  let output = select_output(target.outputs.iter().map(|(name, path)| (name.as_str(), path.as_str())))
    .map(str::to_string)
    .or(target.path)
    .unwrap_or_default();

  Ok(ArtifactPath::new(target.drv_path.unwrap_or_default(), output))
}
