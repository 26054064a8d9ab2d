//! `nix derivation show` output.
//!
//! The result is a map keyed by derivation path; the derivation path is the key, not a
//! field of the value. Fields this crate does not use (`env`, `args`, `builder`,
//! `inputDrvs`, `inputSrcs`) are ignored.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::artifact::{Artifact, ArtifactPath};
use crate::decode::{parse, select_output, single};
use crate::exec::NixError;

#[derive(Debug, Deserialize)]
struct Derivation {
  #[serde(default)]
  name: String,
  #[serde(default)]
  system: String,
  #[serde(default)]
  outputs: HashMap<String, DerivationOutput>,
}

#[derive(Debug, Deserialize)]
struct DerivationOutput {
  /// Absent for content-addressed outputs that are not yet known.
  #[serde(default)]
  path: Option<String>,
}

pub fn decode_derivation(installable: &str, stdout: &[u8]) -> Result<Artifact, NixError> {
  let derivations: BTreeMap<String, Derivation> = parse(installable, stdout)?;
  let (drv_path, derivation) = single(installable, derivations)?;

  let output_path = select_output(derivation.outputs.iter().map(|(name, output)| (name.as_str(), output)))
    .and_then(|output| output.path.clone())
    .unwrap_or_default();

  Ok(Artifact {
    name: derivation.name,
    system: derivation.system,
    path: ArtifactPath::new(drv_path, output_path),
  })
}
