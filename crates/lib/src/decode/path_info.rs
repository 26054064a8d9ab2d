//! `nix path-info --json` output.
//!
//! Older Nix releases print a list of entries, newer ones a map keyed by store path
//! whose value is `null` for paths the store does not hold. Both are accepted.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::artifact::{ArtifactPath, Validity};
use crate::decode::{parse, single};
use crate::exec::NixError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PathInfoOutput {
  List(Vec<PathInfo>),
  Map(BTreeMap<String, Option<PathInfo>>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PathInfo {
  #[serde(default)]
  path: Option<String>,
  #[serde(default)]
  deriver: Option<String>,
  /// Nix only writes the flag for invalid paths, so a missing flag means valid.
  #[serde(default)]
  valid: Option<bool>,
}

impl PathInfo {
  fn into_validity(self, fallback_path: Option<String>) -> Validity {
    Validity {
      valid: self.valid.unwrap_or(true),
      path: ArtifactPath::new(
        self.deriver.unwrap_or_default(),
        self.path.or(fallback_path).unwrap_or_default(),
      ),
    }
  }
}

pub fn decode_path_info(installable: &str, stdout: &[u8]) -> Result<Validity, NixError> {
  match parse(installable, stdout)? {
    PathInfoOutput::List(entries) => Ok(single(installable, entries)?.into_validity(None)),
    PathInfoOutput::Map(entries) => {
      let (path, info) = single(installable, entries)?;
      Ok(match info {
        Some(info) => info.into_validity(Some(path)),
        None => Validity {
          valid: false,
          path: ArtifactPath::new("", path),
        },
      })
    }
  }
}
