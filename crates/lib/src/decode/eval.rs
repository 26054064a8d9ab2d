//! `nix eval --json` output.

use serde_json::Value;

use crate::decode::single;
use crate::exec::NixError;

/// Pass the evaluation result through unchanged.
///
/// The output must hold exactly one JSON document: empty output is `NotFound` and a
/// stream of several documents is `Ambiguous`.
pub fn decode_eval(installable: &str, stdout: &[u8]) -> Result<Value, NixError> {
  let documents = serde_json::Deserializer::from_slice(stdout)
    .into_iter::<Value>()
    .collect::<Result<Vec<_>, _>>()
    .map_err(|source| NixError::Decode {
      installable: installable.to_string(),
      source,
    })?;

  single(installable, documents)
}
