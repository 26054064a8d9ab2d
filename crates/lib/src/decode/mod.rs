//! Decoders for `nix` JSON output.
//!
//! Each subcommand reports a collection keyed or indexed by resolved targets, but an
//! installable must resolve to exactly one target here:
//! - zero results fail with [`NixError::NotFound`]
//! - several results fail with [`NixError::Ambiguous`]
//! - malformed or unexpected JSON fails with [`NixError::Decode`]

pub mod build;
pub mod derivation;
pub mod eval;
pub mod path_info;

use serde::de::DeserializeOwned;

use crate::consts::DEFAULT_OUTPUT;
use crate::exec::NixError;

pub use build::decode_build;
pub use derivation::decode_derivation;
pub use eval::decode_eval;
pub use path_info::decode_path_info;

pub(crate) fn parse<T: DeserializeOwned>(installable: &str, stdout: &[u8]) -> Result<T, NixError> {
  serde_json::from_slice(stdout).map_err(|source| NixError::Decode {
    installable: installable.to_string(),
    source,
  })
}

/// Apply the singleton-result policy to decoded results.
pub(crate) fn single<T>(installable: &str, results: impl IntoIterator<Item = T>) -> Result<T, NixError> {
  let mut results = results.into_iter();

  let first = results.next().ok_or_else(|| NixError::NotFound {
    installable: installable.to_string(),
  })?;

  let extra = results.count();
  if extra > 0 {
    return Err(NixError::Ambiguous {
      installable: installable.to_string(),
      count: extra + 1,
    });
  }

  Ok(first)
}

/// Pick the primary output of a derivation.
///
/// `out` wins when present; otherwise the lexicographically smallest output name is
/// chosen. The result never depends on the iteration order of `outputs`.
pub fn select_output<'a, V>(outputs: impl IntoIterator<Item = (&'a str, V)>) -> Option<V> {
  let mut best: Option<(&'a str, V)> = None;

  for (name, value) in outputs {
    if name == DEFAULT_OUTPUT {
      return Some(value);
    }
    let smaller = match &best {
      Some((current, _)) => name < *current,
      None => true,
    };
    if smaller {
      best = Some((name, value));
    }
  }

  best.map(|(_, value)| value)
}
