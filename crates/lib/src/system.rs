//! Nix system doubles.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SystemError {
  #[error("unable to map nix architecture '{0}' to an AMI architecture")]
  UnknownArchitecture(String),
}

/// The architecture part of a system double, e.g. `aarch64` for `aarch64-linux`.
pub fn architecture(system: &str) -> &str {
  system.split_once('-').map_or(system, |(arch, _)| arch)
}

/// Map a Nix system such as `x86_64-linux` to the matching EC2 AMI architecture.
pub fn ami_architecture(system: &str) -> Result<&'static str, SystemError> {
  match architecture(system) {
    "aarch64" => Ok("arm64"),
    "x86_64" => Ok("x86_64"),
    "i686" => Ok("i386"),
    other => Err(SystemError::UnknownArchitecture(other.to_string())),
  }
}
