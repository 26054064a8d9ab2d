//! nixstate-lib: drive the Nix command line from a declarative state tool.
//!
//! This crate provides the pieces a reconciliation loop needs:
//! - `exec`: structured invocations of the `nix` binary
//! - `decode`: normalization of each subcommand's JSON output
//! - `artifact`: the derivation/output identity of a store artifact
//! - `engine`: build, describe, probe and delete, plus the reconciliation policy
//! - `sync`: copying closures between stores

pub mod artifact;
pub mod config;
pub mod consts;
pub mod decode;
pub mod engine;
pub mod exec;
pub mod installable;
pub mod sync;
pub mod system;

#[cfg(test)]
mod util;

pub use artifact::{Artifact, ArtifactPath, ArtifactRecord, Validity};
pub use config::{NixConfig, TransportOptions};
pub use engine::Engine;
pub use exec::{NixCli, NixError, Runner};
pub use sync::CopyRequest;
