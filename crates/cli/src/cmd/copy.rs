//! `copy` and `remote-exists`: moving closures between stores.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use nixstate_lib::{CopyRequest, Engine, TransportOptions};

use super::block_on;
use crate::output::{OutputFormat, print_json, print_success, print_warning, symbols};

#[derive(Args, Debug)]
pub struct CopyArgs {
  /// Installable or store path whose closure is copied
  installable: String,

  /// Source store URI (defaults to the local store)
  #[arg(long)]
  from: Option<String>,

  /// Destination store URI (defaults to the local store)
  #[arg(long)]
  to: Option<String>,

  /// Do not require signatures on copied paths
  #[arg(long)]
  no_check_sigs: bool,

  /// Let the destination fetch paths from its own substituters
  #[arg(long)]
  substitute_on_destination: bool,

  /// Extra ssh argument passed through NIX_SSHOPTS (repeatable)
  #[arg(long = "ssh-option")]
  ssh_options: Vec<String>,
}

impl From<CopyArgs> for CopyRequest {
  fn from(args: CopyArgs) -> Self {
    CopyRequest {
      installable: args.installable,
      from: args.from,
      to: args.to,
      check_sigs: args.no_check_sigs.then_some(false),
      substitute_on_destination: args.substitute_on_destination.then_some(true),
      transport: TransportOptions::ssh(args.ssh_options),
    }
  }
}

#[derive(Debug, Serialize)]
struct Copied<'a> {
  installable: &'a str,
  from: Option<&'a str>,
  to: Option<&'a str>,
}

pub fn cmd_copy(engine: &Engine, args: CopyArgs, output: OutputFormat) -> Result<()> {
  let request = CopyRequest::from(args);

  block_on(engine.replicate(&request))?.with_context(|| format!("Failed to copy {}", request.installable))?;

  if output.is_json() {
    print_json(&Copied {
      installable: &request.installable,
      from: request.from.as_deref(),
      to: request.to.as_deref(),
    })?;
  } else {
    print_success(&format!(
      "Copied {} {} {} {}",
      request.installable,
      request.from.as_deref().unwrap_or("local"),
      symbols::ARROW,
      request.to.as_deref().unwrap_or("local")
    ));
  }

  Ok(())
}

#[derive(Debug, Serialize)]
struct RemoteExists<'a> {
  installable: &'a str,
  store: &'a str,
  exists: bool,
}

pub fn cmd_remote_exists(
  engine: &Engine,
  installable: &str,
  store: &str,
  ssh_options: Vec<String>,
  output: OutputFormat,
) -> Result<()> {
  let transport = TransportOptions::ssh(ssh_options);
  let exists = block_on(engine.remote_store_path_exists(installable, store, &transport))?
    .with_context(|| format!("Failed to probe {}", store))?;

  if output.is_json() {
    print_json(&RemoteExists {
      installable,
      store,
      exists,
    })?;
  } else if exists {
    print_success(&format!("{} exists in {}", installable, store));
  } else {
    print_warning(&format!("{} is missing from {}", installable, store));
  }

  Ok(())
}
