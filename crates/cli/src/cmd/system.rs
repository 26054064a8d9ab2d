//! Commands that only transform their arguments and never run nix.

use anyhow::Result;
use serde_json::json;

use nixstate_lib::installable::flake_nixos_configuration;
use nixstate_lib::system::ami_architecture;

use crate::output::{OutputFormat, print_json};

pub fn cmd_ami_arch(system: &str, output: OutputFormat) -> Result<()> {
  let architecture = ami_architecture(system)?;

  if output.is_json() {
    print_json(&json!({ "system": system, "architecture": architecture }))?;
  } else {
    println!("{}", architecture);
  }

  Ok(())
}

pub fn cmd_nixos_installable(flake: &str, configuration: &str, attribute: &str, output: OutputFormat) -> Result<()> {
  let installable = flake_nixos_configuration(flake, configuration, attribute);

  if output.is_json() {
    print_json(&json!({ "installable": installable }))?;
  } else {
    println!("{}", installable);
  }

  Ok(())
}
