//! Implementation of the `nixstate reconcile` command.
//!
//! Loads the record from the state file, converges it towards the installable and
//! writes the resulting record back. The state file is only written after a
//! successful converge, so a failed build leaves the previous record in place.

use std::path::Path;

use anyhow::{Context, Result};

use nixstate_lib::Engine;

use super::block_on;
use crate::output::{OutputFormat, print_change, print_json, print_stat};
use crate::state;

pub fn cmd_reconcile(engine: &Engine, installable: &str, state_path: &Path, output: OutputFormat) -> Result<()> {
  let recorded = state::load(state_path)?;

  let converged = block_on(engine.converge(installable, recorded.as_ref()))?
    .with_context(|| format!("Failed to reconcile {}", installable))?;

  if recorded.as_ref() != Some(&converged.record) {
    state::save(state_path, &converged.record)?;
  }

  if output.is_json() {
    print_json(&converged)?;
  } else {
    print_change(converged.change, installable);
    print_stat("Output", &converged.record.output_path);
    if !converged.record.system.is_empty() {
      print_stat("System", &converged.record.system);
    }
  }

  Ok(())
}
