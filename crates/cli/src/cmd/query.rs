//! Single-primitive commands: `build`, `describe`, `path-info` and `inspect`.

use std::time::Instant;

use anyhow::{Context, Result};

use nixstate_lib::{ArtifactPath, Engine};

use super::block_on;
use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success, print_warning};

fn print_paths(path: &ArtifactPath) {
  if !path.drv_path.is_empty() {
    print_stat("Derivation", &path.drv_path);
  }
  if !path.output_path.is_empty() {
    print_stat("Output", &path.output_path);
  }
}

pub fn cmd_build(engine: &Engine, installable: &str, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let path = block_on(engine.build(installable))?.with_context(|| format!("Failed to build {}", installable))?;

  if output.is_json() {
    print_json(&path)?;
  } else {
    print_success(&format!("Built {}", installable));
    print_paths(&path);
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  Ok(())
}

pub fn cmd_describe(engine: &Engine, installable: &str, output: OutputFormat) -> Result<()> {
  let artifact =
    block_on(engine.describe(installable))?.with_context(|| format!("Failed to describe {}", installable))?;

  if output.is_json() {
    print_json(&artifact)?;
  } else {
    print_info(&artifact.name);
    print_stat("System", &artifact.system);
    print_paths(&artifact.path);
  }

  Ok(())
}

pub fn cmd_path_info(engine: &Engine, installable: &str, output: OutputFormat) -> Result<()> {
  let validity =
    block_on(engine.check_validity(installable))?.with_context(|| format!("Failed to query {}", installable))?;

  if output.is_json() {
    print_json(&validity)?;
  } else {
    if validity.valid {
      print_success(&format!("{} is valid", installable));
    } else {
      print_warning(&format!("{} is known to the store but not valid", installable));
    }
    print_paths(&validity.path);
  }

  Ok(())
}

pub fn cmd_inspect(engine: &Engine, installable: &str, output: OutputFormat) -> Result<()> {
  let inspection =
    block_on(engine.inspect(installable))?.with_context(|| format!("Failed to inspect {}", installable))?;

  if output.is_json() {
    print_json(&inspection)?;
  } else {
    if inspection.valid {
      print_success(&format!("{} is realized", installable));
    } else {
      print_info(&format!("{} is not realized; it would produce:", installable));
    }
    print_paths(&inspection.path);
  }

  Ok(())
}
