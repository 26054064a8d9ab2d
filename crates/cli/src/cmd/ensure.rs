use std::time::Instant;

use anyhow::{Context, Result};

use nixstate_lib::Engine;

use super::block_on;
use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success};

pub fn cmd_ensure(engine: &Engine, installable: &str, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let ensured = block_on(engine.ensure(installable))?.with_context(|| format!("Failed to ensure {}", installable))?;

  if output.is_json() {
    return print_json(&ensured);
  }

  if ensured.built {
    print_success(&format!("Built {}", installable));
  } else {
    print_info(&format!("{} already realized", installable));
  }
  print_stat("Path", &ensured.path.to_string());
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
