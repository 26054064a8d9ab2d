use anyhow::{Context, Result};
use serde_json::Value;

use nixstate_lib::Engine;

use super::block_on;
use crate::output::{OutputFormat, print_json};

pub fn cmd_eval(engine: &Engine, installable: &str, apply: Option<&str>, output: OutputFormat) -> Result<()> {
  let value = block_on(engine.evaluate(installable, apply))?
    .with_context(|| format!("Failed to evaluate {}", installable))?;

  match value {
    // Strings print raw in text mode.
    Value::String(s) if !output.is_json() => println!("{}", s),
    value => print_json(&value)?,
  }

  Ok(())
}
