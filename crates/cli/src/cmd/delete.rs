use std::path::Path;

use anyhow::{Context, Result, bail};

use nixstate_lib::Engine;
use nixstate_lib::engine::{GC_NOTICE, Removal};

use super::block_on;
use crate::output::{OutputFormat, print_info, print_json, print_removed, print_warning};
use crate::state;

pub fn cmd_delete(engine: &Engine, path: Option<&str>, state_path: Option<&Path>, output: OutputFormat) -> Result<()> {
  let removal = match (path, state_path) {
    (Some(path), None) => {
      block_on(engine.delete(path))?.with_context(|| format!("Failed to delete {}", path))?;
      Removal {
        deleted: Some(path.to_string()),
        notice: GC_NOTICE,
      }
    }
    (None, Some(state_path)) => {
      let Some(record) = state::load(state_path)? else {
        print_info(&format!("Nothing recorded in {}", state_path.display()));
        return Ok(());
      };
      let removal = block_on(engine.remove(&record))?
        .with_context(|| format!("Failed to delete {}", record.installable))?;
      state::clear(state_path)?;
      removal
    }
    _ => bail!("Pass either a store path or --state"),
  };

  if output.is_json() {
    return print_json(&removal);
  }

  match &removal.deleted {
    Some(deleted) => print_removed(deleted),
    None => print_info("Nothing to delete"),
  }
  print_warning(removal.notice);

  Ok(())
}
