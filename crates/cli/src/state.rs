//! State file for `reconcile` and `delete --state`.
//!
//! Holds a single JSON [`ArtifactRecord`]. A missing file means nothing has been
//! recorded yet.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use nixstate_lib::ArtifactRecord;

pub fn load(path: &Path) -> Result<Option<ArtifactRecord>> {
  if !path.exists() {
    debug!(path = %path.display(), "no state file");
    return Ok(None);
  }

  let content = fs::read_to_string(path).with_context(|| format!("Failed to read state file {}", path.display()))?;
  let record = serde_json::from_str(&content)
    .with_context(|| format!("Failed to parse state file {}", path.display()))?;
  Ok(Some(record))
}

/// Write atomically: write to a sibling temp file, then rename.
pub fn save(path: &Path, record: &ArtifactRecord) -> Result<()> {
  let content = serde_json::to_string_pretty(record).context("Failed to serialize state")?;

  if let Some(dir) = path.parent()
    && !dir.as_os_str().is_empty()
  {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
  }

  let mut temp_path = path.as_os_str().to_owned();
  temp_path.push(".tmp");

  fs::write(&temp_path, &content).with_context(|| format!("Failed to write state file {}", path.display()))?;
  fs::rename(&temp_path, path).with_context(|| format!("Failed to write state file {}", path.display()))?;

  info!(path = %path.display(), installable = %record.installable, "state saved");
  Ok(())
}

pub fn clear(path: &Path) -> Result<()> {
  match fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
    Err(err) => Err(err).with_context(|| format!("Failed to remove state file {}", path.display())),
  }
}
