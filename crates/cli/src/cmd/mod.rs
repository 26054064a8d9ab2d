mod copy;
mod delete;
mod ensure;
mod eval;
mod query;
mod reconcile;
mod system;

use std::future::Future;

use anyhow::{Context, Result};

pub use copy::{CopyArgs, cmd_copy, cmd_remote_exists};
pub use delete::cmd_delete;
pub use ensure::cmd_ensure;
pub use eval::cmd_eval;
pub use query::{cmd_build, cmd_describe, cmd_inspect, cmd_path_info};
pub use reconcile::cmd_reconcile;
pub use system::{cmd_ami_arch, cmd_nixos_installable};

/// Run a future to completion on a fresh runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  Ok(rt.block_on(future))
}
