mod cmd;
mod output;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nixstate_lib::{Engine, NixConfig};

use crate::cmd::CopyArgs;
use crate::output::{OutputFormat, print_error};

/// nixstate - drive the Nix command line for declarative state
#[derive(Parser)]
#[command(name = "nixstate")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short = 'o', long, global = true, value_enum, default_value = "text")]
  output: OutputFormat,

  /// Kill any nix invocation running longer than this (e.g. "90s", "10m")
  #[arg(long, global = true, value_parser = humantime::parse_duration)]
  timeout: Option<Duration>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate an installable to JSON
  Eval {
    installable: String,

    /// Nix function applied to the value before printing
    #[arg(long)]
    apply: Option<String>,
  },

  /// Build an installable without creating a result link
  Build { installable: String },

  /// Show the derivation behind an installable without building it
  Describe { installable: String },

  /// Check whether an installable is realized in the local store
  PathInfo { installable: String },

  /// Build an installable only if the store lacks it
  Ensure { installable: String },

  /// Report realization, describing the derivation when it is missing
  Inspect { installable: String },

  /// Converge the artifact recorded in a state file towards an installable
  Reconcile {
    installable: String,

    /// JSON file holding the recorded artifact; created when missing
    #[arg(long)]
    state: PathBuf,
  },

  /// Delete a store path, or the artifact recorded in a state file
  #[command(group(ArgGroup::new("target").required(true).args(["path", "state"])))]
  Delete {
    path: Option<String>,

    /// State file written by `reconcile`; removed after the delete
    #[arg(long)]
    state: Option<PathBuf>,
  },

  /// Copy a closure between stores
  Copy(CopyArgs),

  /// Check whether a path exists in a remote store
  RemoteExists {
    installable: String,

    /// Store URI to probe, e.g. ssh://user@host
    #[arg(long)]
    store: String,

    /// Extra ssh argument passed through NIX_SSHOPTS (repeatable)
    #[arg(long = "ssh-option")]
    ssh_options: Vec<String>,
  },

  /// Map a Nix system such as x86_64-linux to an AMI architecture
  AmiArch { system: String },

  /// Print the installable for an attribute of a flake's NixOS configuration
  NixosInstallable {
    flake: String,

    configuration: String,

    #[arg(long, default_value = "system.build.toplevel")]
    attribute: String,
  },
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "error" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn engine(timeout: Option<Duration>) -> Result<Engine> {
  let mut config = NixConfig::from_env().context("Invalid nix configuration")?;
  if timeout.is_some() {
    config = config.with_timeout(timeout);
  }
  Ok(Engine::from_config(config))
}

fn run(cli: Cli) -> Result<()> {
  let output = cli.output;
  let timeout = cli.timeout;

  match cli.command {
    Commands::Eval { installable, apply } => cmd::cmd_eval(&engine(timeout)?, &installable, apply.as_deref(), output),
    Commands::Build { installable } => cmd::cmd_build(&engine(timeout)?, &installable, output),
    Commands::Describe { installable } => cmd::cmd_describe(&engine(timeout)?, &installable, output),
    Commands::PathInfo { installable } => cmd::cmd_path_info(&engine(timeout)?, &installable, output),
    Commands::Ensure { installable } => cmd::cmd_ensure(&engine(timeout)?, &installable, output),
    Commands::Inspect { installable } => cmd::cmd_inspect(&engine(timeout)?, &installable, output),
    Commands::Reconcile { installable, state } => cmd::cmd_reconcile(&engine(timeout)?, &installable, &state, output),
    Commands::Delete { path, state } => cmd::cmd_delete(&engine(timeout)?, path.as_deref(), state.as_deref(), output),
    Commands::Copy(args) => cmd::cmd_copy(&engine(timeout)?, args, output),
    Commands::RemoteExists {
      installable,
      store,
      ssh_options,
    } => cmd::cmd_remote_exists(&engine(timeout)?, &installable, &store, ssh_options, output),
    Commands::AmiArch { system } => cmd::cmd_ami_arch(&system, output),
    Commands::NixosInstallable {
      flake,
      configuration,
      attribute,
    } => cmd::cmd_nixos_installable(&flake, &configuration, &attribute, output),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
