//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, duration formatting, and Unicode symbols.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use nixstate_lib::engine::Change;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
  pub const ADD: &str = "+";
  pub const MODIFY: &str = "~";
  pub const REMOVE: &str = "-";
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

/// Symbol and label for a reconciliation outcome.
pub fn change_symbol(change: Change) -> (&'static str, &'static str) {
  match change {
    Change::Created => (symbols::ADD, "created"),
    Change::Unchanged => (symbols::INFO, "unchanged"),
    Change::Rebuilt => (symbols::MODIFY, "rebuilt"),
    Change::Replaced => (symbols::MODIFY, "replaced"),
  }
}

pub fn print_change(change: Change, subject: &str) {
  let (symbol, label) = change_symbol(change);
  let symbol = match change {
    Change::Created => symbol.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
    Change::Unchanged => symbol.if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string(),
    Change::Rebuilt | Change::Replaced => symbol.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
  };
  println!(
    "{} {} {}",
    symbol,
    subject,
    format!("({})", label).if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

pub fn print_removed(subject: &str) {
  println!(
    "{} {}",
    symbols::REMOVE.if_supports_color(Stream::Stdout, |s| s.red()),
    subject
  );
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
