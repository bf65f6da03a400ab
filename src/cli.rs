use anyhow::{Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::OutputFormat;
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "dry-run-report",
    version,
    about = "Summarize a Renovate dry-run log as a per-repository PR report (HTML or JSON)",
    long_about = None
)]
pub struct Cli {
  /// Renovate dry-run log file; repeat to process several logs in parallel
  #[arg(long = "log", required_unless_present = "gen_man")]
  pub logs: Vec<PathBuf>,

  /// Pattern configuration JSON (13 keys)
  #[arg(long, required_unless_present = "gen_man")]
  pub config: Option<PathBuf>,

  /// Output location:
  /// - a directory (existing or ending in `/`): timestamped report file inside it
  /// - a file path: written as-is (single log only)
  /// - "-": stdout (single log only)
  #[arg(long, default_value = ".")]
  pub out: String,

  /// Report format
  #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
  pub format: OutputFormat,

  /// Debug-level logging on stderr (RUST_LOG still wins when set)
  #[arg(long, short)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used in output file names (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub logs: Vec<PathBuf>,
  pub config: PathBuf,
  pub out: String,
  pub format: OutputFormat,
  pub multi_logs: bool,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  if cli.logs.is_empty() {
    bail!("Provide at least one --log");
  }
  let Some(config) = cli.config else {
    bail!("Provide --config with the pattern configuration JSON");
  };

  let multi_logs = cli.logs.len() > 1;
  if multi_logs && (cli.out == "-" || !util::is_dir_like(&cli.out)) {
    bail!("Several --log files need --out to be a directory (existing or ending in '/')");
  }

  // fail early on a bad override rather than once per log
  util::parse_now(cli.now_override.as_deref())?;

  Ok(EffectiveConfig {
    logs: cli.logs,
    config,
    out: cli.out,
    format: cli.format,
    multi_logs,
    now_override: cli.now_override,
  })
}
