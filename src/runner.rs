// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate per-log processing: load patterns once, extract and render every log, write artifacts
// role: processing/orchestrator
// inputs: EffectiveConfig (logs, config path, out, format), optional now
// outputs: Report files on disk or report text on stdout; one LogOutcome per log
// side_effects: Reads log/config files; creates directories; writes report files; prints to stdout
// invariants:
// - the PatternSet is built once and shared read-only by every log
// - outcomes are returned in --log order regardless of completion order
// - one failing log never prevents the others from being written
// errors: config problems are fatal for the run; per-log errors are collected and reported at the end
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use rayon::prelude::*;

use crate::cli::EffectiveConfig;
use crate::model::ReportModel;
use crate::patterns::PatternSet;
use crate::render::{OutputFormat, render};
use crate::report::extract_report;
use crate::util::{self, OutputTarget};

#[derive(Debug)]
pub struct LogOutcome {
  pub log: PathBuf,
  pub result: Result<Written>,
}

#[derive(Debug)]
pub enum Written {
  File(PathBuf),
  Stdout(String),
}

pub fn load_patterns(path: &Path) -> Result<PatternSet> {
  let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
  let patterns = PatternSet::from_json_str(&text).with_context(|| format!("loading config {}", path.display()))?;
  Ok(patterns)
}

/// Extract the report model for one log file.
pub fn extract_log(path: &Path, patterns: &PatternSet) -> Result<ReportModel> {
  let text = std::fs::read_to_string(path).with_context(|| format!("reading log {}", path.display()))?;
  let model = extract_report(&text, patterns).with_context(|| format!("extracting {}", path.display()))?;
  Ok(model)
}

fn process_log(
  cfg: &EffectiveConfig,
  patterns: &PatternSet,
  log: &Path,
  now: DateTime<Local>,
) -> Result<Written> {
  let span = tracing::info_span!("log", path = %log.display());
  let _enter = span.enter();

  let model = extract_log(log, patterns)?;
  let text = render(&model, cfg.format)?;

  let stem = cfg.multi_logs.then(|| util::log_stem(log));
  match util::resolve_output(&cfg.out, now, stem.as_deref(), cfg.format.extension())? {
    OutputTarget::Stdout => Ok(Written::Stdout(text)),
    OutputTarget::File(path) => {
      std::fs::write(&path, text).with_context(|| format!("writing report {}", path.display()))?;
      tracing::info!(report = %path.display(), "report written");
      Ok(Written::File(path))
    }
  }
}

/// Process every log in parallel and return one outcome per log, in input order.
pub fn process_logs(cfg: &EffectiveConfig, patterns: &PatternSet, now: DateTime<Local>) -> Vec<LogOutcome> {
  cfg
    .logs
    .par_iter()
    .map(|log| LogOutcome {
      log: log.clone(),
      result: process_log(cfg, patterns, log, now),
    })
    .collect()
}

pub fn run(cfg: &EffectiveConfig, now_opt: Option<DateTime<Local>>) -> Result<()> {
  let patterns = load_patterns(&cfg.config)?;
  let now = util::effective_now(now_opt);

  let outcomes = process_logs(cfg, &patterns, now);

  let mut failed = 0usize;
  for outcome in &outcomes {
    match &outcome.result {
      Ok(Written::Stdout(text)) => print!("{}", text),
      Ok(Written::File(path)) => {
        if cfg.format == OutputFormat::Json || cfg.multi_logs {
          println!("{}", path.display());
        } else {
          println!("Report written to {}", path.display());
        }
      }
      Err(err) => {
        failed += 1;
        tracing::error!(log = %outcome.log.display(), "{:#}", err);
      }
    }
  }

  if failed > 0 {
    bail!("{} of {} log(s) failed", failed, outcomes.len());
  }
  Ok(())
}
