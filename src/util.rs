// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for output naming, path resolution, clock overrides, and man page rendering
// role: utilities/helpers
// inputs: Various primitives; DateTime; paths; clap CommandFactory
// outputs: Report file names, resolved output targets, man page text
// side_effects: resolve_output creates parent directories
// invariants:
// - report_file_name pattern is stable and locale-independent
// - "-" always means stdout and is never created on disk
// errors: IO errors bubble with context; unparsable now overrides are errors
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use clap::CommandFactory;

pub const REPORT_PREFIX: &str = "DryRunovateReport";

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise
/// the current local time is used.
pub fn effective_now(override_now: Option<DateTime<Local>>) -> DateTime<Local> {
  override_now.unwrap_or_else(Local::now)
}

/// Parse a `--now-override` value: RFC3339, or a naive `YYYY-MM-DDTHH:MM:SS` in local time.
pub fn parse_now(value: Option<&str>) -> Result<Option<DateTime<Local>>> {
  let Some(s) = value else { return Ok(None) };
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(Some(dt.with_timezone(&Local)));
  }
  let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
    .with_context(|| format!("invalid --now-override value: {}", s))?;
  match Local.from_local_datetime(&naive).earliest() {
    Some(dt) => Ok(Some(dt)),
    None => bail!("--now-override does not exist in the local timezone: {}", s),
  }
}

/// `DryRunovateReport_<dd-mm-YYYY_HH-MM-SS>.<ext>`, with the log stem inserted when given.
pub fn report_file_name(now: DateTime<Local>, stem: Option<&str>, ext: &str) -> String {
  let ts = now.format("%d-%m-%Y_%H-%M-%S");
  match stem {
    Some(stem) => format!("{}_{}_{}.{}", REPORT_PREFIX, stem, ts, ext),
    None => format!("{}_{}.{}", REPORT_PREFIX, ts, ext),
  }
}

/// Where one rendered report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
  Stdout,
  File(PathBuf),
}

pub fn is_dir_like(out: &str) -> bool {
  out.ends_with('/') || Path::new(out).is_dir()
}

/// Resolve the output target for one log.
///
/// - `-` is stdout.
/// - A directory (existing, or spelled with a trailing `/`) receives a timestamped file.
/// - Anything else is used as the file path; its parent is created.
pub fn resolve_output(out: &str, now: DateTime<Local>, stem: Option<&str>, ext: &str) -> Result<OutputTarget> {
  if out == "-" {
    return Ok(OutputTarget::Stdout);
  }
  let path = if is_dir_like(out) {
    std::fs::create_dir_all(out).with_context(|| format!("creating output directory {}", out))?;
    Path::new(out).join(report_file_name(now, stem, ext))
  } else {
    let path = PathBuf::from(out);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent).with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    path
  };
  Ok(OutputTarget::File(path))
}

/// File stem of a log path, used to tell reports apart when several logs are processed.
pub fn log_stem(path: &Path) -> String {
  path
    .file_stem()
    .map(|s| s.to_string_lossy().to_string())
    .unwrap_or_else(|| "log".to_string())
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
