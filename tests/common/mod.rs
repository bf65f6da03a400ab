//! Shared helpers for integration tests: fixtures, the fixture PatternSet, tracing, binary runs.

use std::path::{Path, PathBuf};

use dry_run_report::PatternSet;
use once_cell::sync::Lazy;
use tracing_subscriber::{EnvFilter, fmt};

pub const BIN: &str = "dry-run-report";
pub const SAMPLE_LOG: &str = "renovate-dry-run.log";

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
#[allow(dead_code)]
pub fn init_tracing() {
  static INIT: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
  });
  Lazy::force(&INIT);
}

/// Path to `tests/fixtures`, stable regardless of the runner's working directory.
pub fn fixtures_dir() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[allow(dead_code)]
pub fn fixture<P: AsRef<Path>>(rel_path: P) -> PathBuf {
  fixtures_dir().join(rel_path)
}

pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
  let path = fixtures_dir().join(rel_path);
  std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// The fixture configuration as a JSON value, for tests that mutate keys.
#[allow(dead_code)]
pub fn config_value() -> serde_json::Value {
  serde_json::from_str(&read_fixture_text("config.json")).expect("fixture config is JSON")
}

#[allow(dead_code)]
pub static PATTERNS: Lazy<PatternSet> =
  Lazy::new(|| PatternSet::from_json_str(&read_fixture_text("config.json")).expect("fixture config validates"));

#[allow(dead_code)]
pub fn cmd_bin() -> assert_cmd::Command {
  assert_cmd::Command::cargo_bin(BIN).expect("binary built")
}

/// One line in the fixture timestamp format.
#[allow(dead_code)]
pub fn ts(line: &str) -> String {
  format!("[2025-06-24T10:41:35.007Z] {}", line)
}

/// A branches info section for one repository with the given `(branch, title, result)` rows.
#[allow(dead_code)]
pub fn branches_section(repository: &str, rows: &[(&str, &str, &str)]) -> String {
  let items = rows
    .iter()
    .map(|(branch, title, result)| {
      ts(&format!(
        "{{ \"branchName\": \"{}\", \"prTitle\": \"{}\", \"result\": \"{}\" }}",
        branch, title, result
      ))
    })
    .collect::<Vec<_>>()
    .join(",\n");
  format!(
    "{}\n{}\n{}\n{}\n{}\n",
    ts(&format!("DEBUG: branches info extended (repository={})", repository)),
    ts("\"branchesInformation\": ["),
    items,
    ts("]"),
    ts(&format!("INFO: Repository finished (repository={})", repository)),
  )
}
