// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load the 13-key pattern configuration and compile it into a validated PatternSet
// role: configuration/validation
// inputs: JSON text or serde_json::Value carrying the pattern keys
// outputs: PatternConfig (raw, typed) and PatternSet (expanded + compiled, read-only)
// invariants:
// - validation is all-or-nothing; every failing key is reported in one ConfigError
// - placeholder expansion happens before compilation, never at scan time
// - line-start keys only accept matches beginning at offset 0; repository name and timestamp match anywhere
// - patterns compile exactly as authored (after expansion); anchoring never rewrites the source
// errors: ConfigError (missing / wrong type / invalid regex); Json for unparsable text
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use regex::{Captures, Regex};

use crate::error::{ConfigError, EngineError, KeyProblem, ProblemKind};
use crate::ext::serde_json::JsonFetch;
use crate::timestamp::TimestampNormalizer;

pub const BRANCHES_INFO_START: &str = "branches_info_start_pattern";
pub const BRANCHES_INFO_END: &str = "branches_info_end_pattern";
pub const REPOSITORY_NAME: &str = "repository_name_pattern";
pub const TIMESTAMP_BASE: &str = "timestamp_base_pattern";
pub const TIMESTAMP_PLACEHOLDER: &str = "timestamp_base_pattern_placeholder";
pub const TIMESTAMP: &str = "timestamp_pattern";
pub const DRY_RUN_GENERAL: &str = "dry_run_info_pattern_general";
pub const DRY_RUN_AUTOCLOSED: &str = "dry_run_info_pattern_autoclosed";
pub const AUTOCLOSED_TITLE_LINE: &str = "dry_run_info_autoclosed_pr_title_line_number";
pub const AUTOCLOSED_TITLE: &str = "dry_run_info_autoclosed_pr_title_pattern";
pub const UPDATED_BRANCH: &str = "updated_branch_pattern";
pub const CREATED_BRANCH: &str = "created_branch_pattern";
pub const COMMITTED_FILES: &str = "commited_files_pattern";

/// All configuration keys, in documentation order.
pub const KEYS: [&str; 13] = [
  BRANCHES_INFO_START,
  BRANCHES_INFO_END,
  REPOSITORY_NAME,
  TIMESTAMP_BASE,
  TIMESTAMP_PLACEHOLDER,
  TIMESTAMP,
  DRY_RUN_GENERAL,
  DRY_RUN_AUTOCLOSED,
  AUTOCLOSED_TITLE_LINE,
  AUTOCLOSED_TITLE,
  UPDATED_BRANCH,
  CREATED_BRANCH,
  COMMITTED_FILES,
];

/// The pattern configuration as authored, before expansion and compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConfig {
  pub branches_info_start_pattern: String,
  pub branches_info_end_pattern: String,
  pub repository_name_pattern: String,
  pub timestamp_base_pattern: String,
  pub timestamp_base_pattern_placeholder: String,
  pub timestamp_pattern: String,
  pub dry_run_info_pattern_general: String,
  pub dry_run_info_pattern_autoclosed: String,
  pub dry_run_info_autoclosed_pr_title_line_number: usize,
  pub dry_run_info_autoclosed_pr_title_pattern: String,
  pub updated_branch_pattern: String,
  pub created_branch_pattern: String,
  pub commited_files_pattern: String,
}

impl PatternConfig {
  pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(Self::from_value(&value)?)
  }

  /// Read all keys, collecting every missing or mistyped one before failing.
  pub fn from_value(value: &serde_json::Value) -> Result<Self, ConfigError> {
    let mut problems: Vec<KeyProblem> = Vec::new();

    if let Some(obj) = value.as_object() {
      for key in obj.keys().filter(|k| !KEYS.contains(&k.as_str())) {
        tracing::warn!(key = %key, "ignoring unknown configuration key");
      }
    }

    let mut text = |key: &'static str| -> String {
      let fetched = value.fetch(key);
      if !fetched.is_present() {
        problems.push(KeyProblem { key, kind: ProblemKind::Missing });
        return String::new();
      }
      match fetched.to::<String>() {
        Some(s) => s,
        None => {
          problems.push(KeyProblem { key, kind: ProblemKind::WrongType { expected: "string" } });
          String::new()
        }
      }
    };

    let branches_info_start_pattern = text(BRANCHES_INFO_START);
    let branches_info_end_pattern = text(BRANCHES_INFO_END);
    let repository_name_pattern = text(REPOSITORY_NAME);
    let timestamp_base_pattern = text(TIMESTAMP_BASE);
    let timestamp_base_pattern_placeholder = text(TIMESTAMP_PLACEHOLDER);
    let timestamp_pattern = text(TIMESTAMP);
    let dry_run_info_pattern_general = text(DRY_RUN_GENERAL);
    let dry_run_info_pattern_autoclosed = text(DRY_RUN_AUTOCLOSED);
    let dry_run_info_autoclosed_pr_title_pattern = text(AUTOCLOSED_TITLE);
    let updated_branch_pattern = text(UPDATED_BRANCH);
    let created_branch_pattern = text(CREATED_BRANCH);
    let commited_files_pattern = text(COMMITTED_FILES);

    let line_number = value.fetch(AUTOCLOSED_TITLE_LINE);
    let dry_run_info_autoclosed_pr_title_line_number = if !line_number.is_present() {
      problems.push(KeyProblem { key: AUTOCLOSED_TITLE_LINE, kind: ProblemKind::Missing });
      0
    } else {
      match line_number.raw().and_then(|v| v.as_u64()) {
        Some(n) => n as usize,
        None => {
          problems.push(KeyProblem {
            key: AUTOCLOSED_TITLE_LINE,
            kind: ProblemKind::WrongType { expected: "non-negative integer" },
          });
          0
        }
      }
    };

    let config = Self {
      branches_info_start_pattern,
      branches_info_end_pattern,
      repository_name_pattern,
      timestamp_base_pattern,
      timestamp_base_pattern_placeholder,
      timestamp_pattern,
      dry_run_info_pattern_general,
      dry_run_info_pattern_autoclosed,
      dry_run_info_autoclosed_pr_title_line_number,
      dry_run_info_autoclosed_pr_title_pattern,
      updated_branch_pattern,
      created_branch_pattern,
      commited_files_pattern,
    };

    if problems.is_empty() {
      return Ok(config);
    }

    // missing keys read as "" and compile; regexes are checked only once the base and placeholder were read
    let expansion_known = !problems.iter().any(|p| p.key == TIMESTAMP_BASE || p.key == TIMESTAMP_PLACEHOLDER);
    if expansion_known {
      if let Err(invalid) = config.validate() {
        let reported = problems.iter().map(|p| p.key).collect::<Vec<_>>();
        problems.extend(invalid.problems.into_iter().filter(|p| !reported.contains(&p.key)));
      }
    }
    problems.sort_by_key(|p| KEYS.iter().position(|k| *k == p.key));
    Err(ConfigError { problems })
  }

  /// Expand the timestamp placeholder everywhere and compile every pattern.
  pub fn validate(&self) -> Result<PatternSet, ConfigError> {
    let normalizer = TimestampNormalizer::new(
      &self.timestamp_base_pattern,
      &self.timestamp_base_pattern_placeholder,
    );
    let mut problems: Vec<KeyProblem> = Vec::new();

    let mut compile = |key: &'static str, pattern: &str, anchored: bool| -> Option<LinePattern> {
      match LinePattern::new(&normalizer.expand(pattern), anchored) {
        Ok(re) => Some(re),
        Err(e) => {
          problems.push(KeyProblem { key, kind: ProblemKind::InvalidRegex(e.to_string()) });
          None
        }
      }
    };

    let start = compile(BRANCHES_INFO_START, &self.branches_info_start_pattern, true);
    let end = compile(BRANCHES_INFO_END, &self.branches_info_end_pattern, true);
    let repository = compile(REPOSITORY_NAME, &self.repository_name_pattern, false);
    let timestamp = compile(TIMESTAMP, &self.timestamp_pattern, false);
    let general = compile(DRY_RUN_GENERAL, &self.dry_run_info_pattern_general, true);
    let autoclosed = compile(DRY_RUN_AUTOCLOSED, &self.dry_run_info_pattern_autoclosed, true);
    let title = compile(AUTOCLOSED_TITLE, &self.dry_run_info_autoclosed_pr_title_pattern, true);
    let updated = compile(UPDATED_BRANCH, &self.updated_branch_pattern, true);
    let created = compile(CREATED_BRANCH, &self.created_branch_pattern, true);
    let committed = compile(COMMITTED_FILES, &self.commited_files_pattern, true);

    match (start, end, repository, timestamp, general, autoclosed, title, updated, created, committed) {
      (
        Some(branches_info_start),
        Some(branches_info_end),
        Some(repository_name),
        Some(timestamp),
        Some(dry_run_general),
        Some(dry_run_autoclosed),
        Some(autoclosed_title),
        Some(updated_branch),
        Some(created_branch),
        Some(committed_files),
      ) => Ok(PatternSet {
        normalizer: normalizer.with_timestamp(timestamp.regex),
        branches_info_start,
        branches_info_end,
        repository_name,
        dry_run_general,
        dry_run_autoclosed,
        autoclosed_title_offset: self.dry_run_info_autoclosed_pr_title_line_number,
        autoclosed_title,
        updated_branch,
        created_branch,
        committed_files,
      }),
      _ => Err(ConfigError { problems }),
    }
  }
}

/// A compiled pattern that either matches anywhere or only at the start of the text.
///
/// Leftmost-first search reports the earliest starting match, so checking that the
/// first match begins at 0 accepts exactly the lines an `\A` prefix would.
#[derive(Debug, Clone)]
pub struct LinePattern {
  regex: Regex,
  anchored: bool,
}

impl LinePattern {
  pub fn new(source: &str, anchored: bool) -> Result<Self, regex::Error> {
    Ok(Self { regex: Regex::new(source)?, anchored })
  }

  pub fn as_str(&self) -> &str {
    self.regex.as_str()
  }

  pub fn captures<'h>(&self, text: &'h str) -> Option<Captures<'h>> {
    self
      .regex
      .captures(text)
      .filter(|caps| !self.anchored || caps.get(0).is_some_and(|m| m.start() == 0))
  }

  pub fn is_match(&self, text: &str) -> bool {
    match self.regex.find(text) {
      Some(m) => !self.anchored || m.start() == 0,
      None => false,
    }
  }
}

/// Compiled, read-only matching rules. Shareable across threads and runs.
#[derive(Debug, Clone)]
pub struct PatternSet {
  normalizer: TimestampNormalizer,
  pub branches_info_start: LinePattern,
  pub branches_info_end: LinePattern,
  pub repository_name: LinePattern,
  pub dry_run_general: LinePattern,
  pub dry_run_autoclosed: LinePattern,
  /// Lines below an autoclosed anchor where the PR title is found.
  pub autoclosed_title_offset: usize,
  pub autoclosed_title: LinePattern,
  pub updated_branch: LinePattern,
  pub created_branch: LinePattern,
  pub committed_files: LinePattern,
}

impl PatternSet {
  pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
    Ok(PatternConfig::from_json_str(text)?.validate()?)
  }

  pub fn normalizer(&self) -> &TimestampNormalizer {
    &self.normalizer
  }
}
