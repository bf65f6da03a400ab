// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the in-memory model (branch records, dry-run entries, classified PRs, report) shared by extraction and rendering
// role: model/types
// outputs: Serializable structs with stable field names; Status serializes as its upper-case name
// invariants: every PullRequestRecord has exactly one Status; repositories keep first-seen order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
  New,
  Unchanged,
  Updated,
  Discarded,
  Skipped,
  Error,
  Pending,
  Automerged,
  Unknown,
}

impl Status {
  pub const ALL: [Status; 9] = [
    Status::New,
    Status::Unchanged,
    Status::Updated,
    Status::Discarded,
    Status::Skipped,
    Status::Error,
    Status::Pending,
    Status::Automerged,
    Status::Unknown,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Status::New => "NEW",
      Status::Unchanged => "UNCHANGED",
      Status::Updated => "UPDATED",
      Status::Discarded => "DISCARDED",
      Status::Skipped => "SKIPPED",
      Status::Error => "ERROR",
      Status::Pending => "PENDING",
      Status::Automerged => "AUTOMERGED",
      Status::Unknown => "UNKNOWN",
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Tag of a dry-run entry. Precedence when a line fits several:
/// autoclosed > updated > created > commit-files > general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
  General,
  Autoclosed,
  Updated,
  Created,
  CommitFiles,
}

/// One matched dry-run action statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryRunEntry {
  /// 1-based line number of the anchor line.
  pub line: usize,
  pub kind: EntryKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub repository: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub branch_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pr_title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub info: Option<String>,
  /// Timestamp-free text of the matched line.
  pub text: String,
}

impl DryRunEntry {
  /// What the detail view shows for this entry.
  pub fn detail(&self) -> String {
    self.info.clone().unwrap_or_else(|| self.text.clone())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dep_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_version: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub new_version: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub update_type: Option<String>,
}

/// One pull-request candidate as listed in the branches info section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
  pub branch_name: Option<String>,
  pub pr_title: Option<String>,
  pub pr_number: Option<u64>,
  /// Inline state text (the `result` field).
  pub state: Option<String>,
  pub upgrades: Vec<Upgrade>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryBlock {
  pub name: String,
  /// 0-based index of the line the repository name was read from.
  pub header_line: usize,
  pub records: Vec<BranchRecord>,
  /// Set when the block body could not be read; the block then has no records.
  pub warning: Option<String>,
}

/// A branches info span: `start` inclusive, `end` exclusive (document end when absent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
  pub start: usize,
  pub end: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchesSection {
  pub spans: Vec<SectionSpan>,
  pub blocks: Vec<RepositoryBlock>,
}

/// Output unit: one classified pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
  pub title: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub branch_name: Option<String>,
  pub status: Status,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pr_number: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  pub upgrades: Vec<Upgrade>,
  /// Lines for the "extra info" view: state explanation, then entry texts.
  pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReport {
  pub repository: String,
  pub pull_requests: Vec<PullRequestRecord>,
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
  pub repositories: usize,
  pub pull_requests: usize,
  pub statuses: BTreeMap<Status, usize>,
  pub unassociated_entries: usize,
}

/// Terminal artifact: repositories in first-seen order, each with its PRs in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportModel {
  pub summary: ReportSummary,
  pub repositories: Vec<RepositoryReport>,
  pub unassociated: Vec<DryRunEntry>,
}

impl ReportModel {
  pub fn repository(&self, name: &str) -> Option<&RepositoryReport> {
    self.repositories.iter().find(|r| r.repository == name)
  }

  pub fn repository_names(&self) -> Vec<&str> {
    self.repositories.iter().map(|r| r.repository.as_str()).collect()
  }

  pub fn pull_requests(&self) -> impl Iterator<Item = &PullRequestRecord> {
    self.repositories.iter().flat_map(|r| r.pull_requests.iter())
  }
}
