// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run the extraction pipeline and group classified pull requests per repository
// role: processing/orchestrator
// inputs: raw log text or LogDocument, shared PatternSet
// outputs: ReportModel (repositories in first-seen order, PRs in listing order, unassociated entries, summary)
// side_effects: none; no IO
// invariants:
// - repository order follows block encounter order; synthesized groups come after
// - blocks with the same repository name merge into one group
// - the same input always yields an equal ReportModel
// errors: ParseError for empty logs or a missing branches info section
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use crate::classify::{classify, details};
use crate::document::LogDocument;
use crate::entries::extract_all;
use crate::error::{EngineError, ParseError};
use crate::model::{
  BranchRecord, DryRunEntry, EntryKind, PullRequestRecord, RepositoryBlock, RepositoryReport, ReportModel,
  ReportSummary, Status,
};
use crate::patterns::PatternSet;
use crate::segment::segment;

/// Extract, classify and group everything in one log.
pub fn extract_report(text: &str, patterns: &PatternSet) -> Result<ReportModel, EngineError> {
  let document = LogDocument::from_text(text);
  Ok(build_report(&document, patterns)?)
}

pub fn build_report(document: &LogDocument, patterns: &PatternSet) -> Result<ReportModel, ParseError> {
  if document.is_blank() {
    return Err(ParseError::EmptyLog);
  }

  let scanned = document.scan(patterns.normalizer());
  let section = segment(&scanned, patterns)?;
  let entries = extract_all(&scanned, patterns);

  let mut builder = ReportModelBuilder::new(&entries);
  for block in &section.blocks {
    builder.push_block(block);
  }
  let model = builder.build();

  tracing::info!(
    repositories = model.summary.repositories,
    pull_requests = model.summary.pull_requests,
    unassociated = model.summary.unassociated_entries,
    "report model built"
  );
  Ok(model)
}

/// True when `entry` refers to `record` inside repository `repository`.
fn associates(entry: &DryRunEntry, repository: &str, record: &BranchRecord) -> bool {
  if let Some(repo) = &entry.repository {
    if repo != repository {
      return false;
    }
  }
  let by_branch = matches!((&entry.branch_name, &record.branch_name), (Some(a), Some(b)) if a == b);
  let by_title = matches!((&entry.pr_title, &record.pr_title), (Some(a), Some(b)) if a == b);
  by_branch || by_title
}

pub struct ReportModelBuilder<'e> {
  entries: &'e [DryRunEntry],
  used: Vec<bool>,
  groups: Vec<RepositoryReport>,
}

impl<'e> ReportModelBuilder<'e> {
  pub fn new(entries: &'e [DryRunEntry]) -> Self {
    Self {
      entries,
      used: vec![false; entries.len()],
      groups: Vec::new(),
    }
  }

  fn group_mut(&mut self, repository: &str) -> &mut RepositoryReport {
    let index = match self.groups.iter().position(|g| g.repository == repository) {
      Some(i) => i,
      None => {
        self.groups.push(RepositoryReport {
          repository: repository.to_string(),
          pull_requests: Vec::new(),
          warnings: Vec::new(),
        });
        self.groups.len() - 1
      }
    };
    &mut self.groups[index]
  }

  /// Classify every record of a block and append it to the block's repository group.
  pub fn push_block(&mut self, block: &RepositoryBlock) {
    let entries = self.entries;
    let mut records = Vec::with_capacity(block.records.len());

    for record in &block.records {
      let mut associated: Vec<&DryRunEntry> = Vec::new();
      for (i, entry) in entries.iter().enumerate() {
        if associates(entry, &block.name, record) {
          self.used[i] = true;
          associated.push(entry);
        }
      }
      records.push(pull_request(record, &associated));
    }

    let group = self.group_mut(&block.name);
    group.pull_requests.extend(records);
    if let Some(warning) = &block.warning {
      group.warnings.push(format!("line {}: {}", block.header_line + 1, warning));
    }
  }

  /// Autoclosed entries no listed branch claimed become DISCARDED records of their own.
  fn push_orphan_autoclosed(&mut self) {
    let orphans: Vec<usize> = (0..self.entries.len())
      .filter(|&i| !self.used[i] && self.entries[i].kind == EntryKind::Autoclosed)
      .collect();

    let entries = self.entries;
    for i in orphans {
      self.used[i] = true;
      let entry = &entries[i];
      let record = BranchRecord {
        branch_name: entry.branch_name.clone(),
        pr_title: entry.pr_title.clone(),
        state: Some("discarded".into()),
        ..Default::default()
      };
      let pr = pull_request(&record, &[entry]);
      let repository = entry.repository.clone().unwrap_or_default();
      self.group_mut(&repository).pull_requests.push(pr);
    }
  }

  pub fn build(mut self) -> ReportModel {
    self.push_orphan_autoclosed();

    let unassociated: Vec<DryRunEntry> = self
      .entries
      .iter()
      .zip(&self.used)
      .filter(|(_, used)| !**used)
      .map(|(e, _)| e.clone())
      .collect();
    for entry in &unassociated {
      tracing::debug!(line = entry.line, text = %entry.text, "dry-run entry matches no listed branch");
    }

    let mut statuses: BTreeMap<Status, usize> = BTreeMap::new();
    for pr in self.groups.iter().flat_map(|g| &g.pull_requests) {
      *statuses.entry(pr.status).or_insert(0) += 1;
    }

    let summary = ReportSummary {
      repositories: self.groups.len(),
      pull_requests: statuses.values().sum(),
      statuses,
      unassociated_entries: unassociated.len(),
    };

    ReportModel {
      summary,
      repositories: self.groups,
      unassociated,
    }
  }
}

fn pull_request(record: &BranchRecord, entries: &[&DryRunEntry]) -> PullRequestRecord {
  let status = classify(record, entries);
  PullRequestRecord {
    title: record.pr_title.clone().unwrap_or_default(),
    branch_name: record.branch_name.clone(),
    status,
    pr_number: record.pr_number,
    state: record.state.clone(),
    upgrades: record.upgrades.clone(),
    details: details(record, entries, status),
  }
}
