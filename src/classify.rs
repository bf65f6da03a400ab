// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Derive exactly one Status for a branch record from its inline state and associated dry-run entries
// role: classification
// inputs: BranchRecord inline state text; associated DryRunEntry list
// outputs: Status plus human-readable detail lines for the info view
// invariants:
// - pure and deterministic; result does not depend on entry order
// - rules are evaluated top-down, first satisfied wins; UNKNOWN only when nothing else applies
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{BranchRecord, DryRunEntry, EntryKind, Status};

/// Interpretation of a branch's inline `result` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineState {
  Absent,
  Discarded,
  Error,
  Pending,
  Automerged,
  Skipped(&'static str),
  Created,
  /// A normal outcome that carries no marker of its own (done, no-work, rebase).
  Settled(&'static str),
  Unrecognized(String),
}

impl InlineState {
  pub fn parse(state: Option<&str>) -> Self {
    let Some(state) = state.map(str::trim).filter(|s| !s.is_empty()) else {
      return InlineState::Absent;
    };
    match state {
      "discarded" => InlineState::Discarded,
      "error" => InlineState::Error,
      "pending" | "needs-approval" | "needs-pr-approval" => InlineState::Pending,
      "automerged" => InlineState::Automerged,
      "already-existed" => InlineState::Skipped(
        "There is a closed PR for this dependency update so Renovate skipped the recreation of the PR",
      ),
      "not-scheduled" | "update-not-scheduled" => InlineState::Skipped("PR is not scheduled for this repository"),
      "pr-limit-reached" => InlineState::Skipped("PR limit reached for this repository"),
      "commit-limit-reached" => InlineState::Skipped("Commit limit reached for this repository"),
      "branch-limit-reached" => InlineState::Skipped("Branch limit reached for this repository"),
      "pr-edited" => InlineState::Skipped(
        "PR has been manually edited so Renovate skipped any processing in order to not override any manual changes",
      ),
      "pr-created" => InlineState::Created,
      "done" => InlineState::Settled("done"),
      "no-work" => InlineState::Settled("no-work"),
      "rebase" => InlineState::Settled("PR would be rebased"),
      other => InlineState::Unrecognized(other.to_string()),
    }
  }

  fn message(&self) -> Option<String> {
    match self {
      InlineState::Discarded => Some("PR would be discarded".into()),
      InlineState::Automerged => Some("PR would be automerged".into()),
      InlineState::Skipped(reason) => Some((*reason).into()),
      InlineState::Settled("PR would be rebased") => Some("PR would be rebased".into()),
      InlineState::Unrecognized(s) => Some(format!("Unknown PR state: {}", s)),
      _ => None,
    }
  }
}

/// Classify one branch record. Rules, first satisfied wins:
/// 1. autoclosed entry or discarded state: DISCARDED
/// 2. created entry (or pr-created state): NEW
/// 3. updated / commit-files entry, state not error: UPDATED
/// 4. no entries and no state marker: UNCHANGED
/// 5. error: ERROR, 6. pending: PENDING, 7. automerged: AUTOMERGED, 8. skipped: SKIPPED
/// 9. otherwise UNKNOWN
pub fn classify(record: &BranchRecord, entries: &[&DryRunEntry]) -> Status {
  let state = InlineState::parse(record.state.as_deref());
  let has = |kind: EntryKind| entries.iter().any(|e| e.kind == kind);

  if has(EntryKind::Autoclosed) || state == InlineState::Discarded {
    return Status::Discarded;
  }
  if has(EntryKind::Created) || state == InlineState::Created {
    return Status::New;
  }
  if (has(EntryKind::Updated) || has(EntryKind::CommitFiles)) && state != InlineState::Error {
    return Status::Updated;
  }
  if entries.is_empty() && matches!(state, InlineState::Absent | InlineState::Settled(_)) {
    return Status::Unchanged;
  }
  match state {
    InlineState::Error => Status::Error,
    InlineState::Pending => Status::Pending,
    InlineState::Automerged => Status::Automerged,
    InlineState::Skipped(_) => Status::Skipped,
    _ => Status::Unknown,
  }
}

/// Detail lines for the info view: the state explanation, then each entry's text.
pub fn details(record: &BranchRecord, entries: &[&DryRunEntry], status: Status) -> Vec<String> {
  let mut lines = Vec::new();
  if let Some(msg) = InlineState::parse(record.state.as_deref()).message() {
    lines.push(msg);
  } else if status == Status::Discarded {
    lines.push("PR would be discarded".into());
  }
  lines.extend(entries.iter().map(|e| e.detail()));
  lines
}
