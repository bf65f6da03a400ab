use dry_run_report::model::EntryKind;
use dry_run_report::{EngineError, ParseError, Status, extract_report};

use crate::common::{self, PATTERNS, branches_section, ts};

fn statuses(text: &str, repository: &str) -> Vec<(String, Status)> {
  let model = extract_report(text, &PATTERNS).unwrap();
  model
    .repository(repository)
    .unwrap()
    .pull_requests
    .iter()
    .map(|p| (p.title.clone(), p.status))
    .collect()
}

#[test]
fn listed_branch_without_entries_is_unchanged() {
  let log = branches_section("org/a", &[("renovate/x", "Update x", "done")]);
  assert_eq!(statuses(&log, "org/a"), vec![("Update x".to_string(), Status::Unchanged)]);
}

#[test]
fn created_only_is_new() {
  let log = format!(
    "{}\n{}",
    ts("INFO: DRY-RUN: Would create branch renovate/x (repository=org/a, branch=renovate/x)"),
    branches_section("org/a", &[("renovate/x", "Update x", "done")])
  );
  assert_eq!(statuses(&log, "org/a"), vec![("Update x".to_string(), Status::New)]);
}

#[test]
fn created_wins_over_later_commit_files() {
  let log = format!(
    "{}\n{}\n{}",
    ts("INFO: DRY-RUN: Would create branch renovate/x (repository=org/a, branch=renovate/x)"),
    ts("INFO: DRY-RUN: Would commit files to branch renovate/x (repository=org/a, branch=renovate/x)"),
    branches_section("org/a", &[("renovate/x", "Update x", "done")])
  );
  assert_eq!(statuses(&log, "org/a"), vec![("Update x".to_string(), Status::New)]);
}

#[test]
fn autoclosed_branch_missing_from_listing_is_discarded_with_title() {
  let log = format!(
    "{}\n{}\n{}\n{}",
    ts("INFO: DRY-RUN: Would autoclose PR (repository=org/a, branch=renovate/gone)"),
    ts("\"prNo\": 4,"),
    ts("\"prTitle\": \"Update dependency gone to v2\""),
    branches_section("org/a", &[("renovate/x", "Update x", "done")])
  );
  assert_eq!(
    statuses(&log, "org/a"),
    vec![
      ("Update x".to_string(), Status::Unchanged),
      ("Update dependency gone to v2".to_string(), Status::Discarded),
    ]
  );
}

#[test]
fn autoclosed_anchor_near_end_keeps_empty_title() {
  let log = format!(
    "{}{}\n{}",
    branches_section("org/a", &[("renovate/x", "Update x", "done")]),
    ts("INFO: DRY-RUN: Would autoclose PR (repository=org/b)"),
    ts("\"prNo\": 4,")
  );
  let model = extract_report(&log, &PATTERNS).unwrap();
  let b = model.repository("org/b").unwrap();
  assert_eq!(b.pull_requests.len(), 1);
  assert_eq!(b.pull_requests[0].title, "");
  assert_eq!(b.pull_requests[0].status, Status::Discarded);
  assert_eq!(model.repository_names(), vec!["org/a", "org/b"]);
}

#[test]
fn missing_section_is_parse_error() {
  let text = common::read_fixture_text("no-branches-info.log");
  let err = extract_report(&text, &PATTERNS).unwrap_err();
  assert!(matches!(err, EngineError::Parse(ParseError::MissingBranchesInfo)));
}

#[test]
fn entry_for_unknown_branch_is_kept_as_unassociated() {
  let log = format!(
    "{}\n{}",
    ts("INFO: DRY-RUN: Would update branch renovate/other (repository=org/a, branch=renovate/other)"),
    branches_section("org/a", &[("renovate/x", "Update x", "done")])
  );
  let model = extract_report(&log, &PATTERNS).unwrap();
  assert_eq!(model.unassociated.len(), 1);
  assert_eq!(model.unassociated[0].kind, EntryKind::Updated);
  assert_eq!(model.unassociated[0].line, 1);
  assert_eq!(model.pull_requests().next().unwrap().status, Status::Unchanged);
}

#[test]
fn sample_log_covers_every_status_once() {
  common::init_tracing();
  let model = extract_report(&common::read_fixture_text(common::SAMPLE_LOG), &PATTERNS).unwrap();

  assert_eq!(model.repository_names(), vec!["org/app", "org/lib"]);
  for status in Status::ALL {
    assert_eq!(model.summary.statuses.get(&status), Some(&1), "{}", status);
  }

  let react = model.pull_requests().find(|p| p.title.starts_with("Update react")).unwrap();
  assert_eq!(react.upgrades.len(), 2);
  assert_eq!(react.details, vec!["PR limit reached for this repository".to_string()]);

  let serde = model.pull_requests().find(|p| p.title.contains("serde")).unwrap();
  assert_eq!(serde.upgrades[0].current_version.as_deref(), Some("1.0.200"));
}
