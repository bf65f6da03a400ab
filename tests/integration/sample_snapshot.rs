use dry_run_report::extract_report;

use crate::common::{self, PATTERNS};

#[test]
fn sample_log_status_listing() {
  let model = extract_report(&common::read_fixture_text(common::SAMPLE_LOG), &PATTERNS).unwrap();
  let listing = model
    .repositories
    .iter()
    .flat_map(|r| r.pull_requests.iter().map(move |p| format!("{} | {} | {}", r.repository, p.status, p.title)))
    .collect::<Vec<_>>()
    .join("\n");

  insta::assert_snapshot!(listing, @r"
  org/app | NEW | Update dependency axios to v1.7.2
  org/app | UPDATED | Update dependency lodash to v4.17.21
  org/app | UNKNOWN | Update dependency eslint to v9
  org/app | SKIPPED | Update react monorepo to v18.3.1
  org/app | UNCHANGED | Update dependency typescript to v5.5.2
  org/app | AUTOMERGED | Update dependency jest to v29.7.0
  org/app | DISCARDED | Update dependency moment to v2.30.1
  org/lib | ERROR | Update Rust crate serde to v1.0.203
  org/lib | PENDING | Update Rust crate tokio to v1.38.0
  ");
}

#[test]
fn synthesized_record_details() {
  let model = extract_report(&common::read_fixture_text(common::SAMPLE_LOG), &PATTERNS).unwrap();
  let moment = model.pull_requests().find(|p| p.title.contains("moment")).unwrap();
  insta::assert_json_snapshot!(moment, @r#"
  {
    "title": "Update dependency moment to v2.30.1",
    "branch_name": "renovate/moment-2.x",
    "status": "DISCARDED",
    "state": "discarded",
    "upgrades": [],
    "details": [
      "PR would be discarded",
      "INFO: DRY-RUN: Would autoclose PR (repository=org/app, branch=renovate/moment-2.x)"
    ]
  }
  "#);
}
