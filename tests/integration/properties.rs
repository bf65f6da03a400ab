use proptest::prelude::*;

use dry_run_report::patterns::KEYS;
use dry_run_report::{PatternConfig, extract_report};

use crate::common::{self, PATTERNS, branches_section};

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn removing_any_key_names_that_key(index in 0..KEYS.len()) {
    let mut config = common::config_value();
    config.as_object_mut().unwrap().remove(KEYS[index]);
    let err = PatternConfig::from_value(&config).unwrap_err();
    prop_assert_eq!(err.keys(), vec![KEYS[index]]);
  }

  #[test]
  fn repository_groups_follow_block_order(names in prop::collection::vec("[a-z]{1,8}/[a-z]{1,8}", 1..6)) {
    let mut seen: Vec<String> = Vec::new();
    for name in &names {
      if !seen.contains(name) {
        seen.push(name.clone());
      }
    }
    let log: String = names
      .iter()
      .map(|n| branches_section(n, &[("renovate/x", "Update x", "done")]))
      .collect();

    let model = extract_report(&log, &PATTERNS).unwrap();
    prop_assert_eq!(model.repository_names(), seen.iter().map(String::as_str).collect::<Vec<_>>());
    prop_assert_eq!(model.summary.pull_requests, names.len());
  }

  #[test]
  fn extraction_is_deterministic(names in prop::collection::vec("[a-z]{1,8}", 1..4)) {
    let log: String = names
      .iter()
      .map(|n| branches_section(n, &[("renovate/a", "A", "pr-edited"), ("renovate/b", "B", "done")]))
      .collect();
    let first = extract_report(&log, &PATTERNS).unwrap();
    let second = extract_report(&log, &PATTERNS).unwrap();
    prop_assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
  }
}

#[test]
fn full_config_validates() {
  let config = PatternConfig::from_value(&common::config_value()).unwrap();
  assert!(config.validate().is_ok());
}
