use predicates::prelude::*;

use crate::common;

#[test]
fn html_report_lands_in_out_directory_with_timestamped_name() {
  let td = tempfile::TempDir::new().unwrap();
  let out_dir = td.path().join("reports");
  std::fs::create_dir_all(&out_dir).unwrap();

  common::cmd_bin()
    .args(["--log"])
    .arg(common::fixture(common::SAMPLE_LOG))
    .args(["--config"])
    .arg(common::fixture("config.json"))
    .args(["--out"])
    .arg(&out_dir)
    .args(["--now-override", "2025-06-24T12:00:00"])
    .assert()
    .success()
    .stdout(predicate::str::contains("DryRunovateReport_24-06-2025_12-00-00.html"));

  let html = std::fs::read_to_string(out_dir.join("DryRunovateReport_24-06-2025_12-00-00.html")).unwrap();
  assert!(html.contains("<title>Renovate PR-Report</title>"));
  assert!(html.contains("<option value=\"org/app\">org/app</option>"));
  assert!(html.contains("Update dependency moment to v2.30.1"));
  assert!(html.find("org/app").unwrap() < html.find("org/lib").unwrap());
}

#[test]
fn json_report_on_stdout() {
  let out = common::cmd_bin()
    .arg("--log")
    .arg(common::fixture(common::SAMPLE_LOG))
    .arg("--config")
    .arg(common::fixture("config.json"))
    .args(["--out", "-", "--format", "json"])
    .output()
    .unwrap();

  assert!(out.status.success());
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["summary"]["repositories"], 2);
  assert_eq!(v["summary"]["pull_requests"], 9);
  assert_eq!(v["summary"]["unassociated_entries"], 1);
}

#[test]
fn missing_branches_info_fails_that_log_only() {
  let td = tempfile::TempDir::new().unwrap();
  let out_dir = format!("{}/", td.path().display());

  common::cmd_bin()
    .arg("--log")
    .arg(common::fixture(common::SAMPLE_LOG))
    .arg("--log")
    .arg(common::fixture("no-branches-info.log"))
    .arg("--config")
    .arg(common::fixture("config.json"))
    .args(["--out", &out_dir, "--format", "json", "--now-override", "2025-06-24T12:00:00"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("branches info section is missing"))
    .stderr(predicate::str::contains("1 of 2 log(s) failed"));

  let good = td.path().join("DryRunovateReport_renovate-dry-run_24-06-2025_12-00-00.json");
  assert!(good.exists(), "the healthy log is still written");
  let bad = td.path().join("DryRunovateReport_no-branches-info_24-06-2025_12-00-00.json");
  assert!(!bad.exists());
}

#[test]
fn invalid_config_stops_the_run_with_the_key_named() {
  let td = tempfile::TempDir::new().unwrap();
  let mut config = common::config_value();
  let obj = config.as_object_mut().unwrap();
  obj.remove("timestamp_pattern");
  obj.insert("updated_branch_pattern".into(), serde_json::json!("(unclosed"));
  let config_path = td.path().join("config.json");
  std::fs::write(&config_path, serde_json::to_vec(&config).unwrap()).unwrap();

  common::cmd_bin()
    .arg("--log")
    .arg(common::fixture(common::SAMPLE_LOG))
    .arg("--config")
    .arg(&config_path)
    .args(["--out", "-"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("timestamp_pattern: missing"));
}

#[test]
fn several_logs_refuse_stdout() {
  common::cmd_bin()
    .arg("--log")
    .arg(common::fixture(common::SAMPLE_LOG))
    .arg("--log")
    .arg(common::fixture(common::SAMPLE_LOG))
    .arg("--config")
    .arg(common::fixture("config.json"))
    .args(["--out", "-"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("directory"));
}
