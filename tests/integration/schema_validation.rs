use jsonschema::validator_for;

use dry_run_report::extract_report;
use dry_run_report::render::{OutputFormat, render};

use crate::common::{self, PATTERNS};

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

#[test]
fn json_report_conforms_to_schema() {
  let model = extract_report(&common::read_fixture_text(common::SAMPLE_LOG), &PATTERNS).unwrap();
  let text = render(&model, OutputFormat::Json).unwrap();
  let v: serde_json::Value = serde_json::from_str(&text).unwrap();

  let compiled = compile_schema("report.schema.json");
  compiled.validate(&v).expect("schema validation failed for JSON report");
}

#[test]
fn cli_json_output_conforms_to_schema() {
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
  compile_schema("report.schema.json").validate(&v).expect("schema validation failed for CLI JSON");
}

#[test]
fn schema_rejects_unknown_status() {
  let model = extract_report(&common::read_fixture_text(common::SAMPLE_LOG), &PATTERNS).unwrap();
  let mut v = serde_json::to_value(&model).unwrap();
  v["repositories"][0]["pull_requests"][0]["status"] = serde_json::json!("MAYBE");
  assert!(!compile_schema("report.schema.json").is_valid(&v));
}
