//! Reads the branch listing inside one repository block.
//!
//! The block body is the field list of a JSON object printed across several
//! log lines; with timestamps stripped and the lines joined it parses as one
//! object whose `branchesInformation` array holds the branches.

use crate::document::ScannedLine;
use crate::ext::serde_json::JsonFetch;
use crate::model::{BranchRecord, Upgrade};

/// Parse the body lines of a repository block into branch records.
///
/// Returns `Err` with a readable reason when the body is not valid JSON or
/// `branchesInformation` is not an array; callers treat that as degraded.
pub fn parse_block_body(lines: &[ScannedLine<'_>]) -> Result<Vec<BranchRecord>, String> {
  let joined = lines.iter().map(|l| l.content.as_ref()).collect::<Vec<_>>().join("\n");
  let trimmed = joined.trim();
  let text = if trimmed.starts_with('{') { trimmed.to_string() } else { format!("{{{}}}", trimmed) };

  let value: serde_json::Value =
    serde_json::from_str(&text).map_err(|e| format!("branches info is not valid JSON: {}", e))?;

  let info = value.fetch("branchesInformation");
  if !info.is_present() {
    return Ok(Vec::new());
  }
  let items = info
    .raw()
    .and_then(|v| v.as_array())
    .ok_or_else(|| "branchesInformation is not an array".to_string())?;

  Ok(items.iter().map(branch_record).collect())
}

fn branch_record(item: &serde_json::Value) -> BranchRecord {
  let upgrades = item
    .fetch("upgrades")
    .raw()
    .and_then(|v| v.as_array())
    .map(|list| list.iter().map(upgrade).collect())
    .unwrap_or_default();

  BranchRecord {
    branch_name: item.fetch("branchName").to_text(),
    pr_title: item.fetch("prTitle").to_text(),
    pr_number: item.fetch("prNo").to::<u64>(),
    state: item.fetch("result").to_text(),
    upgrades,
  }
}

fn upgrade(item: &serde_json::Value) -> Upgrade {
  Upgrade {
    dep_name: item.first_of(&["packageName", "depName"]).to_text(),
    current_version: item.first_of(&["currentVersion", "currentValue"]).to_text(),
    new_version: item.first_of(&["newVersion", "newValue"]).to_text(),
    update_type: item.fetch("updateType").to_text(),
  }
}
