// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render a ReportModel as a standalone HTML page or pretty JSON
// role: rendering/output
// inputs: ReportModel, OutputFormat
// outputs: String (HTML document or JSON text)
// side_effects: none; callers write the result
// invariants:
// - every log-derived string is HTML-escaped before it reaches the page
// - dropdown options and tables follow repository order in the model
// - a record with N upgrades spans N rows; a record without upgrades shows N/A cells
// errors: Json serialization errors only
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{PullRequestRecord, ReportModel, Upgrade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  Html,
  Json,
}

impl OutputFormat {
  pub fn extension(self) -> &'static str {
    match self {
      OutputFormat::Html => "html",
      OutputFormat::Json => "json",
    }
  }
}

pub fn render(model: &ReportModel, format: OutputFormat) -> Result<String> {
  match format {
    OutputFormat::Html => Ok(render_html(model)),
    OutputFormat::Json => Ok(serde_json::to_string_pretty(model)?),
  }
}

const NA: &str = "N/A";

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Renovate PR-Report</title>
<style>
body { font-family: Arial, sans-serif; margin: 20px; }
h1 { color: #2c3e50; }
.filter-container { margin: 20px 0; }
.repository-dropdown { padding: 10px; font-size: 16px; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
table, th, td { border: 1px solid #bdc3c7; }
th, td { padding: 10px; text-align: left; }
th { background-color: #ecf0f1; }
caption { font-weight: bold; text-align: left; padding: 6px 0; }
.hidden { display: none; }
.warning { color: #c0392b; }
.modal { background-color: rgba(0,0,0,0.8); display: none; position: fixed; z-index: 2; left: 0; top: 0; width: 100%; height: 100%; overflow: auto; }
.modal-content { background-color: #fefefe; margin: 10% auto; padding: 20px; border: 1px solid #888; width: 80%; max-width: 800px; border-radius: 8px; position: relative; white-space: pre-line; }
.close { color: #aaa; position: absolute; top: 10px; right: 20px; font-size: 28px; font-weight: bold; cursor: pointer; }
.question-icon { cursor: pointer; font-size: 18px; margin-left: 5px; color: #3498db; vertical-align: middle; }
</style>
<script>
function filterByRepository() {
  const selected = document.getElementById("repositoryDropdown").value;
  document.querySelectorAll(".repository-table").forEach(table => {
    table.classList.toggle("hidden", !(selected === "all" || table.dataset.repository === selected));
  });
}
function showModal(icon) {
  document.getElementById("modalContent").textContent = icon.dataset.detail;
  document.getElementById("resultModal").style.display = "block";
}
function closeModal() {
  document.getElementById("resultModal").style.display = "none";
}
window.onclick = function(event) {
  const modal = document.getElementById("resultModal");
  if (event.target == modal) { modal.style.display = "none"; }
}
</script>
</head>
<body>
<h1>Renovate PR-Report</h1>
"#;

const TABLE_HEAD: &str = "<thead>\n<tr><th>PR Title</th><th>Branch Name</th><th>PR Status</th><th>Dependency Name</th><th>Current</th><th>New</th></tr>\n</thead>\n";

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

fn display_name(repository: &str) -> &str {
  if repository.is_empty() { NA } else { repository }
}

fn or_na(value: Option<&String>) -> String {
  escape_html(value.map(String::as_str).unwrap_or(NA))
}

pub fn render_html(model: &ReportModel) -> String {
  let mut html = String::from(HEAD);

  html.push_str("<div class=\"filter-container\">\n<label for=\"repositoryDropdown\">Filter by Repository:</label>\n");
  html.push_str("<select id=\"repositoryDropdown\" class=\"repository-dropdown\" onchange=\"filterByRepository()\">\n");
  html.push_str("<option value=\"all\">All</option>\n");
  for repo in &model.repositories {
    let name = escape_html(&repo.repository);
    html.push_str(&format!("<option value=\"{}\">{}</option>\n", name, escape_html(display_name(&repo.repository))));
  }
  html.push_str("</select>\n</div>\n");

  html.push_str("<div id=\"resultModal\" class=\"modal\">\n<div class=\"modal-content\">\n");
  html.push_str("<span class=\"close\" onclick=\"closeModal()\">&times;</span>\n<div id=\"modalContent\"></div>\n</div>\n</div>\n");

  for repo in &model.repositories {
    html.push_str(&format!(
      "<table class=\"repository-table\" data-repository=\"{}\">\n<caption class=\"repository\">{}</caption>\n",
      escape_html(&repo.repository),
      escape_html(display_name(&repo.repository))
    ));
    html.push_str(TABLE_HEAD);
    html.push_str("<tbody>\n");
    for pr in &repo.pull_requests {
      push_rows(&mut html, pr);
    }
    html.push_str("</tbody>\n</table>\n");
    for warning in &repo.warnings {
      html.push_str(&format!("<p class=\"warning\">{}</p>\n", escape_html(warning)));
    }
  }

  if !model.unassociated.is_empty() {
    html.push_str("<h2>Unassociated dry-run entries</h2>\n<ul class=\"unassociated\">\n");
    for entry in &model.unassociated {
      html.push_str(&format!("<li>line {}: {}</li>\n", entry.line, escape_html(&entry.text)));
    }
    html.push_str("</ul>\n");
  }

  html.push_str("</body>\n</html>\n");
  html
}

fn upgrade_cells(up: &Upgrade) -> String {
  format!(
    "<td>{}</td><td>{}</td><td>{}</td>",
    or_na(up.dep_name.as_ref()),
    or_na(up.current_version.as_ref()),
    or_na(up.new_version.as_ref())
  )
}

fn push_rows(html: &mut String, pr: &PullRequestRecord) {
  let span = pr.upgrades.len().max(1);
  let title = if pr.title.is_empty() { NA.to_string() } else { escape_html(&pr.title) };
  let detail = escape_html(&pr.details.join("\n"));
  let status = format!(
    "{}<span class=\"question-icon\" title=\"Click for more info\" data-detail=\"{}\" onclick=\"showModal(this)\">&#x2753;</span>",
    pr.status, detail
  );
  let first = match pr.upgrades.first() {
    Some(up) => upgrade_cells(up),
    None => format!("<td>{NA}</td><td>{NA}</td><td>{NA}</td>"),
  };

  html.push_str(&format!(
    "<tr><td rowspan=\"{span}\">{title}</td><td rowspan=\"{span}\">{branch}</td><td rowspan=\"{span}\">{status}</td>{first}</tr>\n",
    branch = or_na(pr.branch_name.as_ref()),
  ));
  for up in pr.upgrades.iter().skip(1) {
    html.push_str(&format!("<tr>{}</tr>\n", upgrade_cells(up)));
  }
}
