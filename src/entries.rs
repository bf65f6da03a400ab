// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Scan the whole log for dry-run action entries, including multi-line autoclosed entries
// role: parsing/extraction
// inputs: ScannedDocument, PatternSet (general/autoclosed/title/tag patterns, title offset)
// outputs: Vec<DryRunEntry> in document order
// invariants:
// - tag precedence is autoclosed > updated > created > commit-files > general, first match wins
// - the autoclosed title is read exactly `autoclosed_title_offset` lines below the anchor
// - a title line past the end of the log yields an entry without title, never an error
// errors: none; unresolved titles are logged and left empty
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use regex::Captures;

use crate::document::{ScannedDocument, ScannedLine};
use crate::model::{DryRunEntry, EntryKind};
use crate::patterns::{LinePattern, PatternSet};

pub fn extract_all(doc: &ScannedDocument<'_>, patterns: &PatternSet) -> Vec<DryRunEntry> {
  let mut entries = Vec::new();

  for (index, line) in doc.lines().iter().enumerate() {
    if let Some(caps) = line.captures(&patterns.dry_run_autoclosed) {
      let pr_title = autoclosed_title(doc, patterns, index);
      entries.push(DryRunEntry {
        line: index + 1,
        kind: EntryKind::Autoclosed,
        repository: named(&caps, "repository_name"),
        branch_name: named(&caps, "branch_name"),
        pr_title,
        info: None,
        text: line.content.to_string(),
      });
    } else if let Some(caps) = line.captures(&patterns.dry_run_general) {
      let info = named(&caps, "info");
      entries.push(DryRunEntry {
        line: index + 1,
        kind: tag(line, info.as_deref(), patterns),
        repository: named(&caps, "repository_name"),
        branch_name: named(&caps, "branch_name"),
        pr_title: None,
        info,
        text: line.content.to_string(),
      });
    }
  }

  let autoclosed = entries.iter().filter(|e| e.kind == EntryKind::Autoclosed).count();
  tracing::info!(entries = entries.len(), autoclosed, "dry-run entries extracted");
  entries
}

/// Sub-kind of a general entry; tested on the `info` capture when present,
/// otherwise on the line itself (so tag patterns then have to be line prefixes).
fn tag(line: &ScannedLine<'_>, info: Option<&str>, patterns: &PatternSet) -> EntryKind {
  let hit = |re: &LinePattern| match info {
    Some(text) => re.is_match(text),
    None => line.is_match(re),
  };

  if hit(&patterns.updated_branch) {
    EntryKind::Updated
  } else if hit(&patterns.created_branch) {
    EntryKind::Created
  } else if hit(&patterns.committed_files) {
    EntryKind::CommitFiles
  } else {
    EntryKind::General
  }
}

/// Read the PR title from the line at the configured offset below the anchor.
pub fn autoclosed_title(doc: &ScannedDocument<'_>, patterns: &PatternSet, anchor: usize) -> Option<String> {
  let offset = patterns.autoclosed_title_offset;
  let Some(line) = doc.lookahead(anchor, offset) else {
    tracing::warn!(
      line = anchor + 1,
      offset,
      "autoclosed entry title line is past the end of the log"
    );
    return None;
  };

  match line.captures(&patterns.autoclosed_title) {
    Some(caps) => named(&caps, "pr_title").or_else(|| caps.get(1).map(|m| m.as_str().to_string())),
    None => {
      tracing::warn!(
        line = anchor + 1,
        offset,
        found = %line.content,
        "autoclosed entry title not found at the configured offset"
      );
      None
    }
  }
}

fn named(caps: &Captures<'_>, name: &str) -> Option<String> {
  caps.name(name).map(|m| m.as_str().to_string()).filter(|s| !s.is_empty())
}
