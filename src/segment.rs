// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Locate branches info sections and split them into per-repository blocks
// role: parsing/segmentation
// inputs: ScannedDocument, PatternSet (start/end markers, repository name)
// outputs: BranchesSection with spans and RepositoryBlocks in encounter order
// invariants:
// - a span runs from its start marker (inclusive) to the first later end marker (exclusive)
// - a missing end marker extends the span to document end
// - a block runs from a repository-name line to the line before the next one or span end
// errors: ParseError::MissingBranchesInfo when no start marker exists; malformed block bodies degrade to warnings
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::branches::parse_block_body;
use crate::document::ScannedDocument;
use crate::error::ParseError;
use crate::model::{BranchesSection, RepositoryBlock, SectionSpan};
use crate::patterns::PatternSet;

/// Find every branches info span. A log covering several repositories repeats
/// the section; later spans are appended in order.
pub fn find_spans(doc: &ScannedDocument<'_>, patterns: &PatternSet) -> Vec<SectionSpan> {
  let lines = doc.lines();
  let mut spans = Vec::new();
  let mut cursor = 0;

  while let Some(start) = (cursor..lines.len()).find(|&i| lines[i].is_match(&patterns.branches_info_start)) {
    let end = (start + 1..lines.len()).find(|&i| lines[i].is_match(&patterns.branches_info_end));
    spans.push(SectionSpan { start, end });
    match end {
      // the end marker line may itself open the next section
      Some(e) => cursor = e,
      None => {
        tracing::warn!(line = start + 1, "branches info section has no end marker; reading to end of log");
        break;
      }
    }
  }

  spans
}

pub fn segment(doc: &ScannedDocument<'_>, patterns: &PatternSet) -> Result<BranchesSection, ParseError> {
  let spans = find_spans(doc, patterns);
  if spans.is_empty() {
    return Err(ParseError::MissingBranchesInfo);
  }

  let mut blocks = Vec::new();
  for span in &spans {
    blocks.extend(split_blocks(doc, patterns, *span));
  }

  tracing::info!(sections = spans.len(), blocks = blocks.len(), "branches info segmented");
  Ok(BranchesSection { spans, blocks })
}

fn split_blocks(doc: &ScannedDocument<'_>, patterns: &PatternSet, span: SectionSpan) -> Vec<RepositoryBlock> {
  let lines = doc.lines();
  let end = span.end.unwrap_or(lines.len());

  let headers: Vec<(usize, String)> = (span.start..end)
    .filter_map(|i| {
      lines[i].captures(&patterns.repository_name).map(|caps| {
        let name = caps.get(1).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
        (i, name)
      })
    })
    .collect();

  if let Some((first, _)) = headers.first() {
    if *first > span.start + 1 {
      tracing::debug!(skipped = first - span.start, "lines before the first repository name ignored");
    }
  }

  headers
    .iter()
    .enumerate()
    .map(|(n, (header_line, name))| {
      let body_end = headers.get(n + 1).map(|(next, _)| *next).unwrap_or(end);
      if name.is_empty() {
        tracing::warn!(line = header_line + 1, "repository name capture is empty");
      }
      let (records, warning) = match parse_block_body(&lines[header_line + 1..body_end]) {
        Ok(records) => (records, None),
        Err(reason) => {
          tracing::warn!(repository = %name, line = header_line + 1, %reason, "branches info block skipped");
          (Vec::new(), Some(reason))
        }
      };
      RepositoryBlock {
        name: name.clone(),
        header_line: *header_line,
        records,
        warning,
      }
    })
    .collect()
}
