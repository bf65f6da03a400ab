//! The log as an ordered sequence of lines, plus a timestamp-stripped view.

use std::borrow::Cow;

use regex::Captures;

use crate::patterns::LinePattern;
use crate::timestamp::TimestampNormalizer;

/// Raw log text split into trimmed lines. Blank lines are kept so that
/// positional lookahead counts physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDocument {
  lines: Vec<String>,
}

impl LogDocument {
  pub fn from_text(text: &str) -> Self {
    Self {
      lines: text.lines().map(|l| l.trim().to_string()).collect(),
    }
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// True when no line carries any text.
  pub fn is_blank(&self) -> bool {
    self.lines.iter().all(|l| l.is_empty())
  }

  pub fn scan<'a>(&'a self, normalizer: &TimestampNormalizer) -> ScannedDocument<'a> {
    ScannedDocument {
      lines: self
        .lines
        .iter()
        .map(|raw| ScannedLine { raw: raw.as_str(), content: normalizer.strip(raw) })
        .collect(),
    }
  }
}

/// One line as read and with its timestamps removed.
#[derive(Debug, Clone)]
pub struct ScannedLine<'a> {
  pub raw: &'a str,
  pub content: Cow<'a, str>,
}

impl ScannedLine<'_> {
  /// Match against the raw line first, then the timestamp-free content.
  pub fn captures(&self, re: &LinePattern) -> Option<Captures<'_>> {
    re.captures(self.raw).or_else(|| re.captures(&self.content))
  }

  pub fn is_match(&self, re: &LinePattern) -> bool {
    re.is_match(self.raw) || re.is_match(&self.content)
  }
}

#[derive(Debug, Clone)]
pub struct ScannedDocument<'a> {
  lines: Vec<ScannedLine<'a>>,
}

impl<'a> ScannedDocument<'a> {
  pub fn lines(&self) -> &[ScannedLine<'a>] {
    &self.lines
  }

  /// Bounded lookahead: `None` when `anchor + offset` falls past the last line.
  pub fn lookahead(&self, anchor: usize, offset: usize) -> Option<&ScannedLine<'a>> {
    anchor.checked_add(offset).and_then(|i| self.lines.get(i))
  }
}
