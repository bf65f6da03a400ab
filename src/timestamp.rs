//! Timestamp handling shared by every pattern.
//!
//! Patterns reference "a timestamp goes here" through a placeholder token which
//! is substituted with `timestamp_base_pattern` before compilation. Lines are
//! matched both as read and with timestamps stripped.

use std::borrow::Cow;

use regex::Regex;

#[derive(Debug, Clone)]
pub struct TimestampNormalizer {
  base: String,
  placeholder: String,
  timestamp: Option<Regex>,
}

impl TimestampNormalizer {
  pub fn new(base: &str, placeholder: &str) -> Self {
    Self {
      base: base.to_string(),
      placeholder: placeholder.to_string(),
      timestamp: None,
    }
  }

  /// Attach the compiled (already expanded) `timestamp_pattern`.
  pub fn with_timestamp(mut self, timestamp: Regex) -> Self {
    self.timestamp = Some(timestamp);
    self
  }

  /// Replace every placeholder occurrence with the base pattern.
  ///
  /// An empty placeholder expands nothing; a template without the placeholder
  /// comes back unchanged.
  pub fn expand(&self, template: &str) -> String {
    if self.placeholder.is_empty() {
      return template.to_string();
    }
    template.replace(&self.placeholder, &self.base)
  }

  /// Remove every timestamp substring from `line`.
  pub fn strip<'a>(&self, line: &'a str) -> Cow<'a, str> {
    match &self.timestamp {
      Some(re) => re.replace_all(line, ""),
      None => Cow::Borrowed(line),
    }
  }
}
