//! Structured error types for the extraction engine.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Parse(#[from] ParseError),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

/// What is wrong with one configuration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemKind {
  Missing,
  WrongType { expected: &'static str },
  InvalidRegex(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyProblem {
  pub key: &'static str,
  pub kind: ProblemKind,
}

impl fmt::Display for KeyProblem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      ProblemKind::Missing => write!(f, "{}: missing", self.key),
      ProblemKind::WrongType { expected } => write!(f, "{}: expected {}", self.key, expected),
      ProblemKind::InvalidRegex(msg) => write!(f, "{}: invalid regex: {}", self.key, msg),
    }
  }
}

/// Every key that failed validation, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
  pub problems: Vec<KeyProblem>,
}

impl ConfigError {
  pub fn keys(&self) -> Vec<&'static str> {
    self.problems.iter().map(|p| p.key).collect()
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "config: ")?;
    for (i, problem) in self.problems.iter().enumerate() {
      if i > 0 {
        write!(f, "; ")?;
      }
      write!(f, "{}", problem)?;
    }
    Ok(())
  }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  #[error("parse: log file is empty")]
  EmptyLog,

  #[error("parse: no line matches branches_info_start_pattern; the branches info section is missing")]
  MissingBranchesInfo,
}
