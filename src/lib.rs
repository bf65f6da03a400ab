//! Turn a Renovate dry-run log into a per-repository pull request report.
//!
//! The pipeline is: [`patterns::PatternSet`] (validated configuration) →
//! [`document::LogDocument`] → [`segment`] (branches info blocks) and
//! [`entries`] (dry-run action lines) → [`classify`] → [`report::extract_report`]
//! producing a [`model::ReportModel`], which [`render`] turns into HTML or JSON.

pub mod branches;
pub mod classify;
pub mod cli;
pub mod document;
pub mod entries;
pub mod error;
pub mod ext;
pub mod model;
pub mod patterns;
pub mod render;
pub mod report;
pub mod runner;
pub mod segment;
pub mod timestamp;
pub mod util;

pub use error::{ConfigError, EngineError, ParseError};
pub use model::{PullRequestRecord, ReportModel, Status};
pub use patterns::{PatternConfig, PatternSet};
pub use report::extract_report;
