//! Post-processing of generated release reports.
//!
//! Two unrelated consumers of text produced outside the engine:
//!
//! - [`parse_judge_response`] turns a free-text quality evaluation into
//!   scores. It never fails; unusable input collapses to a zeroed result
//!   whose [`JudgeOutcome`] says why.
//! - [`extract_json_object`] and [`audit_structured_report`] pull the JSON
//!   object out of a structuring stage's raw output and report gaps in it.
//!   The audit is advisory: findings are logged and returned, never enforced.
//!
//! # Judge response format
//!
//! ```text
//! Data accuracy: 45/50
//! Analysis depth: 25/30
//! Clarity: 18/20
//! TOTAL: 88/100
//! Evaluation: Solid, well grounded report.
//! ```

mod score;
mod structured;

pub use score::{FALLBACK_COMMENTARY, JudgeEvaluation, JudgeOutcome, parse_judge_response};
pub use structured::{AuditFinding, audit_structured_report, extract_json_object};

/// Result alias for the judge crate.
pub type JudgeResult<T> = std::result::Result<T, JudgeError>;

/// Errors from structured output extraction.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("no JSON object found in output")]
    NoJson,

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
