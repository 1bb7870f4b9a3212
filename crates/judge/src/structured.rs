//! Structured report extraction and advisory audit.

use crate::{JudgeError, JudgeResult};
use regex_lite::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

const REQUIRED_SECTIONS: [&str; 3] = ["release_scope", "critical_metrics", "health_trends"];

const REQUIRED_SCOPE_KEYS: [&str; 3] = ["Release Epics", "Release PIRs", "SFDC Defects Fixed"];

const TREND_FIELDS: [&str; 5] = ["Criteria", "Previous", "Current", "Status", "Summary"];

static FENCED_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("static regex must compile")
});

/// Pull a JSON object out of free-form model output.
///
/// A ```` ```json ```` fenced block is preferred; otherwise the span from the
/// first `{` to the last `}` is parsed.
pub fn extract_json_object(raw: &str) -> JudgeResult<Value> {
    let candidate = FENCED_JSON_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .or_else(|| brace_span(raw))
        .ok_or(JudgeError::NoJson)?;

    let value: Value = serde_json::from_str(candidate)?;
    if !value.is_object() {
        return Err(JudgeError::NotAnObject(json_kind(&value)));
    }
    debug!(bytes = candidate.len(), "extracted structured report");
    Ok(value)
}

fn brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A gap in a structured report. Paths are JSON keys from the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditFinding {
    MissingSection { section: String },
    MissingKey { path: Vec<String> },
    UnexpectedShape { path: Vec<String> },
    NullValue { path: Vec<String> },
    IncompleteTrend { path: Vec<String>, field: String },
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditFinding::MissingSection { section } => write!(f, "missing section {section}"),
            AuditFinding::MissingKey { path } => write!(f, "missing key {}", path.join(" -> ")),
            AuditFinding::UnexpectedShape { path } => {
                write!(f, "unexpected shape at {}", path.join(" -> "))
            }
            AuditFinding::NullValue { path } => write!(f, "null value at {}", path.join(" -> ")),
            AuditFinding::IncompleteTrend { path, field } => {
                write!(f, "incomplete trend {}: missing or empty {field}", path.join(" -> "))
            }
        }
    }
}

/// Check a structured report for missing sections, keys and values.
///
/// Every finding is logged at warn level. Nothing is rejected.
pub fn audit_structured_report(report: &Value) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    for section in REQUIRED_SECTIONS {
        if report.get(section).is_none() {
            findings.push(AuditFinding::MissingSection {
                section: section.to_string(),
            });
        }
    }

    if let Some(scope) = section_object(report, "release_scope", &mut findings) {
        audit_release_scope(scope, &mut findings);
    }
    if let Some(metrics) = section_object(report, "critical_metrics", &mut findings) {
        for (metric, versions) in metrics {
            audit_versioned_nulls(&["critical_metrics", metric.as_str()], versions, &mut findings);
        }
    }
    if let Some(trends) = section_object(report, "health_trends", &mut findings) {
        for (metric, versions) in trends {
            audit_trend(metric, versions, &mut findings);
        }
    }

    for finding in &findings {
        warn!(%finding, "structured report audit");
    }
    findings
}

/// The section as an object. A present non-object section is a finding.
fn section_object<'a>(
    report: &'a Value,
    section: &str,
    findings: &mut Vec<AuditFinding>,
) -> Option<&'a Map<String, Value>> {
    let value = report.get(section)?;
    let object = value.as_object();
    if object.is_none() {
        findings.push(AuditFinding::UnexpectedShape {
            path: path(&[section]),
        });
    }
    object
}

fn audit_release_scope(scope: &Map<String, Value>, findings: &mut Vec<AuditFinding>) {
    for key in REQUIRED_SCOPE_KEYS {
        match scope.get(key) {
            Some(versions) => audit_versioned_nulls(&["release_scope", key], versions, findings),
            None => findings.push(AuditFinding::MissingKey {
                path: path(&["release_scope", key]),
            }),
        }
    }
}

/// `{ version: { field: value } }` with no null values.
fn audit_versioned_nulls(prefix: &[&str], versions: &Value, findings: &mut Vec<AuditFinding>) {
    let Some(versions) = versions.as_object() else {
        findings.push(AuditFinding::UnexpectedShape { path: path(prefix) });
        return;
    };
    for (version, fields) in versions {
        let mut at = path(prefix);
        at.push(version.clone());
        let Some(fields) = fields.as_object() else {
            findings.push(AuditFinding::UnexpectedShape { path: at });
            continue;
        };
        for (name, value) in fields {
            if value.is_null() {
                let mut at = at.clone();
                at.push(name.clone());
                findings.push(AuditFinding::NullValue { path: at });
            }
        }
    }
}

/// Each version of a trend metric needs every trend field, non-empty.
fn audit_trend(metric: &str, versions: &Value, findings: &mut Vec<AuditFinding>) {
    let Some(versions) = versions.as_object() else {
        findings.push(AuditFinding::UnexpectedShape {
            path: path(&["health_trends", metric]),
        });
        return;
    };
    for (version, details) in versions {
        let at = path(&["health_trends", metric, version.as_str()]);
        for field in TREND_FIELDS {
            let present = details
                .get(field)
                .is_some_and(|v| !v.is_null() && v.as_str() != Some(""));
            if !present {
                findings.push(AuditFinding::IncompleteTrend {
                    path: at.clone(),
                    field: field.to_string(),
                });
            }
        }
    }
}

fn path(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}
