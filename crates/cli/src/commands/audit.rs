//! `relharmony audit`: Check a structured JSON report for gaps.
//!
//! Advisory only: findings are printed and the command still succeeds.

use super::Context;
use crate::{input, output};
use relharmony_judge::{audit_structured_report, extract_json_object};
use std::path::Path;

pub async fn run(ctx: &Context, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = input::read_input(path).await?;
    let report = extract_json_object(&raw)?;
    let findings = audit_structured_report(&report);
    tracing::info!(findings = findings.len(), "structured report audited");

    output::print_one(ctx.json, &findings, |findings| {
        if findings.is_empty() {
            return "✅ No findings".to_string();
        }
        let mut out = format!("{} finding(s):\n", findings.len());
        for f in findings.iter() {
            out.push_str(&format!("  ⚠️  {f}\n"));
        }
        out.trim_end().to_string()
    })
}
