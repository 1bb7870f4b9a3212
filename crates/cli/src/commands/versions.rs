//! `relharmony versions`: List the version tags in an input.

use super::Context;
use crate::output;
use relharmony_engine::identify_versions;
use std::path::Path;

pub async fn run(ctx: &Context, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = ctx.read_report(path).await?;
    let versions = identify_versions(&text);

    output::print_one(ctx.json, &versions, |versions| {
        if versions.is_empty() {
            return "No version tags found.".to_string();
        }
        versions
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    })
}
