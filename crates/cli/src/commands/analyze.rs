//! `relharmony analyze`: Run the full extraction and harmonization pipeline.

use super::{Context, sanitize_options};
use crate::{input, output};
use relharmony_config::AppConfig;
use relharmony_engine::{Analysis, AnalysisRequest, Analyzer, AnalyzerSettings};
use std::path::Path;

/// Map configuration onto engine settings.
pub fn analyzer_settings(config: &AppConfig) -> AnalyzerSettings {
    AnalyzerSettings {
        sanitize: sanitize_options(config),
        pairing: config.pipeline.pairing,
        preview_chars: config.pipeline.preview_chars,
    }
}

pub async fn run(
    ctx: &Context,
    path: &Path,
    product: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    let settings = analyzer_settings(&config);
    let markdown_text = input::read_input(path).await?;
    tracing::debug!(
        input = %path.display(),
        chars = markdown_text.len(),
        pairing = %settings.pairing,
        "read analysis input"
    );
    let request = AnalysisRequest::new(
        markdown_text,
        product.unwrap_or_else(|| config.default_product.clone()),
    );

    let analysis =
        tokio::task::spawn_blocking(move || Analyzer::new(settings).analyze(&request)).await??;

    output::print_one(ctx.json, &analysis, |analysis| match analysis {
        Analysis::SingleDocument { product, text } => format!(
            "No release banner found: single {product} report ({} chars), harmonization skipped.\n\n{}",
            text.chars().count(),
            text.trim()
        ),
        Analysis::MultiVersion(run) => run.harmonized.to_markdown(),
    })
}
