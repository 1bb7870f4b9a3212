//! `relharmony split`: Show the fragments between release banners.

use super::Context;
use crate::output;
use relharmony_core::VersionTag;
use relharmony_engine::{first_version, has_release_banner, split_into_fragments};
use serde::Serialize;
use std::path::Path;

const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Serialize)]
pub struct FragmentSummary {
    pub index: usize,
    pub chars: usize,
    pub first_version: Option<VersionTag>,
    pub text: String,
}

/// Summaries of every fragment in `text`, in input order.
pub fn summarize(text: &str) -> Vec<FragmentSummary> {
    split_into_fragments(text)
        .into_iter()
        .enumerate()
        .map(|(index, fragment)| FragmentSummary {
            index,
            chars: fragment.as_str().chars().count(),
            first_version: first_version(fragment.as_str()),
            text: fragment.as_str().to_string(),
        })
        .collect()
}

pub async fn run(ctx: &Context, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = ctx.read_report(path).await?;
    let banner = has_release_banner(&text);
    let fragments = summarize(&text);

    output::print_one(ctx.json, &fragments, |fragments| {
        let mut out = if banner {
            format!("{} fragment(s)\n", fragments.len())
        } else {
            "No release banner: single document\n".to_string()
        };
        for f in fragments.iter() {
            let version = f.first_version.as_ref().map_or("-", |v| v.as_str());
            let first_line = f.text.lines().next().unwrap_or_default();
            let preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
            out.push_str(&format!(
                "  [{}] {:<12} {:>7} chars  {}\n",
                f.index, version, f.chars, preview
            ));
        }
        out.trim_end().to_string()
    })
}
