//! `relharmony extract`: Extract the four sections from one fragment.

use super::Context;
use crate::output;
use relharmony_core::SectionKey;
use relharmony_engine::{extract_sections, split_into_fragments};
use std::path::Path;

pub async fn run(
    ctx: &Context,
    path: &Path,
    index: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = ctx.read_report(path).await?;
    let fragments = split_into_fragments(&text);
    let fragment = fragments.get(index).ok_or_else(|| {
        format!(
            "Fragment {index} does not exist (input has {} fragment(s))",
            fragments.len()
        )
    })?;

    let sections = extract_sections(fragment.as_str());

    output::print_one(ctx.json, &sections, |sections| {
        let mut out = format!(
            "Dialect:  {}\nSections: {}/{} found\n",
            sections.dialect,
            sections.found_count(),
            SectionKey::ALL.len()
        );
        for key in SectionKey::ALL {
            let mark = if sections.get(key).is_found() { "✅" } else { "❌" };
            out.push_str(&format!("  {mark} {}\n", key.label()));
        }
        out.push('\n');
        out.push_str(sections.combined().trim_end());
        out
    })
}
