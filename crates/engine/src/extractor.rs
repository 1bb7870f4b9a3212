//! Dialect-aware section extraction for one fragment.

use crate::capture::{capture_clean, capture_noisy_bold, capture_noisy_markdown};
use crate::tables;
use relharmony_core::headings::{self, Heading, HeadingStyle};
use relharmony_core::{Dialect, ExtractedSection, ExtractedSections, RenderedSection, SectionKey};
use tracing::debug;

/// Extract the four report sections from one fragment.
///
/// The result always holds an entry for every [`SectionKey`]; sections that
/// cannot be located are [`ExtractedSection::NotFound`]. Noisy fragments also
/// carry their auxiliary tables.
pub fn extract_sections(fragment: &str) -> ExtractedSections {
    let dialect = Dialect::detect(fragment);
    let mut entries = Vec::with_capacity(SectionKey::EXTRACTION_ORDER.len() + 1);

    match dialect {
        Dialect::Clean => {
            for key in SectionKey::EXTRACTION_ORDER {
                let heading = headings::clean_heading(key);
                let section = match capture_clean(fragment, heading) {
                    Some(body) => ExtractedSection::Found(body.to_string()),
                    None => ExtractedSection::NotFound,
                };
                entries.push(RenderedSection::new(Some(key), heading, section));
            }
        }
        Dialect::Noisy => {
            let mut shadowed = Vec::new();
            for key in SectionKey::EXTRACTION_ORDER {
                let (section, extra) = extract_noisy(fragment, key);
                entries.push(section);
                shadowed.extend(extra);
            }
            for heading in headings::auxiliary(dialect) {
                let section = match capture_noisy(fragment, heading) {
                    Some(body) => ExtractedSection::Found(body.to_string()),
                    None => ExtractedSection::NotFound,
                };
                entries.push(RenderedSection::new(None, heading.rendered(), section));
            }
            entries.extend(shadowed);
        }
    }

    let sections = ExtractedSections::new(dialect, entries);
    debug!(
        ?dialect,
        found = sections.found_count(),
        "extracted fragment sections"
    );
    sections
}

/// Try each noisy candidate for `key` in order.
///
/// The first candidate with a non-empty body wins. A candidate whose heading
/// was present but whose body was empty is used only when no later candidate
/// has content. Later candidates that also have content are returned as
/// unkeyed entries so the combined text keeps them.
fn extract_noisy(fragment: &str, key: SectionKey) -> (RenderedSection, Vec<RenderedSection>) {
    let candidates = headings::candidates(key, Dialect::Noisy);
    let mut winner: Option<RenderedSection> = None;
    let mut shadowed = Vec::new();
    let mut empty_match: Option<&Heading> = None;

    for heading in candidates {
        match capture_noisy(fragment, heading) {
            Some(body) if !body.is_empty() => {
                let body = match heading.rebuild {
                    Some(kind) => tables::rebuild(kind, body),
                    None => body.to_string(),
                };
                let section = ExtractedSection::Found(body);
                if winner.is_none() {
                    winner = Some(RenderedSection::new(Some(key), heading.rendered(), section));
                } else {
                    debug!(?key, heading = heading.marker, "keeping shadowed candidate");
                    shadowed.push(RenderedSection::new(None, heading.rendered(), section));
                }
            }
            Some(_) => {
                empty_match.get_or_insert(heading);
            }
            None => {}
        }
    }

    let winner = winner.unwrap_or_else(|| match empty_match {
        Some(heading) => RenderedSection::new(
            Some(key),
            heading.rendered(),
            ExtractedSection::Found(String::new()),
        ),
        None => {
            let heading = candidates
                .first()
                .map_or_else(|| key.label().to_string(), Heading::rendered);
            RenderedSection::new(Some(key), heading, ExtractedSection::NotFound)
        }
    });
    (winner, shadowed)
}

fn capture_noisy<'a>(fragment: &'a str, heading: &Heading) -> Option<&'a str> {
    match heading.style {
        HeadingStyle::Markdown => capture_noisy_markdown(fragment, heading.marker),
        HeadingStyle::BoldLabel => capture_noisy_bold(fragment, heading.marker),
    }
}
