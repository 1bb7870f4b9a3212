//! Splitting a stitched input into per-version fragments.

use regex_lite::Regex;
use relharmony_core::DocumentFragment;
use std::sync::LazyLock;
use tracing::debug;

/// Phrase carried by every fragment delimiter.
pub const BANNER_PHRASE: &str = "End of Release Extract";

static BANNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-=~*#]{2,}\s*End of Release Extract\s*[-=~*#]{2,}")
        .expect("static regex must compile")
});

/// Whether `text` contains at least one delimiter banner.
///
/// Input without a banner is a single report and skips harmonization.
pub fn has_release_banner(text: &str) -> bool {
    BANNER_RE.is_match(text)
}

/// Split `text` on delimiter banners.
///
/// Banners are dropped, every piece is trimmed, and empty pieces are
/// discarded. Input order is preserved.
pub fn split_into_fragments(text: &str) -> Vec<DocumentFragment> {
    let fragments: Vec<DocumentFragment> = BANNER_RE
        .split(text)
        .filter_map(DocumentFragment::new)
        .collect();
    debug!(count = fragments.len(), "split stitched input");
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_banners_and_drops_them() {
        let text = "first report\n----- End of Release Extract -----\nsecond report\n";
        let parts = split_into_fragments(text);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].as_str(), "first report");
        assert_eq!(parts[1].as_str(), "second report");
        assert!(!parts.iter().any(|p| p.as_str().contains(BANNER_PHRASE)));
    }

    #[test]
    fn accepts_mixed_banner_characters() {
        let text = "a\n==~ End of Release Extract *#\nb\n##End of Release Extract##\nc";
        let parts: Vec<_> = split_into_fragments(text)
            .into_iter()
            .map(|f| f.as_str().to_string())
            .collect();
        assert_eq!(parts, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_pieces_are_discarded() {
        let text = "--- End of Release Extract ---\n\n--- End of Release Extract ---\nonly";
        let parts = split_into_fragments(text);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].as_str(), "only");
    }

    #[test]
    fn no_banner_yields_trimmed_input() {
        let parts = split_into_fragments("  single report \n");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].as_str(), "single report");
        assert!(split_into_fragments(" \n ").is_empty());
    }

    #[test]
    fn banner_needs_two_delimiter_characters_each_side() {
        assert!(!has_release_banner("- End of Release Extract -"));
        assert!(!has_release_banner("End of Release Extract"));
        assert!(!has_release_banner("--- end of release extract ---"));
        assert!(has_release_banner("-- End of Release Extract --"));
    }
}
