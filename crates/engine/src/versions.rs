//! Version token discovery.

use regex_lite::Regex;
use relharmony_core::VersionTag;
use relharmony_core::version::VERSION_TOKEN_PATTERN;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static VERSION_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{VERSION_TOKEN_PATTERN}\b")).expect("static regex must compile")
});

/// Every distinct version token in `text`, ascending.
///
/// Returns an empty set when nothing matches.
pub fn identify_versions(text: &str) -> BTreeSet<VersionTag> {
    VERSION_TOKEN_RE
        .find_iter(text)
        .filter_map(|m| VersionTag::parse(m.as_str()).ok())
        .collect()
}

/// The first version token in `text`, in reading order.
pub fn first_version(text: &str) -> Option<VersionTag> {
    VERSION_TOKEN_RE
        .find_iter(text)
        .find_map(|m| VersionTag::parse(m.as_str()).ok())
}
