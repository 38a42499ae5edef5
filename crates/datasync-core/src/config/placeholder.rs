//! Detection of unfilled template values in source URLs

use regex::Regex;
use std::sync::LazyLock;

/// Markers left in a config copied from the template before it was filled in.
///
/// Only the uppercase sentinels match, so ordinary words in real URLs
/// (`?sheet=Todo`, `placeholder.example.org`) are left alone.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"YOUR_[A-Z0-9_]+|PLACEHOLDER|REPLACE_ME|<[^>]*>")
        .expect("Invalid placeholder regex")
});

/// Whether `value` still holds a template placeholder.
pub fn contains_placeholder(value: &str) -> bool {
    PLACEHOLDER.is_match(value)
}
