//! URL slugs for sports and teams.

use std::collections::HashSet;

use lazy_regex::regex;
use unicode_normalization::UnicodeNormalization;

/// Fallback base for sports whose name slugifies to nothing.
pub const SPORT_SLUG_FALLBACK: &str = "sport";
/// Fallback base for teams whose name slugifies to nothing.
pub const TEAM_SLUG_FALLBACK: &str = "team";

/// ASCII, lowercase, hyphen-separated form of `value`.
///
/// Accents are folded through NFKD and anything left outside ASCII is
/// dropped; the result may be empty.
pub fn slugify(value: &str) -> String {
    let ascii: String = value.nfkd().filter(char::is_ascii).collect();
    let lowered = ascii.to_lowercase();
    let cleaned = regex!(r"[^\w\s-]").replace_all(&lowered, "");
    let hyphenated = regex!(r"[-\s]+").replace_all(&cleaned, "-");
    hyphenated.trim_matches(|c: char| c == '-' || c == '_').to_string()
}

/// Longest suffix `disambiguate` can append: `-` and a `u32`.
pub const MAX_SUFFIX_LEN: usize = 11;

/// At most `max_len` characters of `slug`, without a trailing separator.
fn truncate(slug: &str, max_len: usize) -> &str {
    let cut = slug
        .char_indices()
        .nth(max_len)
        .map_or(slug, |(at, _)| &slug[..at]);
    cut.trim_end_matches(|c: char| c == '-' || c == '_')
}

/// `slugify(value)` cut to `max_len`, or `fallback` when that is empty.
pub fn slug_base(value: &str, fallback: &str, max_len: usize) -> String {
    let slug = slugify(value);
    let slug = truncate(&slug, max_len);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug.to_string()
    }
}

/// Prefix shared by every candidate `disambiguate` can return for `base`.
/// Fetching the slugs that start with it is enough to pick a free one.
pub fn slug_stem(base: &str, max_len: usize) -> &str {
    truncate(base, max_len.saturating_sub(MAX_SUFFIX_LEN))
}

/// First of `base`, `base-1`, `base-2`, ... that is not in `taken`.
///
/// The base is shortened as the suffix grows so no candidate is longer
/// than `max_len`.
pub fn disambiguate(base: &str, taken: &HashSet<String>, max_len: usize) -> String {
    let base = truncate(base, max_len);
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n: u32 = 1;
    loop {
        let suffix = format!("-{n}");
        let head = truncate(base, max_len.saturating_sub(suffix.len()));
        let candidate = format!("{head}{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
