//! Locale ordering and primary-locale resolution.

use std::cmp::Ordering;

/// Pick the primary locale of a fetched set.
///
/// The hint wins when it names a locale that was actually fetched; otherwise
/// the first fetched locale is primary. `fetched` must be in server order.
pub fn resolve_primary<S: AsRef<str>>(fetched: &[S], hint: Option<&str>) -> Option<String> {
    if let Some(hint) = hint {
        if fetched.iter().any(|l| l.as_ref() == hint) {
            return Some(hint.to_string());
        }
    }
    fetched.first().map(|l| l.as_ref().to_string())
}

/// Case-insensitive lexical order, falling back to byte order so the result
/// is total.
pub fn compare_locales(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Primary first, then the rest by [`compare_locales`].
pub fn sort_locales<I>(locales: I, primary: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut sorted: Vec<String> = locales.into_iter().collect();
    sorted.sort_by(|a, b| {
        let a_primary = Some(a.as_str()) == primary;
        let b_primary = Some(b.as_str()) == primary;
        b_primary
            .cmp(&a_primary)
            .then_with(|| compare_locales(a, b))
    });
    sorted
}
