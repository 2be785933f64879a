// crates/worldreport-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `São Paulo` -> `Sao Paulo`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use worldreport_core::text::fold_key;
///
/// assert_eq!(fold_key("São Paulo"), "sao paulo");
/// assert_eq!(fold_key("Île-de-France"), "ile-de-france");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Accent- and case-insensitive substring test.
///
/// An empty needle matches everything.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(&fold_key(needle))
}

/// Normalizes a row field name so `totalPopulation`, `total_population` and
/// `TotalPopulation` all map to `totalpopulation`.
pub fn field_key(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
