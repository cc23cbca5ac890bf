//! Identifier normalization shared by every verification strategy.
//!
//! Callers type identifiers the way they appear on letterheads:
//! `"BE 0123.456.789"`, `"CHE-123.456.789 TVA"`, `"12-3456789"`. Before any
//! rule lookup the validator reduces the input once to a compact uppercase
//! form. Strategies never re-strip characters on their own.

/// Returns `true` for characters that carry no meaning inside an identifier.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '.' | '/')
}

/// Reduces a raw identifier to its compact form.
///
/// Trims the input, removes whitespace and the separators `-`, `.` and `/`
/// anywhere in the string, and uppercases ASCII letters.
///
/// # Examples
///
/// ```
/// use taxid_core::normalize::normalize;
///
/// assert_eq!(normalize(" be 0123.456.789 "), "BE0123456789");
/// assert_eq!(normalize("CHE-123.456.789 TVA"), "CHE123456789TVA");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !is_separator(*c))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Returns the storage key used to detect duplicate registrations.
///
/// Two spellings of the same identifier (`"FR 12 345678901"` and
/// `"fr12-345-678-901"`) yield the same key.
pub fn canonical_form(raw: &str) -> String {
    normalize(raw)
}

/// Strips a leading country prefix from an already-normalized identifier.
///
/// Each candidate prefix is tried in order; the first one found at the start
/// of `normalized` is removed. When none matches, the input is returned
/// unchanged.
pub fn strip_country_prefix<'a>(normalized: &'a str, prefixes: &[&str]) -> &'a str {
    prefixes
        .iter()
        .find_map(|prefix| normalized.strip_prefix(prefix))
        .unwrap_or(normalized)
}
