//! URL slug generation for named catalog entries.

/// Turn a display name into a URL slug.
///
/// Lowercases ASCII letters, keeps ASCII digits, and collapses every other
/// run of characters into a single `-`. Leading and trailing separators are
/// dropped.
///
/// ```
/// use catalog_core::slug::slugify;
///
/// assert_eq!(slugify("Acme Cosmetics"), "acme-cosmetics");
/// assert_eq!(slugify("  L'Oréal -- Paris "), "l-or-al-paris");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
