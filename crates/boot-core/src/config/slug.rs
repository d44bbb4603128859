//! Slug generation for app names and destination directories

use deunicode::deunicode;

/// Transliterate `text` to ASCII, lowercase it, keep letters and digits, and
/// collapse every other run of characters into a single `-`. Leading and
/// trailing separators are dropped, so the result may be empty.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
