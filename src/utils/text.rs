//! Small text helpers shared by the form model and the exporters.

/// Characters the scientist name field refuses.
const NAME_FORBIDDEN: &[char] = &[
    '.', ',', '!', '@', '#', '$', '^', '&', '(', ')', '-', '_', '+', '=', ';', ':', '\'', '"',
];

/// Number of whitespace-separated words; blank text counts as zero.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn sanitize_name(raw: &str) -> String {
    raw.chars().filter(|c| !NAME_FORBIDDEN.contains(c)).collect()
}

/// `iiab` → `ICAR-IIAB`
pub fn institute_short_code(institute: &str) -> String {
    format!("ICAR-{}", institute.to_uppercase())
}

/// Insert `fragment` at character offset `at` (clamped to the end of
/// `text`).
pub fn insert_at_char(text: &mut String, at: Option<usize>, fragment: &str) {
    let byte = match at {
        Some(n) => text
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len()),
        None => text.len(),
    };
    text.insert_str(byte, fragment);
}
