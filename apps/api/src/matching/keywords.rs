//! Keyword Extractor — turns a job description into the set of skills it asks for.

use crate::matching::vocabulary;

/// Marker that recruiters append to a description to pin extra keywords.
pub const REQUIRED_KEYWORDS_MARKER: &str = "Required Keywords:";

/// Extracts the ordered, de-duplicated set of skills a job description mentions.
///
/// Vocabulary terms come first (in vocabulary order), followed by any tokens
/// listed after a `Required Keywords:` marker. Every label is title-cased.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    let mut keywords = Vec::new();

    let vocabulary_hits = vocabulary::terms_in(&lower)
        .into_iter()
        .map(|(_, term)| term.to_string());

    for keyword in vocabulary_hits.chain(required_keywords(text)) {
        let key = keyword.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        keywords.push(title_case(&keyword));
        seen.push(key);
    }

    keywords
}

/// Comma-separated tokens after the `Required Keywords:` marker, through the end of the text.
pub fn required_keywords(text: &str) -> Vec<String> {
    // ASCII lower-casing keeps byte offsets aligned with `text`.
    let haystack = text.to_ascii_lowercase();
    let marker = REQUIRED_KEYWORDS_MARKER.to_ascii_lowercase();

    let Some(start) = haystack.find(&marker) else {
        return Vec::new();
    };

    text[start + marker.len()..]
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Appends the marker line to a description, as the job form does.
pub fn append_required_keywords(description: &str, keywords: &[String]) -> String {
    if keywords.is_empty() {
        return description.to_string();
    }
    format!(
        "{description}\n\n{REQUIRED_KEYWORDS_MARKER} {}",
        keywords.join(", ")
    )
}

/// Upper-cases the first character, leaves the rest untouched.
pub fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
