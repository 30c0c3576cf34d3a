use once_cell::sync::Lazy;
use regex::Regex;

// Bracketed/parenthesized transcript annotations: [Music], [Applause],
// (inaudible), timestamps, etc. Matching stops at the first closing delimiter
// so removal never manufactures a new match on a second pass.
static BRACKET_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("bracket tag pattern"));
static PAREN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("paren tag pattern"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("url pattern"));

/// Strip transcript noise from a raw fragment
///
/// Removes bracketed non-speech tags, parenthesized annotations and embedded
/// URLs, collapses whitespace runs and trims. Pure and total: unparseable
/// input degrades to a trimmed copy of itself. Idempotent, and the output is
/// never longer than the input.
#[must_use]
pub fn clean_transcript(text: &str) -> String {
    let stripped = BRACKET_TAG.replace_all(text, "");
    let stripped = PAREN_TAG.replace_all(&stripped, "");
    let stripped = URL.replace_all(&stripped, "");
    collapse_whitespace(&stripped)
}

/// Count noise-marker occurrences in the raw (pre-clean) text
///
/// Case-insensitive; every occurrence counts, not just distinct markers.
#[must_use]
pub fn count_noise_markers(text: &str, markers: &[String]) -> usize {
    if markers.is_empty() {
        return 0;
    }
    let haystack = text.to_lowercase();
    markers
        .iter()
        .map(|marker| {
            let needle = marker.to_lowercase();
            if needle.is_empty() {
                0
            } else {
                haystack.matches(&needle).count()
            }
        })
        .sum()
}

fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim_end().to_string()
}
