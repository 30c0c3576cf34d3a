use once_cell::sync::Lazy;
use std::collections::HashSet;

// Function words excluded from query-term extraction. Transcript queries are
// conversational ("how do I learn rust"), so without this list the overlap
// signal saturates on filler words.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "can", "could", "did", "do",
        "does", "for", "from", "had", "has", "have", "he", "her", "his", "how", "i", "if", "in",
        "into", "is", "it", "its", "me", "my", "no", "not", "of", "on", "or", "our", "she", "so",
        "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "to",
        "us", "was", "we", "were", "what", "when", "where", "which", "who", "why", "will", "with",
        "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Extract the significant terms of a query
///
/// Lowercased, split on non-alphanumeric boundaries, stopwords and one-letter
/// fragments removed, first occurrence wins. An empty result means the query
/// carries no usable lexical signal.
#[must_use]
pub fn query_terms(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for raw in query.split(|c: char| !c.is_alphanumeric()) {
        let term = raw.to_lowercase();
        if term.len() < 2 || STOPWORDS.contains(term.as_str()) {
            continue;
        }
        if seen.insert(term.clone()) {
            terms.push(term);
        }
    }
    terms
}

/// Lexical overlap between a text and a set of query terms, in [0, 1]
///
/// Fraction of terms that appear as words of the text. Deliberately
/// independent of the upstream vector distance so the reranker combines two
/// uncorrelated relevance estimates. Pure and deterministic.
#[must_use]
pub fn relevance_score(text: &str, terms: &[String]) -> f32 {
    if terms.is_empty() {
        return 0.0;
    }
    let words: HashSet<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();
    let hits = terms.iter().filter(|term| words.contains(*term)).count();
    hits as f32 / terms.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_significant_terms_only() {
        assert_eq!(
            query_terms("How do I learn Rust programming?"),
            vec!["learn", "rust", "programming"]
        );
        assert_eq!(query_terms("the of and to"), Vec::<String>::new());
        assert_eq!(query_terms(""), Vec::<String>::new());
    }

    #[test]
    fn duplicate_terms_collapse() {
        assert_eq!(
            query_terms("rust rust RUST tutorial"),
            vec!["rust", "tutorial"]
        );
    }

    #[test]
    fn score_is_fraction_of_terms_present() {
        let terms = query_terms("rust ownership tutorial");
        assert_eq!(terms.len(), 3);

        let all = relevance_score("a tutorial about ownership in Rust", &terms);
        assert!((all - 1.0).abs() < f32::EPSILON);

        let partial = relevance_score("an ownership deep dive", &terms);
        assert!((partial - 1.0 / 3.0).abs() < 1e-6);

        let none = relevance_score("cooking pasta at home", &terms);
        assert_eq!(none, 0.0);
    }

    #[test]
    fn empty_terms_score_zero() {
        assert_eq!(relevance_score("any text at all", &[]), 0.0);
    }

    #[test]
    fn matching_is_word_level_not_substring() {
        let terms = vec!["cat".to_string()];
        assert_eq!(relevance_score("concatenation of strings", &terms), 0.0);
        assert!(relevance_score("my cat sleeps", &terms) > 0.0);
    }
}
