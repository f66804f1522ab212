//! Alternative phrasings of a query, used to widen upstream recall.

const STOP_WORDS: &[&str] = &["the", "a", "an", "of", "in", "on", "at", "to", "for", "with"];

/// First words this short are too generic to search on their own
const MIN_FIRST_WORD_LEN: usize = 3;

/// Derives up to three variants of a trimmed, multi-word query.
///
/// In order: stop-words removed, first word alone, numeric tokens removed.
/// Single-word queries produce no variants. Duplicates of the query itself
/// or of an earlier variant are not repeated.
pub fn query_variants(query: &str) -> Vec<String> {
    let words: Vec<&str> = query.split_whitespace().collect();
    if words.len() <= 1 {
        return Vec::new();
    }

    let mut variants = Vec::with_capacity(3);

    let content_words: Vec<&str> = words
        .iter()
        .copied()
        .filter(|word| !STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .collect();
    if !content_words.is_empty() && content_words.len() != words.len() {
        variants.push(content_words.join(" "));
    }

    let first = words[0];
    if first.chars().count() > MIN_FIRST_WORD_LEN {
        variants.push(first.to_string());
    }

    let without_numbers: Vec<&str> = words
        .iter()
        .copied()
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .collect();
    if !without_numbers.is_empty() && without_numbers.len() != words.len() {
        variants.push(without_numbers.join(" "));
    }

    let mut unique: Vec<String> = Vec::with_capacity(variants.len());
    for variant in variants {
        if variant != query && !unique.contains(&variant) {
            unique.push(variant);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_has_no_variants() {
        assert!(query_variants("avengers").is_empty());
    }

    #[test]
    fn test_stop_words_removed() {
        let variants = query_variants("lord of the rings");
        assert_eq!(variants, vec!["lord rings".to_string(), "lord".to_string()]);
    }

    #[test]
    fn test_stop_word_match_ignores_case() {
        let variants = query_variants("The Matrix");
        assert_eq!(variants[0], "Matrix");
    }

    #[test]
    fn test_first_word_requires_more_than_three_chars() {
        assert_eq!(query_variants("war games"), Vec::<String>::new());
        assert_eq!(query_variants("blade runner"), vec!["blade".to_string()]);
    }

    #[test]
    fn test_numeric_tokens_removed() {
        let variants = query_variants("blade runner 2049");
        assert_eq!(
            variants,
            vec!["blade".to_string(), "blade runner".to_string()]
        );
    }

    #[test]
    fn test_all_stop_words_produces_no_stop_word_variant() {
        assert!(query_variants("the a").is_empty());
    }

    #[test]
    fn test_all_numbers_produces_no_numeric_variant() {
        assert_eq!(query_variants("1917 2019"), vec!["1917".to_string()]);
    }

    #[test]
    fn test_identical_variants_deduplicated() {
        // stop-word removal and the first word both give "Godfather"
        let variants = query_variants("Godfather the");
        assert_eq!(variants, vec!["Godfather".to_string()]);
    }

    #[test]
    fn test_mixed_digits_are_kept() {
        let variants = query_variants("se7en movie");
        assert_eq!(variants, vec!["se7en".to_string()]);
    }
}
