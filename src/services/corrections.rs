//! Spelling correction for search queries.
//!
//! A [`CorrectionTable`] is an ordered list of rules. Rules are matched
//! against the query with case folded and whitespace removed; the first
//! rule that matches is applied to the original query and the rest are
//! ignored, so rule order decides the outcome.

use regex::{NoExpand, Regex, RegexBuilder};

/// Built-in misspelling → correction rules, in match order
const DEFAULT_CORRECTIONS: &[(&str, &str)] = &[
    ("spidermen", "spider-man"),
    ("spiderman", "spider-man"),
    ("spyderman", "spider-man"),
    ("antman", "ant-man"),
    ("xmen", "x-men"),
    ("avangers", "avengers"),
    ("avengrs", "avengers"),
    ("batmam", "batman"),
    ("btman", "batman"),
    ("supermam", "superman"),
    ("intersteller", "interstellar"),
    ("interstelar", "interstellar"),
    ("incepton", "inception"),
    ("gladiater", "gladiator"),
    ("titanik", "titanic"),
    ("jurasic", "jurassic"),
    ("terminater", "terminator"),
    ("godfater", "godfather"),
    ("starwars", "star wars"),
    ("startrek", "star trek"),
    ("harrypoter", "harry potter"),
    ("poter", "potter"),
    ("brakingbad", "breaking bad"),
    ("breakingbad", "breaking bad"),
    ("strangerthings", "stranger things"),
    ("pokemon", "pokémon"),
    ("fastandfurious", "fast & furious"),
    ("mision", "mission"),
];

#[derive(Debug, Clone)]
struct CorrectionRule {
    misspelling: String,
    correction: String,
    pattern: Regex,
}

/// Immutable, ordered set of spelling corrections
#[derive(Debug, Clone)]
pub struct CorrectionTable {
    rules: Vec<CorrectionRule>,
}

impl CorrectionTable {
    /// Builds a table from `(misspelling, correction)` pairs, keeping their order.
    ///
    /// Misspellings are normalized the same way queries are (lowercase, no
    /// whitespace). Rules whose misspelling normalizes to nothing are skipped.
    pub fn new<I, S, T>(rules: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let rules = rules
            .into_iter()
            .filter_map(|(misspelling, correction)| {
                let misspelling = normalize(misspelling.as_ref());
                if misspelling.is_empty() {
                    return None;
                }

                // An escaped literal always compiles
                let pattern = RegexBuilder::new(&regex::escape(&misspelling))
                    .case_insensitive(true)
                    .build()
                    .ok()?;

                Some(CorrectionRule {
                    misspelling,
                    correction: correction.into(),
                    pattern,
                })
            })
            .collect();

        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies the first matching rule to `query`.
    ///
    /// Returns `None` when no rule matches or when applying the rule leaves
    /// the query unchanged (e.g. the misspelling only appears once spaces
    /// are removed).
    pub fn correct(&self, query: &str) -> Option<String> {
        let normalized = normalize(query);
        let rule = self
            .rules
            .iter()
            .find(|rule| normalized.contains(&rule.misspelling))?;

        let corrected = rule
            .pattern
            .replace_all(query, NoExpand(&rule.correction))
            .into_owned();

        if corrected == query {
            tracing::debug!(
                query = %query,
                rule = %rule.misspelling,
                "Correction rule matched but did not change the query"
            );
            return None;
        }

        tracing::debug!(query = %query, corrected = %corrected, "Applied spelling correction");
        Some(corrected)
    }
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::new(DEFAULT_CORRECTIONS.iter().copied())
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spidermen_corrected() {
        let table = CorrectionTable::default();
        let corrected = table.correct("spidermen").unwrap();
        assert!(corrected.contains("spider-man"));
        assert_ne!(corrected, "spidermen");
    }

    #[test]
    fn test_replacement_is_case_insensitive_and_global() {
        let table = CorrectionTable::new([("batmam", "batman")]);
        assert_eq!(
            table.correct("BatMam vs Batmam").as_deref(),
            Some("batman vs batman")
        );
    }

    #[test]
    fn test_keeps_surrounding_text() {
        let table = CorrectionTable::default();
        assert_eq!(
            table.correct("The Intersteller Soundtrack").as_deref(),
            Some("The interstellar Soundtrack")
        );
    }

    #[test]
    fn test_first_rule_wins() {
        let table = CorrectionTable::new([("abc", "first"), ("abcd", "second")]);
        assert_eq!(table.correct("abcd").as_deref(), Some("firstd"));
    }

    #[test]
    fn test_only_one_rule_applied() {
        let table = CorrectionTable::new([("batmam", "batman"), ("supermam", "superman")]);
        assert_eq!(
            table.correct("batmam supermam").as_deref(),
            Some("batman supermam")
        );
    }

    #[test]
    fn test_match_across_whitespace_leaves_query_unchanged() {
        // "star wars" normalizes to "starwars" but the literal text has a space
        let table = CorrectionTable::default();
        assert_eq!(table.correct("star wars"), None);
    }

    #[test]
    fn test_no_match_returns_none() {
        let table = CorrectionTable::default();
        assert_eq!(table.correct("amelie"), None);
    }

    #[test]
    fn test_correction_text_is_not_expanded() {
        let table = CorrectionTable::new([("cash", "$1 cash")]);
        assert_eq!(table.correct("cash").as_deref(), Some("$1 cash"));
    }

    #[test]
    fn test_blank_rules_skipped() {
        let table = CorrectionTable::new([("  ", "nothing"), ("xmen", "x-men")]);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }
}
