//! Weighted approximate matching over a candidate pool.
//!
//! Each candidate contributes three fields: its display name, its original
//! name and its overview. A pattern is scored against a field by the
//! smallest Levenshtein distance between the pattern and any substring of
//! the field, divided by the pattern length, so `0.0` is an exact occurrence
//! and `1.0` means nothing in common. Matching ignores case and position.
//! Distances are counted over UTF-8 bytes, and only the first
//! [`MAX_PATTERN_CHARS`] characters of a pattern are scored.
//!
//! A field matches when its score is at most the threshold. A candidate's
//! score combines its matching fields as
//! `Π max(score, ε) ^ normalized_weight`, which stays in `0.0..=1.0` and is
//! lower when more (or heavier) fields match well. Candidates with no
//! matching field are not hits.
//!
//! The `ε` floor is `f64::EPSILON`, so every exact occurrence scores the
//! same regardless of how much else the field contains: "Batman" and
//! "Batman Returns" tie for the pattern "batman" and are ordered by
//! popularity.

use crate::models::SearchCandidate;

use super::RankingConfig;

/// Longest pattern prefix scored by [`FuzzyIndex::search`]
pub const MAX_PATTERN_CHARS: usize = 32;

/// A candidate that matched, by position in the indexed pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyHit {
    pub index: usize,
    pub score: f64,
}

#[derive(Debug)]
struct Field {
    text: String,
    /// Lowercase letters and digits only
    compact: String,
}

impl Field {
    fn new(raw: &str) -> Option<Self> {
        let text = fold(raw);
        if text.is_empty() {
            return None;
        }
        let compact = compact(&text);
        Some(Self { text, compact })
    }
}

/// Lowercase, trimmed, without control characters
fn fold(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_control())
        .flat_map(char::to_lowercase)
        .collect()
}

fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Display name, original name, overview
const FIELD_COUNT: usize = 3;

#[derive(Debug)]
pub struct FuzzyIndex {
    documents: Vec<[Option<Field>; FIELD_COUNT]>,
    weights: [f64; FIELD_COUNT],
    threshold: f64,
}

impl FuzzyIndex {
    pub fn new(candidates: &[SearchCandidate], config: &RankingConfig) -> Self {
        let documents = candidates
            .iter()
            .map(|candidate| {
                [
                    Field::new(candidate.display_name()),
                    candidate.original_name().and_then(Field::new),
                    candidate.overview().and_then(Field::new),
                ]
            })
            .collect();

        Self {
            documents,
            weights: normalize_weights([
                config.title_weight,
                config.original_title_weight,
                config.overview_weight,
            ]),
            threshold: config.threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Typo-tolerant search; hits come back in pool order
    pub fn search(&self, pattern: &str) -> Vec<FuzzyHit> {
        let pattern: String = fold(pattern).chars().take(MAX_PATTERN_CHARS).collect();
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Vec::new();
        }

        self.collect_hits(|field| {
            let distance = substring_distance(pattern, &field.text)?;
            let score = distance as f64 / pattern.len() as f64;
            (score <= self.threshold).then_some(score)
        })
    }

    /// Matches fields containing the whole phrase once case, spacing and
    /// punctuation are ignored, so "spider man" finds "Spider-Man" and
    /// "s.h.i.e.l.d." finds "Agents of SHIELD".
    pub fn search_phrase(&self, phrase: &str) -> Vec<FuzzyHit> {
        let phrase = compact(phrase);
        if phrase.is_empty() {
            return Vec::new();
        }

        self.collect_hits(|field| field.compact.contains(&phrase).then_some(0.0))
    }

    fn collect_hits<F>(&self, field_score: F) -> Vec<FuzzyHit>
    where
        F: Fn(&Field) -> Option<f64>,
    {
        self.documents
            .iter()
            .enumerate()
            .filter_map(|(index, fields)| {
                let mut matched = false;
                let mut total = 1.0;

                for (field, weight) in fields.iter().zip(self.weights) {
                    let Some(score) = field.as_ref().and_then(&field_score) else {
                        continue;
                    };
                    matched = true;
                    total *= score.max(f64::EPSILON).powf(weight);
                }

                matched.then_some(FuzzyHit {
                    index,
                    score: total,
                })
            })
            .collect()
    }
}

/// Scales weights to sum to 1; negative weights count as 0.
fn normalize_weights(weights: [f64; FIELD_COUNT]) -> [f64; FIELD_COUNT] {
    let clamped = weights.map(|w| w.max(0.0));
    let total: f64 = clamped.iter().sum();
    if total <= 0.0 {
        return [1.0 / FIELD_COUNT as f64; FIELD_COUNT];
    }
    clamped.map(|w| w / total)
}

/// Fewest edits turning `pattern` into some substring of `text`
fn substring_distance(pattern: &str, text: &str) -> Option<u32> {
    triple_accel::levenshtein_search(pattern.as_bytes(), text.as_bytes())
        .map(|found| found.k)
        .min()
}
