pub mod corrections;
pub mod fuzzy;
pub mod providers;
pub mod title_search;
pub mod variants;

pub use corrections::CorrectionTable;
pub use providers::{MetadataSearch, TmdbProvider};
pub use title_search::TitleSearcher;

/// Tunables for fuzzy ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Highest per-field score that still counts as a match
    pub threshold: f64,
    pub title_weight: f64,
    pub original_title_weight: f64,
    pub overview_weight: f64,
    /// Scores closer than this are treated as tied
    pub score_epsilon: f64,
    pub max_results: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            title_weight: 0.7,
            original_title_weight: 0.5,
            overview_weight: 0.1,
            score_epsilon: 0.01,
            max_results: 20,
        }
    }
}
