use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

use crate::{
    models::{SearchCandidate, SearchResponse},
    services::{
        corrections::CorrectionTable,
        fuzzy::{FuzzyHit, FuzzyIndex},
        providers::MetadataSearch,
        variants::query_variants,
        RankingConfig,
    },
};

/// Only the first upstream page is consulted per query
const SEARCH_PAGE: u32 = 1;

/// Typo-tolerant title search over a metadata provider
///
/// A search fans the query (plus its spelling correction and variants) out
/// to the provider, pools the distinct candidates and ranks them by fuzzy
/// similarity to what the user typed.
pub struct TitleSearcher {
    provider: Arc<dyn MetadataSearch>,
    corrections: CorrectionTable,
    ranking: RankingConfig,
}

impl TitleSearcher {
    pub fn new(
        provider: Arc<dyn MetadataSearch>,
        corrections: CorrectionTable,
        ranking: RankingConfig,
    ) -> Self {
        Self {
            provider,
            corrections,
            ranking,
        }
    }

    /// Searches for titles matching `query`.
    ///
    /// Blank queries return no results without contacting the provider.
    /// Upstream failures are logged and only shrink the candidate pool, so
    /// this never fails; if every upstream call fails the results are empty.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn search(&self, query: &str) -> SearchResponse {
        let query = query.trim();
        if query.is_empty() {
            return SearchResponse::empty();
        }

        let corrected = self.corrections.correct(query);
        let queries = upstream_queries(query, corrected.as_deref());
        let pool = self.fetch_candidates(&queries).await;
        let pool_size = pool.len();

        let results = self.rank(pool, query, corrected.as_deref());

        tracing::info!(
            query = %query,
            corrected = ?corrected,
            upstream_queries = queries.len(),
            candidates = pool_size,
            results = results.len(),
            "Title search ranked"
        );

        SearchResponse {
            results,
            corrected_query: corrected,
        }
    }

    /// Runs every upstream query concurrently and pools their candidates.
    ///
    /// Candidates keep the order of `queries` and, within a query, the
    /// provider's order; repeats of an `(id, kind)` pair are dropped.
    async fn fetch_candidates(&self, queries: &[String]) -> Vec<SearchCandidate> {
        let outcomes = join_all(
            queries
                .iter()
                .map(|query| self.provider.search(query, SEARCH_PAGE)),
        )
        .await;

        let mut seen = HashSet::new();
        let mut pool = Vec::new();
        let mut failures = 0usize;

        for (query, outcome) in queries.iter().zip(outcomes) {
            match outcome {
                Ok(page) => pool.extend(
                    page.results
                        .into_iter()
                        .filter(|candidate| seen.insert(candidate.key())),
                ),
                Err(e) => {
                    failures += 1;
                    tracing::warn!(
                        error = %e,
                        query = %query,
                        provider = self.provider.name(),
                        "Upstream search failed for query variant"
                    );
                }
            }
        }

        if failures == queries.len() {
            tracing::error!(
                queries = queries.len(),
                provider = self.provider.name(),
                "Every upstream search failed"
            );
        } else if failures > 0 {
            tracing::warn!(
                success_count = queries.len() - failures,
                error_count = failures,
                "Partial upstream search failure"
            );
        }

        pool
    }

    /// Orders the pool by relevance to `query`, falling back to the
    /// corrected query and then to a whole-phrase match that ignores
    /// punctuation. When nothing matches at all, the pool is returned in
    /// upstream order.
    fn rank(
        &self,
        mut pool: Vec<SearchCandidate>,
        query: &str,
        corrected: Option<&str>,
    ) -> Vec<SearchCandidate> {
        let index = FuzzyIndex::new(&pool, &self.ranking);

        let mut hits = index.search(query);
        if hits.is_empty() {
            if let Some(corrected) = corrected {
                hits = index.search(corrected);
            }
        }
        if hits.is_empty() {
            hits = index.search_phrase(query);
        }

        if hits.is_empty() {
            tracing::debug!(query = %query, "No fuzzy matches, returning upstream order");
            pool.truncate(self.ranking.max_results);
            return pool;
        }

        let ranked = order_by_relevance(
            hits.into_iter()
                .map(|hit| RankedHit::new(hit, &pool))
                .collect(),
            self.ranking.score_epsilon,
        );

        let mut slots: Vec<Option<SearchCandidate>> = pool.into_iter().map(Some).collect();
        ranked
            .into_iter()
            .filter_map(|hit| slots[hit.index].take())
            .take(self.ranking.max_results)
            .collect()
    }
}

/// The literal query, then its correction, then any variants not already listed
fn upstream_queries(query: &str, corrected: Option<&str>) -> Vec<String> {
    let mut queries = vec![query.to_string()];
    let candidates = corrected
        .map(str::to_string)
        .into_iter()
        .chain(query_variants(query));

    for candidate in candidates {
        if !queries.contains(&candidate) {
            queries.push(candidate);
        }
    }
    queries
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RankedHit {
    index: usize,
    score: f64,
    popularity: f64,
}

impl RankedHit {
    fn new(hit: FuzzyHit, pool: &[SearchCandidate]) -> Self {
        Self {
            index: hit.index,
            score: hit.score,
            popularity: pool[hit.index].popularity(),
        }
    }

    /// Lower score first; near-equal scores go to the more popular title
    fn precedes(&self, other: &Self, epsilon: f64) -> bool {
        if (self.score - other.score).abs() < epsilon {
            self.popularity > other.popularity
        } else {
            self.score < other.score
        }
    }
}

/// Stable insertion sort by [`RankedHit::precedes`].
///
/// The epsilon tie is not transitive, which `slice::sort_by` does not
/// allow, so hits are placed one at a time.
fn order_by_relevance(hits: Vec<RankedHit>, epsilon: f64) -> Vec<RankedHit> {
    let mut ordered: Vec<RankedHit> = Vec::with_capacity(hits.len());
    for hit in hits {
        let position = ordered
            .iter()
            .rposition(|placed| !hit.precedes(placed, epsilon))
            .map_or(0, |i| i + 1);
        ordered.insert(position, hit);
    }
    ordered
}
