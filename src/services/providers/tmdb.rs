/// TMDB (The Movie Database) provider
///
/// Uses the multi-search endpoint so a single request covers both movies and
/// series. Person records in the response are discarded.
///
/// API Flow:
/// 1. Search: /search/multi?query=…&page=… → mixed movie/tv/person records
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{SearchCandidate, SearchPage},
    services::providers::MetadataSearch,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour

/// Raw multi-search envelope; results stay untyped until filtered
#[derive(Debug, Deserialize)]
struct MultiSearchResponse {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
    results: Vec<serde_json::Value>,
}

impl From<MultiSearchResponse> for SearchPage {
    fn from(response: MultiSearchResponse) -> Self {
        let results = response
            .results
            .into_iter()
            .filter_map(|record| serde_json::from_value::<SearchCandidate>(record).ok())
            .collect();

        SearchPage {
            page: response.page,
            total_pages: response.total_pages,
            total_results: response.total_results,
            results,
        }
    }
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
    cache: Option<Cache>,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, language: String, cache: Option<Cache>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
            cache,
        }
    }

    async fn fetch_page(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        let url = format!("{}/search/multi", self.api_url);
        let page_param = page.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("page", page_param.as_str()),
                ("include_adult", "false"),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let envelope: MultiSearchResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %response_text,
                    "Failed to deserialize TMDB response"
                );
                AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
            })?;

        let raw_count = envelope.results.len();
        let search_page = SearchPage::from(envelope);

        tracing::info!(
            query = %query,
            page = page,
            results = search_page.results.len(),
            dropped = raw_count - search_page.results.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(search_page)
    }
}

#[async_trait::async_trait]
impl MetadataSearch for TmdbProvider {
    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }
        if page == 0 {
            return Err(AppError::InvalidInput("Pages start at 1".to_string()));
        }

        cached!(
            self.cache.as_ref(),
            CacheKey::SearchPage {
                query: query.to_string(),
                page,
            },
            SEARCH_CACHE_TTL,
            self.fetch_page(query, page)
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;

    fn create_test_provider() -> TmdbProvider {
        TmdbProvider::new(
            "test_key".to_string(),
            "http://test.local/3/".to_string(),
            "en-US".to_string(),
            None,
        )
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let provider = create_test_provider();
        assert_eq!(provider.api_url, "http://test.local/3");
        assert_eq!(provider.name(), "tmdb");
    }

    #[test]
    fn test_multi_search_drops_person_records() {
        let json = r#"{
            "page": 1,
            "total_pages": 3,
            "total_results": 57,
            "results": [
                {"media_type": "movie", "id": 268, "title": "Batman", "popularity": 40.1},
                {"media_type": "person", "id": 3894, "name": "Christian Bale"},
                {"media_type": "tv", "id": 2098, "name": "Batman: The Animated Series", "first_air_date": "1992-09-05"}
            ]
        }"#;

        let envelope: MultiSearchResponse = serde_json::from_str(json).unwrap();
        let page = SearchPage::from(envelope);

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_results, 57);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].kind(), MediaKind::Movie);
        assert_eq!(page.results[1].kind(), MediaKind::Tv);
        assert_eq!(page.results[1].display_name(), "Batman: The Animated Series");
    }

    #[test]
    fn test_multi_search_skips_malformed_records() {
        let json = r#"{
            "page": 1,
            "results": [
                {"media_type": "movie", "id": "not-a-number", "title": "Broken"},
                {"media_type": "movie", "id": 155, "title": "The Dark Knight"}
            ]
        }"#;

        let envelope: MultiSearchResponse = serde_json::from_str(json).unwrap();
        let page = SearchPage::from(envelope);

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id(), 155);
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let provider = create_test_provider();
        let result = provider.search("   ", 1).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_page_zero() {
        let provider = create_test_provider();
        let result = provider.search("batman", 0).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
