use serde::{Deserialize, Serialize};

use super::SearchCandidate;

/// One page of upstream search results.
///
/// `results` only holds movies and series; other record kinds are dropped
/// when the page is parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<SearchCandidate>,
}

/// Ranked search output returned to the front-end
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchCandidate>,
    /// Present only when a spelling correction changed the query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_query: Option<String>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrected_query_omitted_when_absent() {
        let json = serde_json::to_value(SearchResponse::empty()).unwrap();
        assert_eq!(json, serde_json::json!({ "results": [] }));
    }

    #[test]
    fn test_corrected_query_uses_camel_case() {
        let response = SearchResponse {
            results: Vec::new(),
            corrected_query: Some("spider-man".to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["correctedQuery"], "spider-man");
    }
}
