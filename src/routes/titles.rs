use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::SearchResponse,
    routes::AppState,
};

/// Longest `q` accepted, in characters
pub const MAX_QUERY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let query_chars = params.q.chars().count();
    if query_chars > MAX_QUERY_CHARS {
        tracing::warn!(
            request_id = %request_id,
            query_chars,
            "Rejected oversized title search"
        );
        return Err(AppError::InvalidInput(format!(
            "q must be at most {} characters",
            MAX_QUERY_CHARS
        )));
    }

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        "Processing title search"
    );

    let response = state.searcher.search(&params.q).await;

    tracing::info!(
        request_id = %request_id,
        results = response.results.len(),
        corrected = response.corrected_query.is_some(),
        "Title search completed"
    );

    Ok(Json(response))
}
