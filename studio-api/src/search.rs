use axum::{extract::State, routing::post, Router};
use studio_core::search::{SearchError, VideoSearchRequest, VideoSearchResponse};

use crate::extract::Json;
use crate::{error::AppError, state::AppState};

/// Upper bound accepted by the YouTube search endpoint.
const MAX_RESULTS_CAP: u32 = 50;

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/youtube/search", post(search_videos))
}

/// POST /api/admin/youtube/search
async fn search_videos(
    State(state): State<AppState>,
    Json(req): Json<VideoSearchRequest>,
) -> Result<Json<VideoSearchResponse>, AppError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery.into());
    }

    let max_results = req
        .max_results
        .unwrap_or(state.search_max_results)
        .clamp(1, MAX_RESULTS_CAP);

    tracing::debug!("Searching videos for '{}' (max {})", query, max_results);
    let videos = state.video_search.search(query, max_results).await?;

    Ok(Json(VideoSearchResponse { videos }))
}
