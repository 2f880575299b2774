use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Router,
};
use studio_core::video::{NewVideo, Video, VideoPatch, VideoSections};
use uuid::Uuid;

use crate::extract::{Json, Path};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/videos", get(public_videos))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(list_videos).post(create_video))
        .route("/videos/{id}", patch(update_video).delete(delete_video))
}

/// GET /api/videos
async fn public_videos(State(state): State<AppState>) -> Result<Json<VideoSections>, AppError> {
    let videos = state.video_repo.list_videos().await?;
    Ok(Json(VideoSections::from_videos(&videos)))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/videos
async fn list_videos(State(state): State<AppState>) -> Result<Json<Vec<Video>>, AppError> {
    Ok(Json(state.video_repo.list_videos().await?))
}

/// POST /api/admin/videos
async fn create_video(
    State(state): State<AppState>,
    Json(req): Json<NewVideo>,
) -> Result<(StatusCode, Json<Video>), AppError> {
    req.validate()?;
    let video = state.video_repo.create_video(&req).await?;
    tracing::info!("Created video {} ({})", video.id, video.video_type.as_str());
    Ok((StatusCode::CREATED, Json(video)))
}

/// PATCH /api/admin/videos/{id}
async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<VideoPatch>,
) -> Result<Json<Video>, AppError> {
    patch.validate()?;
    state
        .video_repo
        .update_video(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Video {} not found", id)))
}

/// DELETE /api/admin/videos/{id}
async fn delete_video(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    if !state.video_repo.delete_video(id).await? {
        return Err(AppError::NotFoundError(format!("Video {} not found", id)));
    }
    tracing::info!("Deleted video {}", id);
    Ok(StatusCode::NO_CONTENT)
}
