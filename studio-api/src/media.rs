use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::Serialize;
use studio_store::MediaFolder;

use crate::extract::{Json, Path};
use crate::{error::AppError, state::AppState};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/media/{folder}", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// POST /api/admin/media/{folder}
///
/// Expects a multipart body with the image in the `file` field.
async fn upload(
    State(state): State<AppState>,
    Path(folder): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let folder = MediaFolder::parse(&folder)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::ValidationError(e.body_text()))?;

        let url = state.media.save(folder, &file_name, &bytes).await?;
        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }

    Err(AppError::ValidationError("Missing 'file' field".to_string()))
}
