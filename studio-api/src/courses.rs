use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Router,
};
use studio_core::catalog::{active_courses, Course, CoursePatch, NewCourse};
use uuid::Uuid;

use crate::extract::{Json, Path};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/courses", get(public_courses))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", patch(update_course).delete(delete_course))
}

/// GET /api/courses
async fn public_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.course_repo.list_courses().await?;
    Ok(Json(active_courses(&courses)))
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.course_repo.list_courses().await?))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourse>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    req.validate()?;
    let course = state.course_repo.create_course(&req).await?;
    tracing::info!("Created course {} '{}'", course.id, course.title);
    Ok((StatusCode::CREATED, Json(course)))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CoursePatch>,
) -> Result<Json<Course>, AppError> {
    patch.validate()?;
    state
        .course_repo
        .update_course(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Course {} not found", id)))
}

async fn delete_course(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    if !state.course_repo.delete_course(id).await? {
        return Err(AppError::NotFoundError(format!("Course {} not found", id)));
    }
    tracing::info!("Deleted course {}", id);
    Ok(StatusCode::NO_CONTENT)
}
