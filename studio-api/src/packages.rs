use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Router,
};
use studio_core::catalog::{NewPackage, PackagePatch, PricingPackage, PublicPackage};
use studio_core::settings::{DiscountSettings, SettingKey};
use uuid::Uuid;

use crate::settings::load_setting;
use crate::extract::{Json, Path};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/packages", get(public_packages))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/packages", get(list_packages).post(create_package))
        .route("/packages/{id}", patch(update_package).delete(delete_package))
}

/// GET /api/packages
async fn public_packages(State(state): State<AppState>) -> Result<Json<Vec<PublicPackage>>, AppError> {
    let packages = state.package_repo.list_packages().await?;
    let discount: DiscountSettings = load_setting(&state, SettingKey::Discount).await?;
    Ok(Json(PublicPackage::listing(&packages, &discount)))
}

// ============================================================================
// Admin
// ============================================================================

async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<PricingPackage>>, AppError> {
    Ok(Json(state.package_repo.list_packages().await?))
}

async fn create_package(
    State(state): State<AppState>,
    Json(req): Json<NewPackage>,
) -> Result<(StatusCode, Json<PricingPackage>), AppError> {
    req.validate()?;
    let package = state.package_repo.create_package(&req).await?;
    tracing::info!("Created package {} '{}'", package.id, package.name);
    Ok((StatusCode::CREATED, Json(package)))
}

async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PackagePatch>,
) -> Result<Json<PricingPackage>, AppError> {
    patch.validate()?;
    state
        .package_repo
        .update_package(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Package {} not found", id)))
}

async fn delete_package(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    if !state.package_repo.delete_package(id).await? {
        return Err(AppError::NotFoundError(format!("Package {} not found", id)));
    }
    tracing::info!("Deleted package {}", id);
    Ok(StatusCode::NO_CONTENT)
}
