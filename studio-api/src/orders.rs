use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;
use studio_core::order::{CheckoutRequest, Order, OrderStatus};
use uuid::Uuid;

use crate::extract::{Json, Path};
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/orders", post(checkout))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/orders/{id}", delete(delete_order))
}

/// POST /api/orders
async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let package = state
        .package_repo
        .get_package(req.package_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Package {} is not available", req.package_id)))?;

    let new_order = req.into_order(&package)?;
    let order = state.order_repo.create_order(&new_order).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/orders
async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.order_repo.list_orders().await?))
}

/// PATCH /api/admin/orders/{id}/status
async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<Order>, AppError> {
    let status = OrderStatus::parse(&req.status)?;
    let order = state
        .order_repo
        .update_order_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Order {} not found", id)))?;

    tracing::info!("Order {} marked {}", id, status.as_str());
    Ok(Json(order))
}

/// DELETE /api/admin/orders/{id}
async fn delete_order(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    if !state.order_repo.delete_order(id).await? {
        return Err(AppError::NotFoundError(format!("Order {} not found", id)));
    }
    tracing::info!("Deleted order {}", id);
    Ok(StatusCode::NO_CONTENT)
}
