use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Extension, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use studio_core::auth::{ChangePasswordRequest, StoredPassword};
use studio_core::settings::SettingKey;

use crate::middleware::{AdminClaims, ADMIN_ROLE};
use crate::extract::Json;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    expires_in: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/password", put(change_password))
}

async fn stored_password(state: &AppState) -> Result<StoredPassword, AppError> {
    let stored = state.settings_repo.get_setting(SettingKey::AdminPassword).await?;
    Ok(StoredPassword::from_setting(
        stored.map(|s| s.value),
        &state.auth.default_admin_password,
    ))
}

/// POST /api/admin/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let stored = stored_password(&state).await?;
    if req.password.is_empty() || !stored.verify(&req.password) {
        tracing::warn!("Rejected admin login attempt");
        return Err(AppError::AuthenticationError("Invalid password".to_string()));
    }

    let claims = AdminClaims {
        sub: "admin".to_owned(),
        role: ADMIN_ROLE.to_owned(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(state.auth.secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    Ok(Json(AuthResponse { token, expires_in: state.auth.expiration }))
}

/// PUT /api/admin/password
async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    let stored = stored_password(&state).await?;
    let updated = req.apply(&stored)?;

    state
        .settings_repo
        .upsert_setting(SettingKey::AdminPassword, &updated.to_setting())
        .await?;

    tracing::info!("Admin password changed by {}", claims.sub);
    Ok(StatusCode::NO_CONTENT)
}
