use axum::{extract::State, routing::get, Router};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use studio_core::content::{SiteContent, AVAILABLE_FONTS};
use studio_core::settings::{
    background_presets, decode_setting, BackgroundPreset, BackgroundSettings, CharacterImage,
    DiscountSettings, RulesContent, SettingKey,
};

use crate::extract::Json;
use crate::{error::AppError, state::AppState};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/settings/content", get(get_content).put(update_content))
        .route("/settings/fonts", get(list_fonts))
        .route("/settings/background", get(get_background).put(update_background))
        .route("/settings/background/presets", get(list_background_presets))
        .route("/settings/discount", get(get_discount).put(update_discount))
        .route("/settings/rules", get(get_rules).put(update_rules))
        .route(
            "/settings/character-image",
            get(get_character_image).put(update_character_image),
        )
}

// ============================================================================
// Store helpers
// ============================================================================

pub(crate) async fn load_raw(state: &AppState, key: SettingKey) -> Result<Option<Value>, AppError> {
    let stored = state.settings_repo.get_setting(key).await?;
    Ok(stored.map(|s| s.value))
}

/// Stored value merged over defaults.
pub(crate) async fn load_setting<T>(state: &AppState, key: SettingKey) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    Ok(decode_setting(key, load_raw(state, key).await?))
}

pub(crate) async fn load_character_image(state: &AppState) -> Result<CharacterImage, AppError> {
    Ok(CharacterImage::from_stored(load_raw(state, SettingKey::CharacterImage).await?))
}

async fn store_setting<T: Serialize>(state: &AppState, key: SettingKey, value: &T) -> Result<(), AppError> {
    let value = serde_json::to_value(value)?;
    state.settings_repo.upsert_setting(key, &value).await?;
    tracing::info!("Updated setting '{}'", key.as_str());
    Ok(())
}

// ============================================================================
// Content
// ============================================================================

/// GET /api/admin/settings/content
async fn get_content(State(state): State<AppState>) -> Result<Json<SiteContent>, AppError> {
    Ok(Json(load_setting(&state, SettingKey::Content).await?))
}

/// PUT /api/admin/settings/content
async fn update_content(
    State(state): State<AppState>,
    Json(content): Json<SiteContent>,
) -> Result<Json<SiteContent>, AppError> {
    let current: SiteContent = load_setting(&state, SettingKey::Content).await?;
    let content = content.merged_for_save(&current)?;
    store_setting(&state, SettingKey::Content, &content).await?;
    Ok(Json(content))
}

/// GET /api/admin/settings/fonts
async fn list_fonts() -> Json<Value> {
    Json(json!({ "fonts": AVAILABLE_FONTS }))
}

// ============================================================================
// Background
// ============================================================================

async fn get_background(State(state): State<AppState>) -> Result<Json<BackgroundSettings>, AppError> {
    Ok(Json(load_setting(&state, SettingKey::Background).await?))
}

async fn update_background(
    State(state): State<AppState>,
    Json(background): Json<BackgroundSettings>,
) -> Result<Json<BackgroundSettings>, AppError> {
    background.validate()?;
    store_setting(&state, SettingKey::Background, &background).await?;
    Ok(Json(background))
}

async fn list_background_presets() -> Json<Vec<BackgroundPreset>> {
    Json(background_presets())
}

// ============================================================================
// Discount
// ============================================================================

async fn get_discount(State(state): State<AppState>) -> Result<Json<DiscountSettings>, AppError> {
    Ok(Json(load_setting(&state, SettingKey::Discount).await?))
}

async fn update_discount(
    State(state): State<AppState>,
    Json(discount): Json<DiscountSettings>,
) -> Result<Json<DiscountSettings>, AppError> {
    discount.validate()?;
    store_setting(&state, SettingKey::Discount, &discount).await?;
    Ok(Json(discount))
}

// ============================================================================
// Rules
// ============================================================================

async fn get_rules(State(state): State<AppState>) -> Result<Json<RulesContent>, AppError> {
    Ok(Json(load_setting(&state, SettingKey::Rules).await?))
}

async fn update_rules(
    State(state): State<AppState>,
    Json(rules): Json<RulesContent>,
) -> Result<Json<RulesContent>, AppError> {
    let rules = rules.normalized()?;
    store_setting(&state, SettingKey::Rules, &rules).await?;
    Ok(Json(rules))
}

// ============================================================================
// Character image
// ============================================================================

async fn get_character_image(State(state): State<AppState>) -> Result<Json<CharacterImage>, AppError> {
    Ok(Json(load_character_image(&state).await?))
}

async fn update_character_image(
    State(state): State<AppState>,
    Json(image): Json<CharacterImage>,
) -> Result<Json<CharacterImage>, AppError> {
    let image = CharacterImage { url: image.url.trim().to_string() };
    store_setting(&state, SettingKey::CharacterImage, &image).await?;
    Ok(Json(image))
}
