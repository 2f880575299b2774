use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use serde_json::{json, Value};
use studio_core::content::SiteContent;
use studio_core::navigation::{NavItem, NAV_ITEMS};
use studio_core::settings::{BackgroundSettings, CharacterImage, DiscountSettings, RulesContent, SettingKey};

use crate::settings::{load_character_image, load_setting};
use crate::extract::Json;
use crate::{error::AppError, state::AppState};

/// Everything the landing page needs besides the catalog lists.
#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub content: SiteContent,
    pub background: BackgroundSettings,
    pub discount: DiscountSettings,
    pub rules: RulesContent,
    pub character_image: CharacterImage,
    pub navigation: Vec<NavItem>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/site", get(get_site))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/site
async fn get_site(State(state): State<AppState>) -> Result<Json<SiteResponse>, AppError> {
    let (content, background, discount, rules, character_image) = tokio::try_join!(
        load_setting::<SiteContent>(&state, SettingKey::Content),
        load_setting::<BackgroundSettings>(&state, SettingKey::Background),
        load_setting::<DiscountSettings>(&state, SettingKey::Discount),
        load_setting::<RulesContent>(&state, SettingKey::Rules),
        load_character_image(&state),
    )?;

    Ok(Json(SiteResponse {
        content,
        background,
        discount,
        rules,
        character_image,
        navigation: NAV_ITEMS.to_vec(),
    }))
}
