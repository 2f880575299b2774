//! Typed views over the `site_settings` key/value store.
//!
//! Every setting is a JSON blob under a well-known key. Reads merge whatever
//! is stored over the built-in defaults, so a partially written blob (or one
//! written by an older frontend) still renders a complete page.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Content,
    Background,
    Discount,
    Rules,
    CharacterImage,
    AdminPassword,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Content => "content",
            SettingKey::Background => "background",
            SettingKey::Discount => "discount",
            SettingKey::Rules => "rules",
            SettingKey::CharacterImage => "character_image",
            SettingKey::AdminPassword => "admin_password",
        }
    }
}

/// A raw row from the settings store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: Value,
    pub updated_at: DateTime<Utc>,
}

/// Decode a stored blob, falling back to `T::default()` when the row is
/// missing or malformed.
pub fn decode_setting<T>(key: SettingKey, stored: Option<Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match stored {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("Stored setting '{}' is malformed, using defaults: {}", key.as_str(), e);
            T::default()
        }),
    }
}

// ============================================================================
// Background
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Solid,
    Gradient,
    Animated,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSettings {
    #[serde(rename = "type")]
    pub kind: BackgroundType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    /// Image shown behind the animated background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_image: Option<String>,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            kind: BackgroundType::Solid,
            color: Some("#0a0a0a".to_string()),
            gradient_from: None,
            gradient_to: None,
            animated: None,
            custom_image: None,
        }
    }
}

impl BackgroundSettings {
    pub fn validate(&self) -> CoreResult<()> {
        if self.kind == BackgroundType::Gradient
            && (is_blank(&self.gradient_from) || is_blank(&self.gradient_to))
        {
            return Err(CoreError::ValidationError(
                "Gradient background needs both gradientFrom and gradientTo".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

#[derive(Debug, Clone, Serialize)]
pub struct BackgroundPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub settings: BackgroundSettings,
}

pub fn background_presets() -> Vec<BackgroundPreset> {
    let animated = |image: Option<&str>| BackgroundSettings {
        kind: BackgroundType::Animated,
        color: None,
        gradient_from: None,
        gradient_to: None,
        animated: Some(true),
        custom_image: image.map(str::to_string),
    };

    vec![
        BackgroundPreset { id: "stars", name: "כוכבים", settings: animated(None) },
        BackgroundPreset {
            id: "galaxy",
            name: "גלקסיה",
            settings: animated(Some("https://images.unsplash.com/photo-1462331940025-496dfbfc7564?w=1920")),
        },
        BackgroundPreset {
            id: "nebula",
            name: "ערפילית",
            settings: animated(Some("https://images.unsplash.com/photo-1507400492013-162706c8c05e?w=1920")),
        },
        BackgroundPreset {
            id: "space",
            name: "חלל",
            settings: animated(Some("https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?w=1920")),
        },
        BackgroundPreset {
            id: "minecraft",
            name: "מיינקראפט",
            settings: animated(Some("https://images.unsplash.com/photo-1587573089734-599d584d93ba?w=1920")),
        },
    ]
}

// ============================================================================
// Discount
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountSettings {
    pub percentage: f64,
    pub is_active: bool,
}

impl DiscountSettings {
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=100.0).contains(&self.percentage) {
            return Err(CoreError::ValidationError(
                "Discount percentage must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }

    pub fn discounted_price(&self, price: f64) -> f64 {
        if !self.is_active || self.percentage <= 0.0 {
            return price;
        }
        price * (1.0 - self.percentage / 100.0)
    }
}

// ============================================================================
// Rules
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesContent {
    pub title: String,
    pub rules: Vec<String>,
}

impl Default for RulesContent {
    fn default() -> Self {
        Self {
            title: "📜 חוקים".to_string(),
            rules: vec![
                "יש לכבד את כל המשתמשים".to_string(),
                "אין לשלוח ספאם או תוכן לא הולם".to_string(),
                "יש לשלם לפני קבלת השירות".to_string(),
                "זמן אספקה עשוי להשתנות בהתאם לעומס".to_string(),
                "אין החזרים לאחר התחלת העבודה".to_string(),
            ],
        }
    }
}

impl RulesContent {
    /// Trim the title and drop blank rule lines.
    pub fn normalized(self) -> CoreResult<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::ValidationError("Rules title is required".to_string()));
        }
        let rules = self
            .rules
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        Ok(Self { title, rules })
    }
}

// ============================================================================
// Character image
// ============================================================================

/// Image shown next to the welcome section. Older rows stored a bare URL
/// string instead of `{ "url": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CharacterImage {
    #[serde(default)]
    pub url: String,
}

impl CharacterImage {
    pub fn from_stored(stored: Option<Value>) -> Self {
        match stored {
            Some(Value::String(url)) => Self { url },
            other => decode_setting(SettingKey::CharacterImage, other),
        }
    }
}
