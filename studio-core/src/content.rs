use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

pub const AVAILABLE_FONTS: [&str; 6] = [
    "Rubik",
    "Heebo",
    "Assistant",
    "Varela Round",
    "Secular One",
    "Alef",
];

/// Editable copy for the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteContent {
    /// URL of the uploaded logo; empty means the bundled default.
    pub hero_logo: String,
    pub hero_title: String,
    pub hero_title_accent: String,
    pub hero_subtitle: String,
    pub welcome_title: String,
    pub videos_title: String,
    pub shorts_title: String,
    pub contact_title: String,
    pub pricing_title: String,
    pub font_family: String,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            hero_logo: String::new(),
            hero_title: "Crazy".to_string(),
            hero_title_accent: "Edits".to_string(),
            hero_subtitle: "עריכות וידאו מקצועיות בעולם המיינקראפט".to_string(),
            welcome_title: "🌟 ברוכים הבאים ל-CrazyPlay Edits 🌟".to_string(),
            videos_title: "🎬 דוגמאות סרטונים".to_string(),
            shorts_title: "📱 דוגמאות שורטס".to_string(),
            contact_title: "📞 יצירת קשר".to_string(),
            pricing_title: "💰 מחירון".to_string(),
            font_family: "Rubik".to_string(),
        }
    }
}

impl SiteContent {
    /// Prepare an edited copy for saving on top of `current`.
    ///
    /// An empty logo in the edit keeps the stored one: the admin form submits
    /// an empty field when the logo hasn't been touched.
    pub fn merged_for_save(mut self, current: &SiteContent) -> CoreResult<Self> {
        if !AVAILABLE_FONTS.contains(&self.font_family.as_str()) {
            return Err(CoreError::ValidationError(format!(
                "Unsupported font family: {}",
                self.font_family
            )));
        }
        if self.hero_logo.trim().is_empty() {
            self.hero_logo = current.hero_logo.clone();
        }
        Ok(self)
    }
}
