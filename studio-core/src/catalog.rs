//! Priced offerings: service packages and courses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::DiscountSettings;
use crate::{CoreError, CoreResult};

pub const DEFAULT_CURRENCY: &str = "ILS";
pub const DEFAULT_COURSE_BUTTON: &str = "הרשמה לקורס";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_button_text() -> String {
    DEFAULT_COURSE_BUTTON.to_string()
}

fn default_true() -> bool {
    true
}

fn validate_price(price: f64) -> CoreResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::ValidationError("Price must be zero or more".to_string()));
    }
    Ok(())
}

fn validate_name(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationError(format!("{} is required", field)));
    }
    Ok(())
}

// ============================================================================
// Pricing packages
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingPackage {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPackage {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl NewPackage {
    pub fn validate(&self) -> CoreResult<()> {
        validate_name("Package name", &self.name)?;
        validate_price(self.price)
    }
}

/// Partial update. An empty `description` clears it; a missing one is left as is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackagePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub features: Option<Vec<String>>,
    pub is_popular: Option<bool>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

impl PackagePatch {
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(name) = &self.name {
            validate_name("Package name", name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    pub fn apply(self, pkg: &mut PricingPackage) {
        if let Some(v) = self.name {
            pkg.name = v;
        }
        if let Some(v) = self.description {
            pkg.description = Some(v).filter(|d| !d.is_empty());
        }
        if let Some(v) = self.price {
            pkg.price = v;
        }
        if let Some(v) = self.currency {
            pkg.currency = v;
        }
        if let Some(v) = self.features {
            pkg.features = v;
        }
        if let Some(v) = self.is_popular {
            pkg.is_popular = v;
        }
        if let Some(v) = self.is_active {
            pkg.is_active = v;
        }
        if let Some(v) = self.display_order {
            pkg.display_order = v;
        }
        pkg.updated_at = Utc::now();
    }
}

/// Read the `features` column leniently: anything other than an array of
/// strings counts as no features.
pub fn features_from_json(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicPackage {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub discounted_price: f64,
    pub currency: String,
    pub features: Vec<String>,
    pub is_popular: bool,
}

impl PublicPackage {
    /// Active packages only, in display order, priced with the current discount.
    pub fn listing(packages: &[PricingPackage], discount: &DiscountSettings) -> Vec<Self> {
        packages
            .iter()
            .filter(|p| p.is_active)
            .map(|p| Self {
                id: p.id,
                name: p.name.clone(),
                description: p.description.clone(),
                price: p.price,
                discounted_price: discount.discounted_price(p.price),
                currency: p.currency.clone(),
                features: p.features.clone(),
                is_popular: p.is_popular,
            })
            .collect()
    }
}

// ============================================================================
// Courses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub button_text: String,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_button_text")]
    pub button_text: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl NewCourse {
    pub fn validate(&self) -> CoreResult<()> {
        validate_name("Course title", &self.title)?;
        validate_price(self.price)
    }
}

/// Partial update, with the same `description` rule as [`PackagePatch`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub button_text: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

impl CoursePatch {
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(title) = &self.title {
            validate_name("Course title", title)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    pub fn apply(self, course: &mut Course) {
        if let Some(v) = self.title {
            course.title = v;
        }
        if let Some(v) = self.description {
            course.description = Some(v).filter(|d| !d.is_empty());
        }
        if let Some(v) = self.price {
            course.price = v;
        }
        if let Some(v) = self.currency {
            course.currency = v;
        }
        if let Some(v) = self.button_text {
            course.button_text = v;
        }
        if let Some(v) = self.is_active {
            course.is_active = v;
        }
        if let Some(v) = self.display_order {
            course.display_order = v;
        }
        course.updated_at = Utc::now();
    }
}

pub fn active_courses(courses: &[Course]) -> Vec<Course> {
    courses.iter().filter(|c| c.is_active).cloned().collect()
}
