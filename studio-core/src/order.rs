use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use studio_shared::Masked;
use uuid::Uuid;

use crate::catalog::PricingPackage;
use crate::{CoreError, CoreResult};

/// Order status as handled by the admin panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> CoreResult<Self> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(CoreError::ValidationError(format!("Unknown order status: {}", other))),
        }
    }
}

/// A customer's request to buy a package. Payment is settled out of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub package_id: Option<Uuid>,
    pub package_name: String,
    pub price: f64,
    pub discord_name: String,
    pub email: Masked<String>,
    pub status: OrderStatus,
    pub paypal_order_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Checkout form as submitted by the public site.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub package_id: Uuid,
    pub discord_name: String,
    pub email: Masked<String>,
}

/// A validated order ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub package_id: Uuid,
    pub package_name: String,
    pub price: f64,
    pub discord_name: String,
    pub email: Masked<String>,
}

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));

pub const DISCORD_NAME_MIN: usize = 2;
pub const DISCORD_NAME_MAX: usize = 50;

impl CheckoutRequest {
    /// Validate the form against the selected package.
    ///
    /// The order keeps a copy of the package name and list price so it still
    /// reads correctly after the package is edited or removed.
    pub fn into_order(self, package: &PricingPackage) -> CoreResult<NewOrder> {
        let discord_name = self.discord_name.trim().to_string();
        let name_len = discord_name.chars().count();
        if !(DISCORD_NAME_MIN..=DISCORD_NAME_MAX).contains(&name_len) {
            return Err(CoreError::ValidationError(format!(
                "Discord name must be {}-{} characters",
                DISCORD_NAME_MIN, DISCORD_NAME_MAX
            )));
        }

        let email = self.email.into_inner().trim().to_string();
        if !EMAIL.is_match(&email) {
            return Err(CoreError::ValidationError("A valid email address is required".to_string()));
        }

        if !package.is_active || package.id != self.package_id {
            return Err(CoreError::NotFound(format!("Package {} is not available", self.package_id)));
        }

        Ok(NewOrder {
            package_id: package.id,
            package_name: package.name.clone(),
            price: package.price,
            discord_name,
            email: Masked(email),
        })
    }
}
