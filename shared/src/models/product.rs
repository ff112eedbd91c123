//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Variant gender
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Unisex,
    Male,
    Female,
    Kids,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Unisex => "unisex",
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Kids => "kids",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Purchasable product variant (size/color/gender combination)
///
/// Embedded in the product payload; there is no per-variant endpoint.
/// Numeric fields are never null on the wire, absent input coerces to zero
/// before assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub gender: Gender,
    pub size: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub mrp: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    /// Server may auto-generate when absent
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Create/update product payload
///
/// Variants travel embedded in this single request; the whole product is
/// one atomic creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    /// Externally-facing identifier, distinct from the database id
    pub item_id: String,
    pub item_name: String,
    pub model: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub brand_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Optional, server-defaulted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<i64>,
    pub variants: Vec<Variant>,
}

/// Persisted product (server-owned, read by the client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub item_id: String,
    pub item_name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub subcategory_id: Option<i64>,
    #[serde(default)]
    pub brand_id: Option<i64>,
    // Resolved display names; older backend revisions omit them.
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub subcategory_name: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
