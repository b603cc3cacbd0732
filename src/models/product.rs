use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{
    default_true, normalize_optional, rate::ExchangeRate, require_text, validate_optional_link,
};
use crate::error::AppError;

/// A gift card or currency the storefront trades.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub rates: Vec<ExchangeRate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ProductInput {
    pub fn validated(self) -> Result<Self, AppError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        let image_url = normalize_optional(self.image_url);
        validate_optional_link("imageUrl", image_url.as_deref())?;
        Ok(Self {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            image_url,
            description: normalize_optional(self.description),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: serde_json::Value) -> ProductInput {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn defaults_and_trimming() {
        let product = input(serde_json::json!({ "name": " Steam ", "category": "gift-card" }))
            .validated()
            .unwrap();
        assert_eq!(product.name, "Steam");
        assert!(product.is_active);
        assert_eq!(product.sort_order, 0);
        assert!(product.image_url.is_none());
    }

    #[test]
    fn blank_name_and_bad_image_are_rejected() {
        let err = input(serde_json::json!({ "name": " ", "category": "gift-card" }))
            .validated()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = input(serde_json::json!({
            "name": "Steam",
            "category": "gift-card",
            "imageUrl": "javascript:alert(1)"
        }))
        .validated()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
