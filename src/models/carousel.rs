use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{
    default_true, normalize_optional, require_text, validate_link, validate_optional_link,
};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselInput {
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CarouselInput {
    pub fn validated(self) -> Result<Self, AppError> {
        require_text("title", &self.title)?;
        validate_link("imageUrl", self.image_url.trim())?;
        let link_url = normalize_optional(self.link_url);
        validate_optional_link("linkUrl", link_url.as_deref())?;
        Ok(Self {
            title: self.title.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            link_url,
            ..self
        })
    }
}
