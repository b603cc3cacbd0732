use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{
    default_true, normalize_optional, require_text, validate_link, validate_optional_link,
};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub video_url: String,
    pub cover_url: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInput {
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl VideoInput {
    pub fn validated(self) -> Result<Self, AppError> {
        require_text("title", &self.title)?;
        validate_link("videoUrl", self.video_url.trim())?;
        let cover_url = normalize_optional(self.cover_url);
        validate_optional_link("coverUrl", cover_url.as_deref())?;
        Ok(Self {
            title: self.title.trim().to_string(),
            video_url: self.video_url.trim().to_string(),
            cover_url,
            ..self
        })
    }
}
