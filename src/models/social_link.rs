use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{
    default_true, normalize_optional, require_text, validate_link, validate_optional_link,
};
use crate::error::AppError;

/// Footer/contact links (WeChat, Telegram, WhatsApp, ...).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: i64,
    pub platform: String,
    pub url: String,
    pub icon_url: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkInput {
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl SocialLinkInput {
    pub fn validated(self) -> Result<Self, AppError> {
        require_text("platform", &self.platform)?;
        validate_link("url", self.url.trim())?;
        let icon_url = normalize_optional(self.icon_url);
        validate_optional_link("iconUrl", icon_url.as_deref())?;
        Ok(Self {
            platform: self.platform.trim().to_string(),
            url: self.url.trim().to_string(),
            icon_url,
            ..self
        })
    }
}
