pub mod admin;
pub mod carousel;
pub mod product;
pub mod rate;
pub mod social_link;
pub mod video;

use url::Url;

use crate::error::AppError;

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} 不能为空")));
    }
    Ok(())
}

/// Accepts site-relative paths (`/static/...`) and absolute http(s) URLs.
pub(crate) fn validate_link(field: &str, value: &str) -> Result<(), AppError> {
    require_text(field, value)?;
    if value.starts_with('/') && !value.starts_with("//") {
        return Ok(());
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(AppError::BadRequest(format!("{field} 不是有效的链接"))),
    }
}

pub(crate) fn validate_optional_link(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(value) => validate_link(field, value),
        None => Ok(()),
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// Blank optional strings are stored as NULL.
pub(crate) fn normalize_optional(input: Option<String>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
