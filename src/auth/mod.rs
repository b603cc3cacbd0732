//! Admin authentication: password hashing, session tokens, the login-side
//! [`TokenIssuer`] and the request-side [`AuthGuard`].

pub mod guard;
pub mod issuer;
pub mod password;
pub mod token;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use serde::Serialize;
use thiserror::Error;

pub use guard::{require_admin, AuthGuard};
pub use issuer::{CredentialStore, TokenIssuer};
pub use token::{SessionClaims, SessionKeys, SessionToken, SESSION_TTL_DAYS};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("请输入用户名和密码")]
    MissingCredentials,
    #[error("用户名或密码错误")]
    InvalidCredentials,
    #[error("未登录或授权格式错误")]
    Unauthorized,
    #[error("登录已失效，请重新登录")]
    InvalidToken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized | AuthError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The caller identity the guard attaches to an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub admin_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = crate::error::AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminIdentity>()
            .copied()
            .ok_or_else(|| AuthError::Unauthorized.into())
    }
}
