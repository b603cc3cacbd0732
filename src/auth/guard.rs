use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::{AdminIdentity, AuthError, SessionKeys};
use crate::{error::AppError, state::AppState};

const BEARER_PREFIX: &str = "Bearer ";

/// Validates bearer tokens on protected routes.
#[derive(Clone)]
pub struct AuthGuard {
    keys: Arc<SessionKeys>,
}

impl AuthGuard {
    pub fn new(keys: Arc<SessionKeys>) -> Self {
        Self { keys }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AdminIdentity, AuthError> {
        let token = bearer_token(headers)?;
        let claims = self.keys.verify(token)?;
        Ok(AdminIdentity {
            admin_id: claims.admin_id,
        })
    }
}

/// Only `Bearer <token>` is accepted. Anything after the prefix is handed to
/// token verification, so `Bearer garbage` fails as an invalid token.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;
    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::Unauthorized),
    }
}

/// Middleware for the admin routes; rejects before the handler runs.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = state.guard.authenticate(req.headers())?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
