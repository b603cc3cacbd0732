pub mod admin;
pub mod public;

use axum::{extract::FromRequest, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{error::AppError, state::AppState};

/// `Json` whose rejections answer with the usual `{ message }` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

pub fn create_router(state: AppState) -> Router {
    let static_root = state.config.static_root.clone();
    let api = Router::new()
        .merge(public::router())
        .nest("/admin", admin::router(state.clone()));
    Router::new()
        .nest("/api", api)
        .nest_service("/static", ServeDir::new(static_root))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
