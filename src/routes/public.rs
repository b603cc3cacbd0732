use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::{
        carousel::Carousel,
        product::{Product, ProductDetail},
        rate::{ExchangeRate, RateQuery},
        social_link::SocialLink,
        video::Video,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(products))
        .route("/products/:id", get(product_detail))
        .route("/rates", get(rates))
        .route("/carousels", get(carousels))
        .route("/videos", get(videos))
        .route("/social-links", get(social_links))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog.list_products(true).await?))
}

async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductDetail>, AppError> {
    Ok(Json(state.catalog.product_detail(id).await?))
}

async fn rates(
    State(state): State<AppState>,
    Query(query): Query<RateQuery>,
) -> Result<Json<Vec<ExchangeRate>>, AppError> {
    Ok(Json(state.catalog.list_rates(query.product_id, true).await?))
}

async fn carousels(State(state): State<AppState>) -> Result<Json<Vec<Carousel>>, AppError> {
    Ok(Json(state.content.list_carousels(true).await?))
}

async fn videos(State(state): State<AppState>) -> Result<Json<Vec<Video>>, AppError> {
    Ok(Json(state.content.list_videos(true).await?))
}

async fn social_links(State(state): State<AppState>) -> Result<Json<Vec<SocialLink>>, AppError> {
    Ok(Json(state.content.list_social_links(true).await?))
}
