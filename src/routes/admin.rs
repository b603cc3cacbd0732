use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::ApiJson;
use crate::{
    auth::{require_admin, AdminIdentity, SessionToken},
    db::DbPool,
    error::AppError,
    models::{
        carousel::{Carousel, CarouselInput},
        product::{Product, ProductInput},
        rate::{ExchangeRate, ExchangeRateInput},
        social_link::{SocialLink, SocialLinkInput},
        video::{Video, VideoInput},
    },
    state::AppState,
};

/// Everything except `/login` sits behind the bearer-token guard.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/dashboard", get(dashboard))
        .route("/products", get(products_list).post(product_create))
        .route("/products/:id", put(product_update).delete(product_delete))
        .route("/rates", get(rates_list).post(rate_create))
        .route("/rates/:id", put(rate_update).delete(rate_delete))
        .route("/carousels", get(carousels_list).post(carousel_create))
        .route("/carousels/:id", put(carousel_update).delete(carousel_delete))
        .route("/videos", get(videos_list).post(video_create))
        .route("/videos/:id", put(video_update).delete(video_delete))
        .route("/social-links", get(social_links_list).post(social_link_create))
        .route(
            "/social-links/:id",
            put(social_link_update).delete(social_link_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin))
        .route("/login", post(login))
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

async fn login(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<LoginRequest>,
) -> Result<Json<SessionToken>, AppError> {
    let token = state
        .issuer
        .issue_session(
            form.username.as_deref().unwrap_or_default(),
            form.password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(token))
}

async fn me(current: AdminIdentity) -> Json<AdminIdentity> {
    Json(current)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardSummary {
    admin_id: i64,
    product_count: i64,
    rate_count: i64,
    carousel_count: i64,
    video_count: i64,
    social_link_count: i64,
}

async fn dashboard(
    State(state): State<AppState>,
    current: AdminIdentity,
) -> Result<Json<DashboardSummary>, AppError> {
    let db = &state.db;
    Ok(Json(DashboardSummary {
        admin_id: current.admin_id,
        product_count: count_rows(db, "SELECT COUNT(*) FROM products").await?,
        rate_count: count_rows(db, "SELECT COUNT(*) FROM exchange_rates").await?,
        carousel_count: count_rows(db, "SELECT COUNT(*) FROM carousels").await?,
        video_count: count_rows(db, "SELECT COUNT(*) FROM videos").await?,
        social_link_count: count_rows(db, "SELECT COUNT(*) FROM social_links").await?,
    }))
}

async fn count_rows(db: &DbPool, sql: &'static str) -> Result<i64, AppError> {
    Ok(sqlx::query_scalar(sql).fetch_one(db).await?)
}

async fn products_list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog.list_products(false).await?))
}

async fn product_create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.catalog.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn product_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.catalog.update_product(id, input).await?))
}

async fn product_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn rates_list(State(state): State<AppState>) -> Result<Json<Vec<ExchangeRate>>, AppError> {
    Ok(Json(state.catalog.list_rates(None, false).await?))
}

async fn rate_create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ExchangeRateInput>,
) -> Result<impl IntoResponse, AppError> {
    let rate = state.catalog.create_rate(input).await?;
    Ok((StatusCode::CREATED, Json(rate)))
}

async fn rate_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<ExchangeRateInput>,
) -> Result<Json<ExchangeRate>, AppError> {
    Ok(Json(state.catalog.update_rate(id, input).await?))
}

async fn rate_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_rate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn carousels_list(State(state): State<AppState>) -> Result<Json<Vec<Carousel>>, AppError> {
    Ok(Json(state.content.list_carousels(false).await?))
}

async fn carousel_create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CarouselInput>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.content.create_carousel(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn carousel_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<CarouselInput>,
) -> Result<Json<Carousel>, AppError> {
    Ok(Json(state.content.update_carousel(id, input).await?))
}

async fn carousel_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.content.delete_carousel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn videos_list(State(state): State<AppState>) -> Result<Json<Vec<Video>>, AppError> {
    Ok(Json(state.content.list_videos(false).await?))
}

async fn video_create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<VideoInput>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.content.create_video(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn video_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<VideoInput>,
) -> Result<Json<Video>, AppError> {
    Ok(Json(state.content.update_video(id, input).await?))
}

async fn video_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.content.delete_video(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn social_links_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<SocialLink>>, AppError> {
    Ok(Json(state.content.list_social_links(false).await?))
}

async fn social_link_create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SocialLinkInput>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.content.create_social_link(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn social_link_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<SocialLinkInput>,
) -> Result<Json<SocialLink>, AppError> {
    Ok(Json(state.content.update_social_link(id, input).await?))
}

async fn social_link_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.content.delete_social_link(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
