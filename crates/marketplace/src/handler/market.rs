use crate::{
    middleware::{
        jwt::auth_middleware,
        path::IdPath,
        role::admin_middleware,
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::DynMarketService,
    domain::{
        requests::{CreateMarketRequest, UpdateMarketRequest},
        responses::{ApiResponse, MarketResponse, MessageResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/market",
    tag = "Market",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of markets", body = ApiResponse<Vec<MarketResponse>>)
    )
)]
pub async fn get_markets(
    Extension(service): Extension<DynMarketService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/market/{id}",
    tag = "Market",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Market ID")),
    responses(
        (status = 200, description = "Market details", body = ApiResponse<MarketResponse>),
        (status = 404, description = "Market not found")
    )
)]
pub async fn get_market(
    Extension(service): Extension<DynMarketService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/market",
    tag = "Market",
    security(("bearer_auth" = [])),
    request_body = CreateMarketRequest,
    responses(
        (status = 201, description = "Market created", body = ApiResponse<MarketResponse>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn create_market(
    Extension(service): Extension<DynMarketService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateMarketRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_market(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/market/{id}",
    tag = "Market",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Market ID")),
    request_body = UpdateMarketRequest,
    responses(
        (status = 200, description = "Market updated", body = ApiResponse<MarketResponse>),
        (status = 404, description = "Market not found")
    )
)]
pub async fn update_market(
    Extension(service): Extension<DynMarketService>,
    IdPath(id): IdPath,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateMarketRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_market(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/market/{id}",
    tag = "Market",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Market ID")),
    responses(
        (status = 200, description = "Market deleted", body = MessageResponse),
        (status = 404, description = "Market not found")
    )
)]
pub async fn delete_market(
    Extension(service): Extension<DynMarketService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_market(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn market_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let read_routes = OpenApiRouter::new()
        .route("/api/market", get(get_markets))
        .route("/api/market/{id}", get(get_market))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin_routes = OpenApiRouter::new()
        .route("/api/market", post(create_market))
        .route("/api/market/{id}", put(update_market).delete(delete_market))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware));

    read_routes
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.market_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
