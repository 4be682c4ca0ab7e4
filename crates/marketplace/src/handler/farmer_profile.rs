//! Directory of farms, curated by admins.

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
    abstract_trait::DynFarmerService,
    domain::{
        requests::{CreateFarmerRequest, UpdateFarmerRequest},
        responses::{ApiResponse, FarmerResponse, MessageResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/farmers",
    tag = "Farmer profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of farmer profiles", body = ApiResponse<Vec<FarmerResponse>>)
    )
)]
pub async fn get_farmers(
    Extension(service): Extension<DynFarmerService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/farmers/{id}",
    tag = "Farmer profile",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Farmer ID")),
    responses(
        (status = 200, description = "Farmer profile", body = ApiResponse<FarmerResponse>),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn get_farmer(
    Extension(service): Extension<DynFarmerService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/farmers",
    tag = "Farmer profile",
    security(("bearer_auth" = [])),
    request_body = CreateFarmerRequest,
    responses(
        (status = 201, description = "Farmer added", body = ApiResponse<FarmerResponse>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn create_farmer(
    Extension(service): Extension<DynFarmerService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateFarmerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_farmer(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/farmers/{id}",
    tag = "Farmer profile",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Farmer ID")),
    request_body = UpdateFarmerRequest,
    responses(
        (status = 200, description = "Farmer updated", body = ApiResponse<FarmerResponse>),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn update_farmer(
    Extension(service): Extension<DynFarmerService>,
    IdPath(id): IdPath,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateFarmerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_farmer(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/farmers/{id}",
    tag = "Farmer profile",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Farmer ID")),
    responses(
        (status = 200, description = "Farmer deleted", body = MessageResponse),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn delete_farmer(
    Extension(service): Extension<DynFarmerService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_farmer(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn farmer_profile_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let read_routes = OpenApiRouter::new()
        .route("/api/farmers", get(get_farmers))
        .route("/api/farmers/{id}", get(get_farmer))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin_routes = OpenApiRouter::new()
        .route("/api/farmers", post(create_farmer))
        .route("/api/farmers/{id}", put(update_farmer).delete(delete_farmer))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware));

    read_routes
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.farmer_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
