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
    routing::get,
};
use shared::{
    abstract_trait::DynLogisticsService,
    domain::{
        requests::{CreateLogisticsRequest, UpdateLogisticsRequest},
        responses::{ApiResponse, LogisticsResponse, MessageResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/logistics",
    tag = "Logistics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All logistics records", body = ApiResponse<Vec<LogisticsResponse>>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn get_logistics_records(
    Extension(service): Extension<DynLogisticsService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/logistics/{id}",
    tag = "Logistics",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Logistics ID")),
    responses(
        (status = 200, description = "Logistics record", body = ApiResponse<LogisticsResponse>),
        (status = 404, description = "Logistics not found")
    )
)]
pub async fn get_logistics(
    Extension(service): Extension<DynLogisticsService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/logistics",
    tag = "Logistics",
    security(("bearer_auth" = [])),
    request_body = CreateLogisticsRequest,
    responses(
        (status = 201, description = "Logistics record created", body = ApiResponse<LogisticsResponse>),
        (status = 400, description = "Missing required logistics fields")
    )
)]
pub async fn create_logistics(
    Extension(service): Extension<DynLogisticsService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateLogisticsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_logistics(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/logistics/{id}",
    tag = "Logistics",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Logistics ID")),
    request_body = UpdateLogisticsRequest,
    responses(
        (status = 200, description = "Logistics record updated", body = ApiResponse<LogisticsResponse>),
        (status = 404, description = "Logistics record not found")
    )
)]
pub async fn update_logistics(
    Extension(service): Extension<DynLogisticsService>,
    IdPath(id): IdPath,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateLogisticsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_logistics(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/logistics/{id}",
    tag = "Logistics",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Logistics ID")),
    responses(
        (status = 200, description = "Logistics record deleted", body = MessageResponse),
        (status = 404, description = "Logistics record not found")
    )
)]
pub async fn delete_logistics(
    Extension(service): Extension<DynLogisticsService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_logistics(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn logistics_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/logistics",
            get(get_logistics_records).post(create_logistics),
        )
        .route(
            "/api/logistics/{id}",
            get(get_logistics)
                .put(update_logistics)
                .delete(delete_logistics),
        )
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.logistics_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
