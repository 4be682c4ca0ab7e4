//! Order fulfilment workflow: status changes, payment approval and driver assignment.

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
    routing::{get, patch, post},
};
use shared::{
    abstract_trait::DynAdminService,
    domain::{
        requests::{AssignDriverRequest, UpdateOrderStatusRequest},
        responses::{
            AdminOrderResponse, ApiResponse, LogisticsResponse, LogisticsWithStatusResponse,
            MessageResponse, PaymentResponse, UserResponse,
        },
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every order, newest first", body = ApiResponse<Vec<AdminOrderResponse>>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn get_all_orders(
    Extension(service): Extension<DynAdminService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all_orders().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/pending",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending orders", body = ApiResponse<Vec<AdminOrderResponse>>)
    )
)]
pub async fn get_pending_orders(
    Extension(service): Extension<DynAdminService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_pending_orders().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = MessageResponse),
        (status = 400, description = "Status is required"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynAdminService>,
    IdPath(id): IdPath,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_order_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/approve-payment",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment approved", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Order not found")
    )
)]
pub async fn approve_payment(
    Extension(service): Extension<DynAdminService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.approve_payment(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/assign-driver",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = AssignDriverRequest,
    responses(
        (status = 200, description = "Driver assigned", body = ApiResponse<LogisticsResponse>),
        (status = 400, description = "All logistics fields are required"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn assign_driver(
    Extension(service): Extension<DynAdminService>,
    IdPath(id): IdPath,
    SimpleValidatedJson(body): SimpleValidatedJson<AssignDriverRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.assign_driver(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}/logistics",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Logistics for the order", body = ApiResponse<LogisticsResponse>),
        (status = 404, description = "Logistics not found")
    )
)]
pub async fn get_order_logistics(
    Extension(service): Extension<DynAdminService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_logistics_by_order(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/logistics",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logistics with order status", body = ApiResponse<Vec<LogisticsWithStatusResponse>>)
    )
)]
pub async fn get_all_logistics(
    Extension(service): Extension<DynAdminService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all_logistics().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/drivers",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registered drivers", body = ApiResponse<Vec<UserResponse>>)
    )
)]
pub async fn get_drivers(
    Extension(service): Extension<DynAdminService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_drivers().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/orders", get(get_all_orders))
        .route("/api/admin/orders/pending", get(get_pending_orders))
        .route("/api/admin/orders/{id}/status", patch(update_order_status))
        .route(
            "/api/admin/orders/{id}/approve-payment",
            post(approve_payment),
        )
        .route("/api/admin/orders/{id}/assign-driver", post(assign_driver))
        .route("/api/admin/orders/{id}/logistics", get(get_order_logistics))
        .route("/api/admin/logistics", get(get_all_logistics))
        .route("/api/admin/drivers", get(get_drivers))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.admin_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
