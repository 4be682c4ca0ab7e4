use crate::{
    middleware::{jwt::auth_middleware, path::IdPath, validate::SimpleValidatedJson},
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
    abstract_trait::DynPaymentService,
    config::Claims,
    domain::{
        requests::{CreatePaymentRequest, UpdatePaymentRequest},
        responses::{ApiResponse, MessageResponse, PaymentResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/payment",
    tag = "Payment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All payments", body = ApiResponse<Vec<PaymentResponse>>)
    )
)]
pub async fn get_payments(
    Extension(service): Extension<DynPaymentService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/payment/user",
    tag = "Payment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payments for the caller's orders", body = ApiResponse<Vec<PaymentResponse>>)
    )
)]
pub async fn get_user_payments(
    Extension(service): Extension<DynPaymentService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_user(claims.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/payment/{id}",
    tag = "Payment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    Extension(service): Extension<DynPaymentService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/payment",
    tag = "Payment",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_payment(
    Extension(service): Extension<DynPaymentService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreatePaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_payment(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/payment/{id}",
    tag = "Payment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn update_payment(
    Extension(service): Extension<DynPaymentService>,
    IdPath(id): IdPath,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_payment(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/payment/{id}",
    tag = "Payment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment deleted", body = MessageResponse),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn delete_payment(
    Extension(service): Extension<DynPaymentService>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_payment(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn payment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/payment", get(get_payments).post(create_payment))
        .route("/api/payment/user", get(get_user_payments))
        .route(
            "/api/payment/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.payment_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
