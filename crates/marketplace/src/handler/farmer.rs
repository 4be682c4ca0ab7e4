//! Endpoints a farmer uses to manage their own listings and see incoming orders.

use crate::{
    middleware::{
        jwt::auth_middleware,
        path::IdPath,
        role::farmer_middleware,
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
    abstract_trait::{DynOrderService, DynProductService},
    config::Claims,
    domain::{
        requests::FarmerProductRequest,
        responses::{ApiResponse, FarmerOrderResponse, MessageResponse, ProductResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/farmer/products/mine",
    tag = "Farmer",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Products listed by the caller", body = ApiResponse<Vec<ProductResponse>>),
        (status = 403, description = "Farmers only")
    )
)]
pub async fn get_my_products(
    Extension(service): Extension<DynProductService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_mine(claims.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/farmer/products",
    tag = "Farmer",
    security(("bearer_auth" = [])),
    request_body = FarmerProductRequest,
    responses(
        (status = 201, description = "Product added", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Name, price, and quantity are required")
    )
)]
pub async fn create_my_product(
    Extension(service): Extension<DynProductService>,
    Extension(claims): Extension<Claims>,
    SimpleValidatedJson(body): SimpleValidatedJson<FarmerProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_for_farmer(claims.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/farmer/products/{id}",
    tag = "Farmer",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = FarmerProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 403, description = "You can only edit your own products")
    )
)]
pub async fn update_my_product(
    Extension(service): Extension<DynProductService>,
    Extension(claims): Extension<Claims>,
    IdPath(id): IdPath,
    SimpleValidatedJson(body): SimpleValidatedJson<FarmerProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_owned(claims.user_id, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/farmer/products/{id}",
    tag = "Farmer",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 403, description = "You can only delete your own products")
    )
)]
pub async fn delete_my_product(
    Extension(service): Extension<DynProductService>,
    Extension(claims): Extension<Claims>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_owned(claims.user_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/farmer/orders",
    tag = "Farmer",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Orders placed on the caller's products", body = ApiResponse<Vec<FarmerOrderResponse>>)
    )
)]
pub async fn get_my_orders(
    Extension(service): Extension<DynOrderService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_farmer(claims.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn farmer_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/farmer/products/mine", get(get_my_products))
        .route("/api/farmer/products", post(create_my_product))
        .route(
            "/api/farmer/products/{id}",
            put(update_my_product).delete(delete_my_product),
        )
        .route("/api/farmer/orders", get(get_my_orders))
        .route_layer(middleware::from_fn(farmer_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.product_service.clone()))
        .layer(Extension(app_state.di_container.order_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
