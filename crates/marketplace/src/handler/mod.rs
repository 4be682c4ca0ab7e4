mod admin;
mod auth;
mod farmer;
mod farmer_profile;
mod logistics;
mod market;
mod order;
mod payment;
mod product;

#[cfg(test)]
mod tests;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{
        HeaderValue, Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::admin::admin_routes;
pub use self::auth::auth_routes;
pub use self::farmer::farmer_routes;
pub use self::farmer_profile::farmer_profile_routes;
pub use self::logistics::logistics_routes;
pub use self::market::market_routes;
pub use self::order::order_routes;
pub use self::payment::payment_routes;
pub use self::product::product_routes;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_user_handler,
        auth::login_user_handler,
        auth::logout_handler,
        auth::get_me_handler,

        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,

        farmer::get_my_products,
        farmer::create_my_product,
        farmer::update_my_product,
        farmer::delete_my_product,
        farmer::get_my_orders,

        order::create_order,
        order::get_orders,
        order::get_order,
        order::update_order,
        order::delete_order,

        payment::get_payments,
        payment::get_user_payments,
        payment::get_payment,
        payment::create_payment,
        payment::update_payment,
        payment::delete_payment,

        market::get_markets,
        market::get_market,
        market::create_market,
        market::update_market,
        market::delete_market,

        farmer_profile::get_farmers,
        farmer_profile::get_farmer,
        farmer_profile::create_farmer,
        farmer_profile::update_farmer,
        farmer_profile::delete_farmer,

        logistics::get_logistics_records,
        logistics::get_logistics,
        logistics::create_logistics,
        logistics::update_logistics,
        logistics::delete_logistics,

        admin::get_all_orders,
        admin::get_pending_orders,
        admin::update_order_status,
        admin::approve_payment,
        admin::assign_driver,
        admin::get_order_logistics,
        admin::get_all_logistics,
        admin::get_drivers,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and session endpoints"),
        (name = "Product", description = "Product catalogue"),
        (name = "Farmer", description = "A farmer's own listings and incoming orders"),
        (name = "Order", description = "Buyer orders"),
        (name = "Payment", description = "Order payments"),
        (name = "Market", description = "Market places"),
        (name = "Farmer profile", description = "Farm directory"),
        (name = "Logistics", description = "Delivery records"),
        (name = "Admin", description = "Order fulfilment workflow"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(utoipa::openapi::security::Http::new(
                    utoipa::openapi::security::HttpAuthScheme::Bearer,
                )),
            );
        }
    }
}

pub async fn root_handler() -> &'static str {
    "Digital Farm Marketplace API is running..."
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("CORS_ORIGIN is not a valid header value: {origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ]))
}

pub fn build_router(app_state: AppState) -> Result<Router> {
    let cors = cors_layer(&app_state.cors_origin)?;
    let shared_state = Arc::new(app_state);

    let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(shared_state.clone())
        .merge(auth_routes(shared_state.clone()))
        .merge(product_routes(shared_state.clone()))
        .merge(farmer_routes(shared_state.clone()))
        .merge(order_routes(shared_state.clone()))
        .merge(payment_routes(shared_state.clone()))
        .merge(market_routes(shared_state.clone()))
        .merge(farmer_profile_routes(shared_state.clone()))
        .merge(logistics_routes(shared_state.clone()))
        .merge(admin_routes(shared_state));

    let router_with_layers = api_router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    let (app_router, api) = router_with_layers.split_for_parts();

    let app = app_router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}

pub struct AppRouter;

impl AppRouter {
    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = build_router(app_state)?;

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated with an error")?;

        Ok(())
    }
}
