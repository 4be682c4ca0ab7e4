use super::build_router;
use crate::{di::Repositories, state::AppState};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::Hashing,
    model::{ORDER_STATUS_PAID, ORDER_STATUS_SHIPPED},
    testing::InMemoryStore,
};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
    jwt: DynJwtService,
}

impl TestApp {
    async fn new() -> Self {
        let store = InMemoryStore::new();
        let repos = Repositories {
            users: store.clone(),
            products: store.clone(),
            farmers: store.clone(),
            markets: store.clone(),
            orders: store.clone(),
            payments: store.clone(),
            logistics: store.clone(),
        };
        let hashing: DynHashing = Arc::new(Hashing::with_cost(4));

        let state =
            AppState::with_repositories(repos, hashing, "test-secret", "http://localhost:5173")
                .await;
        let jwt = state.jwt_config.clone();
        let router = build_router(state).unwrap();

        Self { router, store, jwt }
    }

    fn token_for(&self, role: &str) -> String {
        let user = self
            .store
            .seed_user(role, &format!("{role}@farm.test"), role);
        self.jwt
            .generate_token(user.user_id, &user.email, &user.role)
            .unwrap()
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, payload)
    }
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = TestApp::new().await;
    let response = app
        .send(Request::get("/").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Digital Farm Marketplace API is running...");
}

#[tokio::test]
async fn register_login_and_me() {
    let app = TestApp::new().await;
    let registration = json!({
        "full_name": "Jane Wanjiku",
        "email": "jane@farm.test",
        "role": "buyer",
        "password": "secret1"
    });

    let (status, body) = app
        .call("POST", "/api/auth/register", None, Some(registration.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully!");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = app
        .call("POST", "/api/auth/register", None, Some(registration))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email is already registered");

    let login = Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"email": "jane@farm.test", "password": "secret1"}).to_string(),
        ))
        .unwrap();
    let response = app.send(login).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let token_pair = cookie.split(';').next().unwrap().to_string();
    let me = app
        .send(
            Request::get("/api/auth/me")
                .header(header::COOKIE, token_pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(me.status(), StatusCode::OK);
    let bytes = to_bytes(me.into_body(), usize::MAX).await.unwrap();
    let me: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(me["data"]["email"], "jane@farm.test");
}

#[tokio::test]
async fn login_failures_are_distinguished() {
    let app = TestApp::new().await;
    app.call(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "full_name": "Otieno",
            "email": "otieno@farm.test",
            "role": "farmer",
            "password": "secret1"
        })),
    )
    .await;

    let (status, body) = app
        .call(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "ghost@farm.test", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = app
        .call(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "otieno@farm.test", "password": "wrong-one"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = TestApp::new().await;
    let response = app
        .send(Request::post("/api/auth/logout").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn catalogue_reads_need_a_token_and_writes_need_admin() {
    let app = TestApp::new().await;

    let (status, body) = app.call("GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access denied. No token provided.");

    let (status, body) = app
        .call("GET", "/api/products", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid or expired token");

    let buyer = app.token_for("buyer");
    let (status, _) = app.call("GET", "/api/products", Some(&buyer), None).await;
    assert_eq!(status, StatusCode::OK);

    let product = json!({"farmer_id": 1, "product_name": "Maize", "price": 40.0});
    let (status, body) = app
        .call("POST", "/api/products", Some(&buyer), Some(product.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden - Admins only");

    let admin = app.token_for("admin");
    let (status, body) = app
        .call("POST", "/api/products", Some(&admin), Some(product))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product added successfully");

    let (status, body) = app
        .call(
            "POST",
            "/api/products",
            Some(&admin),
            Some(json!({"farmer_id": 1, "product_name": "  "})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product name and price are required.");
}

#[tokio::test]
async fn product_lookup_validates_the_id() {
    let app = TestApp::new().await;
    let buyer = app.token_for("buyer");

    let (status, body) = app
        .call("GET", "/api/products/abc", Some(&buyer), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid product ID. Must be a number.");

    let (status, body) = app
        .call("GET", "/api/products/999", Some(&buyer), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let admin = app.token_for("admin");
    let (status, body) = app
        .call(
            "PUT",
            "/api/products/999",
            Some(&admin),
            Some(json!({"price": 10.0})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn farmers_manage_only_their_own_products() {
    let app = TestApp::new().await;

    let buyer = app.token_for("buyer");
    let (status, body) = app
        .call("GET", "/api/farmer/products/mine", Some(&buyer), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied. Farmers only");

    let farmer = app.token_for("farmer");
    let (status, body) = app
        .call(
            "POST",
            "/api/farmer/products",
            Some(&farmer),
            Some(json!({"name": "Kale", "price": 12.5, "quantity": 30})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = body["data"]["product_id"].as_i64().unwrap();

    let (status, body) = app
        .call(
            "POST",
            "/api/farmer/products",
            Some(&farmer),
            Some(json!({"name": "Kale"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name, price, and quantity are required");

    let (status, body) = app
        .call("GET", "/api/farmer/products/mine", Some(&farmer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let rival = app.token_for("farmer");
    let uri = format!("/api/farmer/products/{product_id}");
    let (status, body) = app
        .call("PUT", &uri, Some(&rival), Some(json!({"price": 1.0})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You can only edit your own products");

    let (status, body) = app.call("DELETE", &uri, Some(&rival), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You can only delete your own products");

    let (status, body) = app.call("DELETE", &uri, Some(&farmer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");
}

#[tokio::test]
async fn orders_default_their_total_and_status() {
    let app = TestApp::new().await;
    let product = app.store.seed_product(1, "Tomatoes", dec!(12.5), 100);
    let buyer = app.token_for("buyer");

    let (status, body) = app
        .call(
            "POST",
            "/api/order",
            Some(&buyer),
            Some(json!({"product_id": product.product_id, "quantity": 4})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Order created successfully");
    assert_eq!(body["data"]["total_amount"].as_f64(), Some(50.0));
    assert_eq!(body["data"]["status"], "pending");

    let (status, body) = app.call("GET", "/api/order", Some(&buyer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .call(
            "POST",
            "/api/order",
            Some(&buyer),
            Some(json!({"product_id": 999, "quantity": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (status, body) = app
        .call("GET", "/api/order/999", Some(&buyer), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Order not found");
}

#[tokio::test]
async fn admin_approves_payment_then_assigns_a_driver() {
    let app = TestApp::new().await;
    let product = app.store.seed_product(1, "Onions", dec!(8), 50);
    let buyer = app.store.seed_user("Buyer", "buyer@farm.test", "buyer");
    let order = app
        .store
        .seed_order(buyer.user_id, product.product_id, 2, "pending");
    let admin = app.token_for("admin");

    let (status, body) = app
        .call("GET", "/api/admin/orders/pending", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let approve = format!("/api/admin/orders/{}/approve-payment", order.order_id);
    let (status, body) = app.call("POST", &approve, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment approved successfully");
    assert_eq!(
        app.store.order(order.order_id).unwrap().status,
        ORDER_STATUS_PAID
    );
    assert_eq!(app.store.payments().len(), 1);

    let assign = format!("/api/admin/orders/{}/assign-driver", order.order_id);
    let (status, body) = app
        .call(
            "POST",
            &assign,
            Some(&admin),
            Some(json!({
                "vehicle_number_plate": "KDA 123X",
                "transport_mode": "truck",
                "pickup_location": "Limuru",
                "dropoff_location": "Wakulima Market"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Driver assigned successfully");
    assert_eq!(
        app.store.order(order.order_id).unwrap().status,
        ORDER_STATUS_SHIPPED
    );

    let lookup = format!("/api/admin/orders/{}/logistics", order.order_id);
    let (status, body) = app.call("GET", &lookup, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["delivered"], false);

    let (status, body) = app
        .call("POST", "/api/admin/orders/999/approve-payment", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn paid_orders_survive_a_product_delete() {
    let app = TestApp::new().await;
    let farmer = app.store.seed_user("Grower", "grower@farm.test", "farmer");
    let farmer_token = app
        .jwt
        .generate_token(farmer.user_id, &farmer.email, &farmer.role)
        .unwrap();
    let product = app.store.seed_product(farmer.user_id, "Beans", dec!(6), 20);
    let order = app.store.seed_order(99, product.product_id, 3, "pending");
    let admin = app.token_for("admin");

    let approve = format!("/api/admin/orders/{}/approve-payment", order.order_id);
    let (status, _) = app.call("POST", &approve, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/farmer/products/{}", product.product_id);
    let (status, body) = app.call("DELETE", &uri, Some(&farmer_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    assert_eq!(app.store.products().len(), 1);
    assert!(app.store.order(order.order_id).is_some());
    assert_eq!(app.store.payments().len(), 1);
}

#[tokio::test]
async fn non_numeric_ids_get_a_json_error() {
    let app = TestApp::new().await;
    let buyer = app.token_for("buyer");
    let admin = app.token_for("admin");

    for (uri, token) in [
        ("/api/order/abc", &buyer),
        ("/api/payment/abc", &buyer),
        ("/api/market/abc", &buyer),
        ("/api/farmers/abc", &buyer),
        ("/api/logistics/abc", &admin),
        ("/api/admin/orders/abc/logistics", &admin),
    ] {
        let (status, body) = app.call("GET", uri, Some(token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["status"], "error", "{uri}");
        assert_eq!(body["message"], "Invalid ID. Must be a number.", "{uri}");
    }
}

#[tokio::test]
async fn admin_routes_reject_other_roles() {
    let app = TestApp::new().await;
    let farmer = app.token_for("farmer");

    for uri in ["/api/admin/orders", "/api/admin/drivers", "/api/logistics"] {
        let (status, body) = app.call("GET", uri, Some(&farmer), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["message"], "Forbidden - Admins only");
    }
}

#[tokio::test]
async fn logistics_create_requires_every_field() {
    let app = TestApp::new().await;
    let admin = app.token_for("admin");

    let (status, body) = app
        .call(
            "POST",
            "/api/logistics",
            Some(&admin),
            Some(json!({"order_id": 1, "vehicle_number_plate": "KDA 123X"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required logistics fields");
}

#[tokio::test]
async fn market_writes_are_admin_only() {
    let app = TestApp::new().await;
    let buyer = app.token_for("buyer");
    let admin = app.token_for("admin");
    let market = json!({"market_name": "Wakulima", "location": "Nairobi"});

    let (status, _) = app
        .call("POST", "/api/market", Some(&buyer), Some(market.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call("POST", "/api/market", Some(&admin), Some(market))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Market created successfully");

    let (status, body) = app.call("GET", "/api/market", Some(&buyer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["market_name"], "Wakulima");

    let (status, body) = app
        .call("DELETE", "/api/farmers/42", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Farmer not found");
}

#[tokio::test]
async fn metrics_expose_service_counters() {
    let app = TestApp::new().await;
    let buyer = app.token_for("buyer");
    app.call("GET", "/api/products", Some(&buyer), None).await;

    let response = app
        .send(Request::get("/metrics").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("product_service_request_counter_total"));
}

#[tokio::test]
async fn cors_preflight_allows_the_configured_origin() {
    let app = TestApp::new().await;
    let response = app
        .send(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/products")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}
