use axum::{
    Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::{
    config::Claims,
    errors::ErrorResponse,
    model::{ROLE_ADMIN, ROLE_FARMER},
};

type Rejection = (StatusCode, Json<ErrorResponse>);

fn require_role(
    claims: Option<&Claims>,
    role: &str,
    denied: &'static str,
) -> Result<(), Rejection> {
    match claims {
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail("User not authenticated")),
        )),
        Some(claims) if claims.has_role(role) => Ok(()),
        Some(_) => Err((StatusCode::FORBIDDEN, Json(ErrorResponse::fail(denied)))),
    }
}

/// Must run after `auth_middleware`.
pub async fn farmer_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, Rejection> {
    require_role(req.extensions().get::<Claims>(), ROLE_FARMER, "Access denied. Farmers only")?;
    Ok(next.run(req).await)
}

/// Must run after `auth_middleware`.
pub async fn admin_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, Rejection> {
    require_role(req.extensions().get::<Claims>(), ROLE_ADMIN, "Forbidden - Admins only")?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Extension, Router, middleware, routing::get};
    use tower::ServiceExt;

    fn claims(role: &str) -> Claims {
        Claims::new(1, "u@farm.test", role, usize::MAX, 0)
    }

    fn farmer_only(claims: Option<Claims>) -> Router {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .route_layer(middleware::from_fn(farmer_middleware));
        match claims {
            Some(c) => router.layer(Extension(c)),
            None => router,
        }
    }

    fn admin_only(claims: Claims) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .route_layer(middleware::from_fn(admin_middleware))
            .layer(Extension(claims))
    }

    async fn status(router: Router) -> StatusCode {
        router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn farmer_gate() {
        assert_eq!(status(farmer_only(None)).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(farmer_only(Some(claims("buyer")))).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(status(farmer_only(Some(claims("farmer")))).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_gate() {
        assert_eq!(status(admin_only(claims("farmer"))).await, StatusCode::FORBIDDEN);
        assert_eq!(status(admin_only(claims("admin"))).await, StatusCode::OK);
    }

    #[test]
    fn rejection_messages() {
        let (code, Json(body)) =
            require_role(Some(&claims("driver")), ROLE_ADMIN, "Forbidden - Admins only")
                .unwrap_err();
        assert_eq!(code, StatusCode::FORBIDDEN);
        assert_eq!(body.message, "Forbidden - Admins only");

        let (code, Json(body)) = require_role(None, ROLE_FARMER, "x").unwrap_err();
        assert_eq!(code, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "User not authenticated");
    }
}
