use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynJwtService, errors::ErrorResponse};
use tracing::warn;

pub const TOKEN_COOKIE: &str = "token";

/// Resolves the caller from the `token` cookie or a bearer header and stores
/// the decoded claims in the request extensions. A cookie that fails to verify
/// does not shadow a valid bearer token.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let from_cookie = cookie_jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string());
    let from_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(str::to_owned);

    let candidates: Vec<String> = [from_cookie, from_header]
        .into_iter()
        .flatten()
        .filter(|token| !token.trim().is_empty())
        .collect();

    if candidates.is_empty() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail("Access denied. No token provided.")),
        ));
    }

    let verified = candidates
        .iter()
        .find_map(|token| match jwt.verify_token(token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                warn!("🔒 Rejected token: {err}");
                None
            }
        });

    let Some(claims) = verified else {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::fail("Invalid or expired token")),
        ));
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::to_bytes, middleware, routing::get};
    use shared::config::{Claims, JwtConfig};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn whoami(Extension(claims): Extension<Claims>) -> String {
        format!("{}:{}", claims.user_id, claims.role)
    }

    fn app(jwt: DynJwtService) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(middleware::from_fn(auth_middleware))
            .layer(Extension(jwt))
    }

    async fn message_of(response: axum::response::Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.status, "fail");
        payload.message
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let jwt: DynJwtService = Arc::new(JwtConfig::new("secret"));
        let response = app(jwt)
            .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message_of(response).await, "Access denied. No token provided.");
    }

    #[tokio::test]
    async fn bad_token_is_forbidden() {
        let jwt: DynJwtService = Arc::new(JwtConfig::new("secret"));
        let response = app(jwt)
            .oneshot(
                Request::get("/whoami")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(message_of(response).await, "Invalid or expired token");
    }

    #[tokio::test]
    async fn bearer_and_cookie_tokens_are_accepted() {
        let jwt: DynJwtService = Arc::new(JwtConfig::new("secret"));
        let token = jwt.generate_token(9, "f@farm.test", "farmer").unwrap();

        let via_header = app(jwt.clone())
            .oneshot(
                Request::get("/whoami")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(via_header.status(), StatusCode::OK);
        let body = to_bytes(via_header.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"9:farmer");

        let via_cookie = app(jwt)
            .oneshot(
                Request::get("/whoami")
                    .header(header::COOKIE, format!("token={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(via_cookie.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stale_cookie_does_not_hide_a_valid_bearer_token() {
        let jwt: DynJwtService = Arc::new(JwtConfig::new("secret"));
        let token = jwt.generate_token(4, "b@farm.test", "buyer").unwrap();

        for cookie in ["token=stale.jwt.value", "token="] {
            let response = app(jwt.clone())
                .oneshot(
                    Request::get("/whoami")
                        .header(header::COOKIE, cookie)
                        .header(header::AUTHORIZATION, format!("Bearer {token}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "cookie {cookie:?}");
        }

        let response = app(jwt)
            .oneshot(
                Request::get("/whoami")
                    .header(header::COOKIE, "token=stale.jwt.value")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
