use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use shared::errors::HttpError;

/// Numeric `{id}` path segment; anything else is a JSON 400.
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        raw.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| HttpError::BadRequest("Invalid ID. Must be a number.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        routing::get,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn echo(IdPath(id): IdPath) -> String {
        id.to_string()
    }

    async fn get_raw(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = Router::new()
            .route("/items/{id}", get(echo))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn numeric_ids_reach_the_handler() {
        let (status, body) = get_raw("/items/42").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"42");
    }

    #[tokio::test]
    async fn non_numeric_ids_get_a_json_error() {
        let (status, body) = get_raw("/items/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["message"], "Invalid ID. Must be a number.");
    }
}
