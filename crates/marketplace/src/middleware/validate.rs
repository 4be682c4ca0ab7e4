use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

/// JSON body extractor that also runs the `validator` rules of `T`.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(json_value) =
            axum::Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    let payload = json!({
                        "error": "Invalid JSON",
                        "message": rejection.body_text(),
                    });
                    (rejection.status(), axum::Json(payload))
                })?;

        json_value.validate().map_err(|validation_errors| {
            let payload = json!({
                "error": "Validation failed",
                "message": format_validation_errors(&validation_errors),
                "details": format_validation_errors_detailed(&validation_errors)
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload))
        })?;

        Ok(Self(json_value))
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "email" => "Invalid email format".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        "custom" => "Custom validation failed".to_string(),
        _ => format!("Invalid {field}"),
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut error_messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |error| format!("{field}: {}", describe(&field, error)))
        })
        .collect();

    if error_messages.is_empty() {
        return "Validation failed".to_string();
    }

    error_messages.sort();
    error_messages.join("; ")
}

fn format_validation_errors_detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors.iter().map(|e| describe(&field, e)).collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    Value::Object(error_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, body::Body, body::to_bytes, http::header, routing::post};
    use shared::domain::requests::RegisterRequest;
    use tower::ServiceExt;

    async fn echo(SimpleValidatedJson(body): SimpleValidatedJson<RegisterRequest>) -> Json<Value> {
        Json(json!({ "email": body.email }))
    }

    async fn post_json(raw: &str) -> (StatusCode, Value) {
        let response = Router::new()
            .route("/", post(echo))
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(raw.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn malformed_json_is_reported() {
        let (status, body) = post_json("{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid JSON");
    }

    #[tokio::test]
    async fn validation_failures_list_each_field() {
        let (status, body) = post_json(
            r#"{"full_name":"","email":"nope","role":"wizard","password":"123"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"]["email"][0], "Invalid email format");
        assert_eq!(
            body["details"]["password"][0],
            "Password must be at least 6 characters"
        );
        assert!(body["details"]["role"].is_array());
        assert!(body["message"].as_str().unwrap().contains("full_name"));
    }

    #[tokio::test]
    async fn valid_body_reaches_the_handler() {
        let (status, body) = post_json(
            r#"{"full_name":"Jane","email":"jane@farm.test","role":"buyer","password":"secret1"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "jane@farm.test");
    }
}
