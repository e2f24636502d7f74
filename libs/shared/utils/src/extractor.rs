use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use shared_models::error::AppError;

const MISSING_CONTENT_TYPE: &str = "Expected request with `Content-Type: application/json`";

/// `Json<T>` whose rejections render as the API's `{ message }` 400 body
/// instead of axum's plain-text 415/422 responses.
///
/// A request with neither a body nor a `Content-Type` reads as `{}`, so an
/// empty update applies no changes and an empty create fails field validation.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !req.headers().contains_key(CONTENT_TYPE) {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|rejection| reject(rejection.body_text()))?;

            if !bytes.iter().all(u8::is_ascii_whitespace) {
                return Err(reject(MISSING_CONTENT_TYPE.to_string()));
            }

            return serde_json::from_str("{}")
                .map(JsonBody)
                .map_err(|e| reject(e.to_string()));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| reject(rejection.body_text()))?;

        Ok(JsonBody(value))
    }
}

fn reject(message: String) -> AppError {
    warn!("Rejected request body: {}", message);
    AppError::BadRequest(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Body;
    use axum::http::{self, header::CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Partial {
        name: Option<String>,
    }

    fn request(body: &str, content_type: Option<&str>) -> Request {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn accepts_well_formed_json() {
        let JsonBody(payload) = JsonBody::<Payload>::from_request(
            request(r#"{"name":"Ann"}"#, Some("application/json")),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(payload.name, "Ann");
    }

    #[tokio::test]
    async fn syntax_errors_become_bad_requests() {
        let result = JsonBody::<Payload>::from_request(request("{", Some("application/json")), &()).await;
        assert_matches!(result, Err(AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn type_errors_become_bad_requests() {
        let result =
            JsonBody::<Payload>::from_request(request(r#"{"name":5}"#, Some("application/json")), &()).await;
        assert_matches!(result, Err(AppError::BadRequest(msg)) if msg.contains("name"));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request() {
        let result = JsonBody::<Payload>::from_request(request(r#"{"name":"Ann"}"#, None), &()).await;
        assert_matches!(result, Err(AppError::BadRequest(msg)) if msg == MISSING_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn absent_body_reads_as_empty_object() {
        let JsonBody(partial) = JsonBody::<Partial>::from_request(request("", None), &()).await.unwrap();
        assert_eq!(partial, Partial::default());

        let JsonBody(partial) = JsonBody::<Partial>::from_request(request(" \n", None), &()).await.unwrap();
        assert_eq!(partial, Partial::default());
    }

    #[tokio::test]
    async fn absent_body_still_fails_required_fields() {
        let result = JsonBody::<Payload>::from_request(request("", None), &()).await;
        assert_matches!(result, Err(AppError::BadRequest(msg)) if msg.contains("name"));
    }

    #[tokio::test]
    async fn empty_body_with_json_content_type_is_a_bad_request() {
        let result = JsonBody::<Partial>::from_request(request("", Some("application/json")), &()).await;
        assert_matches!(result, Err(AppError::BadRequest(_)));
    }
}
