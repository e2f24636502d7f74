use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder, StatusCode,
};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::store::{stamp_created, stamp_updated, Document, DocumentStore, SortBy, SortDirection, StoreError};

/// Client for a document store exposed over a PostgREST-style HTTP API.
pub struct RestDocumentStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestDocumentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.database_url.clone(),
            api_key: config.database_api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    fn get_headers(&self, return_representation: bool) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if !self.api_key.is_empty() {
            let key = HeaderValue::from_str(&self.api_key)
                .map_err(|_| StoreError::Configuration("DATABASE_API_KEY is not a valid header value".into()))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| StoreError::Configuration("DATABASE_API_KEY is not a valid header value".into()))?;
            headers.insert("apikey", key);
            headers.insert(AUTHORIZATION, bearer);
        }

        if return_representation {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        Ok(headers)
    }

    fn builder(&self, method: Method, collection: &str) -> Result<RequestBuilder, StoreError> {
        let writes = method != Method::GET;
        let url = self.collection_url(collection);
        debug!("Making {} request to {}", method, url);

        Ok(self.client.request(method, &url).headers(self.get_headers(writes)?))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<Document>, StoreError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                    StoreError::Rejected(rejection_message(&error_text))
                }
                _ => StoreError::Unavailable(format!("{}: {}", status, error_text)),
            });
        }

        let rows: Vec<Value> = response.json().await?;
        rows.into_iter()
            .map(|row| match row {
                Value::Object(document) => Ok(document),
                other => Err(StoreError::Malformed(format!("expected an object, got {}", other))),
            })
            .collect()
    }
}

/// Pulls the human readable `message` out of a store error body when there is one.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn order_param(sort: SortBy) -> String {
    let direction = match sort.direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    format!("{}.{}", sort.field, direction)
}

fn id_filter(id: &str) -> String {
    format!("eq.{}", id)
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<Document, StoreError> {
        stamp_created(&mut document);

        let request = self
            .builder(Method::POST, collection)?
            .json(&Value::Object(document));

        self.send(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Malformed(format!("insert into {} returned no rows", collection)))
    }

    async fn find_all(&self, collection: &str, sort: SortBy) -> Result<Vec<Document>, StoreError> {
        let request = self
            .builder(Method::GET, collection)?
            .query(&[("order", order_param(sort))]);

        self.send(request).await
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let request = self.builder(Method::GET, collection)?.query(&[("id", id_filter(id))]);
        Ok(self.send(request).await?.into_iter().next())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        mut changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        stamp_updated(&mut changes);

        let request = self
            .builder(Method::PATCH, collection)?
            .query(&[("id", id_filter(id))])
            .json(&Value::Object(changes));

        Ok(self.send(request).await?.into_iter().next())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let request = self.builder(Method::DELETE, collection)?.query(&[("id", id_filter(id))]);
        Ok(self.send(request).await?.into_iter().next())
    }
}
