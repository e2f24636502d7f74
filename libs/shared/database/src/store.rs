use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use shared_models::error::AppError;

/// A stored record: a flat JSON object keyed by field name.
pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

#[derive(Error, Debug)]
pub enum StoreError {
    /// The store refused the document (schema or constraint violation).
    #[error("Document rejected: {0}")]
    Rejected(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed store response: {0}")]
    Malformed(String),

    #[error("Invalid store configuration: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Maps a store failure onto the HTTP taxonomy. Rejections are the
    /// client's fault (400); everything else is reported as `context` (500).
    pub fn into_app_error(self, context: &str) -> AppError {
        match self {
            StoreError::Rejected(message) => AppError::BadRequest(message),
            other => AppError::Database {
                message: context.to_string(),
                detail: other.to_string(),
            },
        }
    }
}

/// Serializes a typed record into a storable document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(StoreError::Malformed(format!("expected an object, got {}", other))),
        Err(e) => Err(StoreError::Malformed(e.to_string())),
    }
}

/// Decodes a stored document into a typed record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(document)).map_err(|e| StoreError::Malformed(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortBy {
    pub fn ascending(field: &'static str) -> Self {
        Self { field, direction: SortDirection::Ascending }
    }

    pub fn descending(field: &'static str) -> Self {
        Self { field, direction: SortDirection::Descending }
    }

    /// Orders two documents by this key. Missing values sort first.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ordering = compare_values(a.get(self.field), b.get(self.field));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => {
            // Timestamps with different fractional precision do not sort lexically.
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

pub(crate) fn now_rfc3339() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

/// Sets both timestamps on a document about to be inserted.
pub(crate) fn stamp_created(document: &mut Document) {
    let now = now_rfc3339();
    document.insert(CREATED_AT_FIELD.to_string(), now.clone());
    document.insert(UPDATED_AT_FIELD.to_string(), now);
}

pub(crate) fn stamp_updated(changes: &mut Document) {
    changes.remove(ID_FIELD);
    changes.remove(CREATED_AT_FIELD);
    changes.insert(UPDATED_AT_FIELD.to_string(), now_rfc3339());
}

/// Persistence for the clinic's collections.
///
/// Implementations assign `id` on insert and maintain the `createdAt` /
/// `updatedAt` timestamps. Lookups by an id that does not exist return
/// `Ok(None)` rather than an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError>;

    async fn find_all(&self, collection: &str, sort: SortBy) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Overwrites the given fields and returns the document as it is after the write.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        changes: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Removes the document and returns it as it was.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;
}
