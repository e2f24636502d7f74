use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::store::{stamp_created, stamp_updated, Document, DocumentStore, SortBy, StoreError, ID_FIELD};

/// Process-local store used when no external store is configured, and in tests.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn has_id(document: &Document, id: &str) -> bool {
    document.get(ID_FIELD).and_then(Value::as_str) == Some(id)
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<Document, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        stamp_created(&mut document);

        debug!("Inserting {} into in-memory collection {}", id, collection);

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn find_all(&self, collection: &str, sort: SortBy) -> Result<Vec<Document>, StoreError> {
        let mut documents = self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default();

        documents.sort_by(|a, b| sort.compare(a, b));
        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| has_id(d, id)).cloned()))
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        mut changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        stamp_updated(&mut changes);

        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| has_id(d, id)))
        else {
            return Ok(None);
        };

        document.extend(changes);
        Ok(Some(document.clone()))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(None);
        };

        Ok(documents
            .iter()
            .position(|d| has_id(d, id))
            .map(|index| documents.remove(index)))
    }
}
