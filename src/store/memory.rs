use super::{new_document_id, BlobStore, DocumentStore};
use crate::error::StoreResult;
use crate::models::{Document, DocumentId, Fields};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Process-local document and blob store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    // Each collection keeps its documents in insertion order
    collections: Mutex<HashMap<String, Vec<Document>>>,
    blobs: Mutex<HashMap<String, StoredBlob>>,
}

#[derive(Debug, Clone)]
struct StoredBlob {
    data: Vec<u8>,
    content_type: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub async fn blob_count(&self) -> usize {
        self.blobs.lock().await.len()
    }

    pub async fn blob_content_type(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .await
            .get(key)
            .map(|blob| blob.content_type.clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add_document(&self, collection: &str, fields: Fields) -> StoreResult<DocumentId> {
        let id = new_document_id();
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        debug!("[MEMORY] Added {}/{}", collection, id);
        Ok(id)
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let mut collections = self.collections.lock().await;
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(existing) => existing.fields = fields,
            None => documents.push(Document {
                id: id.to_string(),
                fields,
            }),
        }
        Ok(())
    }

    async fn merge_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> StoreResult<()> {
        let mut collections = self.collections.lock().await;
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(existing) => existing.fields.extend(fields),
            None => documents.push(Document {
                id: id.to_string(),
                fields,
            }),
        }
        Ok(())
    }

    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut collections = self.collections.lock().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        Ok(documents.len() < before)
    }

    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let collections = self.collections.lock().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put_blob(&self, key: &str, data: Vec<u8>, content_type: &str) -> StoreResult<()> {
        self.blobs.lock().await.insert(
            key.to_string(),
            StoredBlob {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get_blob(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.blobs.lock().await.get(key).map(|blob| blob.data.clone()))
    }
}
