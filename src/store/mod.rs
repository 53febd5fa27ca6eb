//! Seams to the hosted document database and blob storage.
//!
//! Documents live in collections addressed by slash-separated paths
//! (`spots`, `spots/{spotID}/reviews`, `spots/{spotID}/photos`). Blobs are
//! addressed by `{spotID}/{photoID}`. Both traits are object safe so a
//! gateway can hold any backend behind an `Arc<dyn _>`.

pub mod memory;

use crate::error::StoreResult;
use crate::models::{Document, DocumentId, Fields};
use async_trait::async_trait;

pub use memory::MemoryStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document with a store-generated id and returns that id.
    async fn add_document(&self, collection: &str, fields: Fields) -> StoreResult<DocumentId>;

    /// Creates or fully replaces the document `id`.
    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    /// Creates the document `id` or overwrites only the given fields.
    async fn merge_document(&self, collection: &str, id: &str, fields: Fields)
        -> StoreResult<()>;

    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Returns true if a document was removed.
    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// All documents of a collection in insertion order.
    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<Document>>;
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put_blob(&self, key: &str, data: Vec<u8>, content_type: &str) -> StoreResult<()>;

    async fn get_blob(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
}

/// Path builders for every collection and blob the app touches.
pub mod paths {
    pub const SPOTS: &str = "spots";

    pub fn reviews(spot_id: &str) -> String {
        format!("{SPOTS}/{spot_id}/reviews")
    }

    pub fn photos(spot_id: &str) -> String {
        format!("{SPOTS}/{spot_id}/photos")
    }

    pub fn document(collection: &str, id: &str) -> String {
        format!("{collection}/{id}")
    }

    pub fn photo_blob(spot_id: &str, photo_id: &str) -> String {
        format!("{spot_id}/{photo_id}")
    }
}

pub(crate) fn new_document_id() -> DocumentId {
    uuid::Uuid::new_v4().simple().to_string()
}
