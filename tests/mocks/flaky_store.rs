use async_trait::async_trait;
use snacktacular::error::{StoreError, StoreResult};
use snacktacular::store::{BlobStore, DocumentStore, MemoryStore};
use snacktacular::{Document, DocumentId, Fields};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Wraps a [`MemoryStore`] and rejects selected operations on demand.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: Arc<MemoryStore>,
    fail_put_blob: AtomicBool,
    fail_set_document: AtomicBool,
    fail_merge_document: AtomicBool,
    fail_delete_document: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(FlakyStore::default())
    }

    pub fn fail_put_blob(&self, fail: bool) {
        self.fail_put_blob.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set_document(&self, fail: bool) {
        self.fail_set_document.store(fail, Ordering::SeqCst);
    }

    pub fn fail_merge_document(&self, fail: bool) {
        self.fail_merge_document.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete_document(&self, fail: bool) {
        self.fail_delete_document.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, what: &str) -> StoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected(format!("{what} disabled by test")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn add_document(&self, collection: &str, fields: Fields) -> StoreResult<DocumentId> {
        Self::check(&self.fail_set_document, "add_document")?;
        self.inner.add_document(collection, fields).await
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        Self::check(&self.fail_set_document, "set_document")?;
        self.inner.set_document(collection, id, fields).await
    }

    async fn merge_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> StoreResult<()> {
        Self::check(&self.fail_merge_document, "merge_document")?;
        self.inner.merge_document(collection, id, fields).await
    }

    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.inner.get_document(collection, id).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool> {
        Self::check(&self.fail_delete_document, "delete_document")?;
        self.inner.delete_document(collection, id).await
    }

    async fn list_documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.inner.list_documents(collection).await
    }
}

#[async_trait]
impl BlobStore for FlakyStore {
    async fn put_blob(&self, key: &str, data: Vec<u8>, content_type: &str) -> StoreResult<()> {
        Self::check(&self.fail_put_blob, "put_blob")?;
        self.inner.put_blob(key, data, content_type).await
    }

    async fn get_blob(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get_blob(key).await
    }
}
