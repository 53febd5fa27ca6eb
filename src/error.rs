use thiserror::Error;

/// Failure reported by a document or blob store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no document or blob at {0}")]
    NotFound(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("invalid stored fields: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "ssr")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure of a sync gateway operation.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("could not serialize image: {0}")]
    Serialization(String),

    #[error("write to {path} failed: {source}")]
    RemoteWrite { path: String, source: StoreError },

    #[error("delete of {path} failed: {source}")]
    RemoteDelete { path: String, source: StoreError },

    #[error("read of {path} failed: {source}")]
    RemoteRead { path: String, source: StoreError },

    /// The blob upload succeeded but the metadata document was never written.
    #[error("blob {blob_key} uploaded but metadata write to {path} failed: {source}")]
    OrphanedBlob {
        blob_key: String,
        path: String,
        source: StoreError,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("spot has no document id")]
    MissingSpotId,

    #[error("record has no document id")]
    MissingDocumentId,
}

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
