//! Save, delete and list operations for spots and their reviews and photos.
//!
//! Every call is a single attempt against the stores: no retry, no backoff,
//! no local cache. Callers re-fetch lists after a write to see its effect.

use crate::error::{Result, SyncError};
use crate::models::photo::DEFAULT_JPEG_QUALITY;
use crate::models::{Document, DocumentId, Photo, Record, Review, Spot};
use crate::rating::RatingSummary;
use crate::store::{new_document_id, paths, BlobStore, DocumentStore};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Clone)]
pub struct SyncGateway {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    jpeg_quality: u8,
}

impl SyncGateway {
    pub fn new(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        SyncGateway {
            documents,
            blobs,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Creates the spot when it has no id yet, otherwise overwrites it.
    pub async fn save_spot(&self, spot: &Spot) -> Result<DocumentId> {
        self.upsert(paths::SPOTS, spot).await
    }

    pub async fn list_spots(&self) -> Result<Vec<Spot>> {
        self.list(paths::SPOTS).await
    }

    pub async fn get_spot(&self, spot_id: &str) -> Result<Option<Spot>> {
        require_spot(spot_id)?;
        let document = self
            .documents
            .get_document(paths::SPOTS, spot_id)
            .await
            .map_err(|source| SyncError::RemoteRead {
                path: paths::document(paths::SPOTS, spot_id),
                source,
            })?;
        Ok(document.map(Spot::from_document))
    }

    /// Creates or overwrites a review, then refreshes the spot's rating.
    pub async fn save_review(&self, review: &Review, spot_id: &str) -> Result<DocumentId> {
        require_spot(spot_id)?;
        let id = self.upsert(&paths::reviews(spot_id), review).await?;
        self.refresh_rating_quietly(spot_id).await;
        Ok(id)
    }

    /// Deletes a review, then refreshes the spot's rating. Deleting a review
    /// that is already gone succeeds.
    pub async fn delete_review(&self, review: &Review, spot_id: &str) -> Result<()> {
        require_spot(spot_id)?;
        if review.document_id.is_empty() {
            return Err(SyncError::MissingDocumentId);
        }

        let collection = paths::reviews(spot_id);
        let removed = self
            .documents
            .delete_document(&collection, &review.document_id)
            .await
            .map_err(|source| {
                error!(
                    "[SYNC] Error deleting review {} in spot {}: {}",
                    review.document_id, spot_id, source
                );
                SyncError::RemoteDelete {
                    path: paths::document(&collection, &review.document_id),
                    source,
                }
            })?;

        if removed {
            info!("[SYNC] Deleted review {} in spot {}", review.document_id, spot_id);
        } else {
            debug!(
                "[SYNC] Review {} in spot {} was already absent",
                review.document_id, spot_id
            );
        }

        self.refresh_rating_quietly(spot_id).await;
        Ok(())
    }

    pub async fn list_reviews(&self, spot_id: &str) -> Result<Vec<Review>> {
        require_spot(spot_id)?;
        self.list(&paths::reviews(spot_id)).await
    }

    /// Uploads the photo under a fresh id, then writes its metadata document
    /// under that same id.
    ///
    /// The metadata write only starts once the upload has succeeded, so a
    /// metadata document always has a blob behind it. When the second step
    /// fails the blob stays behind and the error is [`SyncError::OrphanedBlob`].
    pub async fn save_photo(&self, photo: &Photo, spot_id: &str) -> Result<DocumentId> {
        require_spot(spot_id)?;

        let data = photo.encode_jpeg(self.jpeg_quality).map_err(|e| {
            error!("[SYNC] Could not convert image for spot {}: {}", spot_id, e);
            e
        })?;

        let photo_id = new_document_id();
        let blob_key = paths::photo_blob(spot_id, &photo_id);
        self.blobs
            .put_blob(&blob_key, data, JPEG_CONTENT_TYPE)
            .await
            .map_err(|source| {
                error!("[SYNC] Upload of {} failed in spot {}: {}", photo_id, spot_id, source);
                SyncError::RemoteWrite {
                    path: blob_key.clone(),
                    source,
                }
            })?;
        debug!("[SYNC] Uploaded blob {}", blob_key);

        let collection = paths::photos(spot_id);
        self.documents
            .set_document(&collection, &photo_id, photo.to_fields())
            .await
            .map_err(|source| {
                error!(
                    "[SYNC] Error writing photo document {} in spot {}: {}",
                    photo_id, spot_id, source
                );
                SyncError::OrphanedBlob {
                    blob_key: blob_key.clone(),
                    path: paths::document(&collection, &photo_id),
                    source,
                }
            })?;

        info!("[SYNC] Photo saved with ref ID {}", photo_id);
        Ok(photo_id)
    }

    /// Photo metadata only; use [`SyncGateway::load_photo_image`] for pixels.
    pub async fn list_photos(&self, spot_id: &str) -> Result<Vec<Photo>> {
        require_spot(spot_id)?;
        self.list(&paths::photos(spot_id)).await
    }

    pub async fn load_photo_image(&self, mut photo: Photo, spot_id: &str) -> Result<Photo> {
        let bytes = self.photo_blob(spot_id, &photo.document_id).await?;
        photo.decode_image(&bytes)?;
        Ok(photo)
    }

    /// Raw JPEG bytes of a stored photo.
    pub async fn photo_blob(&self, spot_id: &str, photo_id: &str) -> Result<Vec<u8>> {
        require_spot(spot_id)?;
        if photo_id.is_empty() {
            return Err(SyncError::MissingDocumentId);
        }

        let key = paths::photo_blob(spot_id, photo_id);
        self.blobs
            .get_blob(&key)
            .await
            .map_err(|source| SyncError::RemoteRead {
                path: key.clone(),
                source,
            })?
            .ok_or(SyncError::NotFound(key))
    }

    /// Recomputes the spot's rating from the full review collection and
    /// writes it onto the spot document.
    pub async fn refresh_rating(&self, spot_id: &str) -> Result<RatingSummary> {
        let reviews = self.list_reviews(spot_id).await?;
        let summary = RatingSummary::from_reviews(&reviews);

        // A merge would otherwise create a bare spot holding only the rating
        let spot_path = paths::document(paths::SPOTS, spot_id);
        if self.get_spot(spot_id).await?.is_none() {
            debug!("[SYNC] Spot {} does not exist, rating not written", spot_id);
            return Err(SyncError::NotFound(spot_path));
        }

        self.documents
            .merge_document(paths::SPOTS, spot_id, summary.to_fields())
            .await
            .map_err(|source| SyncError::RemoteWrite {
                path: spot_path,
                source,
            })?;

        debug!(
            "[SYNC] Spot {} rated {:.2} over {} reviews",
            spot_id, summary.average_rating, summary.number_of_reviews
        );
        Ok(summary)
    }

    // The next refresh recomputes from scratch, so a failure here is not
    // surfaced to the review operation that triggered it.
    async fn refresh_rating_quietly(&self, spot_id: &str) {
        if let Err(e) = self.refresh_rating(spot_id).await {
            warn!("[SYNC] Could not refresh rating of spot {}: {}", spot_id, e);
        }
    }

    async fn upsert<R: Record>(&self, collection: &str, record: &R) -> Result<DocumentId> {
        let fields = record.to_fields();
        let id = record.document_id();

        if !id.is_empty() {
            self.documents
                .set_document(collection, id, fields)
                .await
                .map_err(|source| {
                    error!("[SYNC] Error updating document {}/{}: {}", collection, id, source);
                    SyncError::RemoteWrite {
                        path: paths::document(collection, id),
                        source,
                    }
                })?;
            info!("[SYNC] Document updated with ref ID {}", id);
            Ok(id.to_string())
        } else {
            let id = self
                .documents
                .add_document(collection, fields)
                .await
                .map_err(|source| {
                    error!("[SYNC] Error creating new document in {}: {}", collection, source);
                    SyncError::RemoteWrite {
                        path: collection.to_string(),
                        source,
                    }
                })?;
            info!("[SYNC] New document created with ref ID {}", id);
            Ok(id)
        }
    }

    async fn list<R: Record>(&self, collection: &str) -> Result<Vec<R>> {
        let documents: Vec<Document> = self
            .documents
            .list_documents(collection)
            .await
            .map_err(|source| {
                error!("[SYNC] Error reading {}: {}", collection, source);
                SyncError::RemoteRead {
                    path: collection.to_string(),
                    source,
                }
            })?;
        debug!("[SYNC] Loaded {} documents from {}", documents.len(), collection);
        Ok(documents.into_iter().map(R::from_document).collect())
    }
}

fn require_spot(spot_id: &str) -> Result<()> {
    if spot_id.is_empty() {
        return Err(SyncError::MissingSpotId);
    }
    Ok(())
}
