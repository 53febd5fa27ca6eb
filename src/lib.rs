//! Sync core for Snacktacular, a food spot discovery app.
//!
//! Spots, their reviews and their photos are kept in a hierarchical
//! document store (`spots/{spotID}/reviews/{reviewID}`,
//! `spots/{spotID}/photos/{photoID}`) with photo payloads in a companion
//! blob store. [`gateway::SyncGateway`] performs the saves, deletes and
//! listings and keeps each spot's average rating in step with its reviews.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod models;
pub mod rating;
pub mod spots;
pub mod store;

pub use error::{Result, StoreError, SyncError};
pub use gateway::SyncGateway;
pub use models::{Coordinate, Document, DocumentId, Fields, Identity, Photo, Record, Review, Spot};
pub use rating::RatingSummary;
pub use spots::{sort_spots, SortOrder};
pub use store::{BlobStore, DocumentStore, MemoryStore};
