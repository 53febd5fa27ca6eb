//! Spot, review and photo records and their storage field mapping.
//!
//! Records are plain data holders. Each one maps to a flat [`Fields`] object
//! for storage and is rebuilt from one with [`Record::from_fields`], which
//! never fails: missing or wrong-typed fields fall back to an empty string,
//! zero, or the current time.

pub mod photo;
pub mod review;
pub mod spot;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use photo::Photo;
pub use review::Review;
pub use spot::{Coordinate, Spot};

/// Field map of a single stored document.
pub type Fields = Map<String, Value>;

/// Identifier assigned to a document by the store or generated client-side.
pub type DocumentId = String;

/// A document as read back from a store: its id plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

/// The acting user, threaded explicitly into anything that records an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Identity {
            email: email.into(),
        }
    }

    // Placeholder used when nobody is signed in
    pub fn anonymous() -> Self {
        Identity::new("Unknown user")
    }
}

/// Conversion between a record and its stored document.
pub trait Record: Sized {
    fn to_fields(&self) -> Fields;

    /// Rebuilds a record from stored fields with an empty document id.
    fn from_fields(fields: &Fields) -> Self;

    fn document_id(&self) -> &str;

    fn set_document_id(&mut self, id: DocumentId);

    fn from_document(document: Document) -> Self {
        let mut record = Self::from_fields(&document.fields);
        record.set_document_id(document.id);
        record
    }
}

pub(crate) fn string_field(fields: &Fields, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

pub(crate) fn float_field(fields: &Fields, key: &str) -> f64 {
    fields.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub(crate) fn int_field(fields: &Fields, key: &str) -> i64 {
    fields.get(key).and_then(Value::as_i64).unwrap_or(0)
}

pub(crate) fn timestamp_field(fields: &Fields, key: &str) -> DateTime<Utc> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|date| date.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

pub(crate) fn timestamp_value(date: &DateTime<Utc>) -> Value {
    Value::String(date.to_rfc3339_opts(SecondsFormat::Nanos, true))
}
