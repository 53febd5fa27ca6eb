// src/models/review.rs
use super::{
    int_field, string_field, timestamp_field, timestamp_value, DocumentId, Fields, Identity,
    Record,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub title: String,
    pub text: String,
    pub rating: i32,            // 1-5 expected, not validated here
    pub reviewer_user_id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub document_id: DocumentId, // Empty until the review is persisted
}

impl Review {
    /// Blank review authored by `reviewer`, dated now.
    pub fn new(reviewer: &Identity) -> Self {
        Review {
            title: String::new(),
            text: String::new(),
            rating: 0,
            reviewer_user_id: reviewer.email.clone(),
            date: Utc::now(),
            document_id: String::new(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.document_id.is_empty()
    }
}

impl Record for Review {
    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".into(), Value::from(self.title.as_str()));
        fields.insert("text".into(), Value::from(self.text.as_str()));
        fields.insert("rating".into(), Value::from(self.rating));
        fields.insert(
            "reviewerUserID".into(),
            Value::from(self.reviewer_user_id.as_str()),
        );
        fields.insert("date".into(), timestamp_value(&self.date));
        fields
    }

    fn from_fields(fields: &Fields) -> Self {
        Review {
            title: string_field(fields, "title"),
            text: string_field(fields, "text"),
            rating: i32::try_from(int_field(fields, "rating")).unwrap_or(0),
            reviewer_user_id: string_field(fields, "reviewerUserID"),
            date: timestamp_field(fields, "date"),
            document_id: String::new(),
        }
    }

    fn document_id(&self) -> &str {
        &self.document_id
    }

    fn set_document_id(&mut self, id: DocumentId) {
        self.document_id = id;
    }
}
