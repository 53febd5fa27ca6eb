use super::{string_field, timestamp_field, timestamp_value, DocumentId, Fields, Identity, Record};
use crate::error::SyncError;
use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Quality used when the caller does not configure one (compression factor 0.5).
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

/// A picture attached to a spot. The image itself lives in the blob store;
/// only the metadata goes into the document.
#[derive(Debug, Clone)]
pub struct Photo {
    pub image: DynamicImage,
    pub description: String,
    pub posted_by: String,
    pub date: DateTime<Utc>,
    pub document_id: DocumentId,
}

impl Photo {
    pub fn new(image: DynamicImage, uploader: &Identity) -> Self {
        Photo {
            image,
            description: String::new(),
            posted_by: uploader.email.clone(),
            date: Utc::now(),
            document_id: String::new(),
        }
    }

    pub fn has_image(&self) -> bool {
        let (width, height) = self.image.dimensions();
        width > 0 && height > 0
    }

    /// Encodes the image as JPEG. Alpha is dropped.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, SyncError> {
        if !self.has_image() {
            return Err(SyncError::Serialization("image has no pixels".into()));
        }

        let rgb = self.image.to_rgb8();
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|e| SyncError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    pub fn decode_image(&mut self, bytes: &[u8]) -> Result<(), SyncError> {
        self.image =
            image::load_from_memory(bytes).map_err(|e| SyncError::Serialization(e.to_string()))?;
        Ok(())
    }

    pub fn metadata(&self) -> PhotoMetadata {
        PhotoMetadata {
            description: self.description.clone(),
            posted_by: self.posted_by.clone(),
            date: self.date,
            document_id: self.document_id.clone(),
        }
    }
}

impl Record for Photo {
    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("description".into(), Value::from(self.description.as_str()));
        fields.insert("postedBy".into(), Value::from(self.posted_by.as_str()));
        fields.insert("date".into(), timestamp_value(&self.date));
        fields
    }

    // The image is not part of the document; it starts out empty.
    fn from_fields(fields: &Fields) -> Self {
        Photo {
            image: DynamicImage::new_rgb8(0, 0),
            description: string_field(fields, "description"),
            posted_by: string_field(fields, "postedBy"),
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

/// Serializable view of a photo without its pixels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhotoMetadata {
    pub description: String,
    pub posted_by: String,
    pub date: DateTime<Utc>,
    pub document_id: DocumentId,
}
