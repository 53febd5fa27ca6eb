use super::{float_field, int_field, string_field, DocumentId, Fields, Identity, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Spot {
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub average_rating: f64,
    pub number_of_reviews: u32,
    pub posting_user_id: String,
    #[serde(default)]
    pub document_id: DocumentId,
}

impl Spot {
    pub fn new(poster: &Identity) -> Self {
        Spot {
            name: String::new(),
            address: String::new(),
            coordinate: Coordinate::default(),
            average_rating: 0.0,
            number_of_reviews: 0,
            posting_user_id: poster.email.clone(),
            document_id: String::new(),
        }
    }
}

impl Record for Spot {
    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::from(self.name.as_str()));
        fields.insert("address".into(), Value::from(self.address.as_str()));
        fields.insert("latitude".into(), Value::from(self.coordinate.latitude));
        fields.insert("longitude".into(), Value::from(self.coordinate.longitude));
        fields.insert("averageRating".into(), Value::from(self.average_rating));
        fields.insert("numberOfReviews".into(), Value::from(self.number_of_reviews));
        fields.insert(
            "postingUserID".into(),
            Value::from(self.posting_user_id.as_str()),
        );
        fields
    }

    fn from_fields(fields: &Fields) -> Self {
        Spot {
            name: string_field(fields, "name"),
            address: string_field(fields, "address"),
            coordinate: Coordinate::new(
                float_field(fields, "latitude"),
                float_field(fields, "longitude"),
            ),
            average_rating: float_field(fields, "averageRating"),
            number_of_reviews: u32::try_from(int_field(fields, "numberOfReviews")).unwrap_or(0),
            posting_user_id: string_field(fields, "postingUserID"),
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
