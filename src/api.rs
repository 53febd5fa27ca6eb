#[cfg(feature = "ssr")]
use crate::gateway::{SyncGateway, JPEG_CONTENT_TYPE};
#[cfg(feature = "ssr")]
use crate::error::SyncError;
#[cfg(feature = "ssr")]
use crate::models::photo::PhotoMetadata;
#[cfg(feature = "ssr")]
use crate::models::{Coordinate, DocumentId, Identity, Photo, Review, Spot};
#[cfg(feature = "ssr")]
use crate::spots::{sort_spots, SortOrder};
#[cfg(feature = "ssr")]
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
#[cfg(feature = "ssr")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "ssr")]
use tracing::info;

/// Header carrying the signed-in user's email.
#[cfg(feature = "ssr")]
pub const IDENTITY_HEADER: &str = "X-User-Email";

#[cfg(feature = "ssr")]
impl ResponseError for SyncError {
    fn status_code(&self) -> StatusCode {
        match self {
            SyncError::MissingSpotId
            | SyncError::MissingDocumentId
            | SyncError::Serialization(_)
            | SyncError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SyncError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SpotsQuery {
    pub sort: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[cfg(feature = "ssr")]
impl SpotsQuery {
    fn sort_order(&self) -> Result<SortOrder, SyncError> {
        match self.sort.as_deref().unwrap_or("name") {
            "name" => Ok(SortOrder::Name),
            "rating" => Ok(SortOrder::AverageRating),
            "distance" => match (self.lat, self.lon) {
                (Some(lat), Some(lon)) => Ok(SortOrder::Distance(Coordinate::new(lat, lon))),
                _ => Err(SyncError::InvalidRequest(
                    "distance sort needs lat and lon".into(),
                )),
            },
            other => Err(SyncError::InvalidRequest(format!("unknown sort {other:?}"))),
        }
    }
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize, Debug)]
pub struct SpotRequest {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub document_id: DocumentId,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize, Debug)]
pub struct ReviewRequest {
    pub title: String,
    pub text: String,
    pub rating: i32,
    #[serde(default)]
    pub document_id: DocumentId,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SavedResponse {
    pub document_id: DocumentId,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PhotoQuery {
    pub description: Option<String>,
}

#[cfg(feature = "ssr")]
fn identity(req: &HttpRequest) -> Identity {
    req.headers()
        .get(IDENTITY_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|email| !email.is_empty())
        .map(Identity::new)
        .unwrap_or_else(Identity::anonymous)
}

#[cfg(feature = "ssr")]
pub async fn list_spots(
    gateway: web::Data<SyncGateway>,
    query: web::Query<SpotsQuery>,
) -> Result<HttpResponse, SyncError> {
    let order = query.sort_order()?;
    let mut spots = gateway.list_spots().await?;
    sort_spots(&mut spots, &order);
    info!("[API] Returning {} spots", spots.len());
    Ok(HttpResponse::Ok().json(spots))
}

#[cfg(feature = "ssr")]
pub async fn save_spot(
    gateway: web::Data<SyncGateway>,
    req: HttpRequest,
    request: web::Json<SpotRequest>,
) -> Result<HttpResponse, SyncError> {
    let request = request.into_inner();
    let mut spot = Spot::new(&identity(&req));
    spot.name = request.name;
    spot.address = request.address;
    spot.coordinate = request.coordinate;
    spot.document_id = request.document_id;

    // Keep the original poster and the aggregate the gateway maintains
    if !spot.document_id.is_empty() {
        if let Some(existing) = gateway.get_spot(&spot.document_id).await? {
            spot.posting_user_id = existing.posting_user_id;
            spot.average_rating = existing.average_rating;
            spot.number_of_reviews = existing.number_of_reviews;
        }
    }

    let document_id = gateway.save_spot(&spot).await?;
    info!("[API] Saved spot {}", document_id);
    Ok(HttpResponse::Ok().json(SavedResponse { document_id }))
}

#[cfg(feature = "ssr")]
pub async fn list_reviews(
    gateway: web::Data<SyncGateway>,
    spot_id: web::Path<String>,
) -> Result<HttpResponse, SyncError> {
    let reviews = gateway.list_reviews(&spot_id).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[cfg(feature = "ssr")]
pub async fn save_review(
    gateway: web::Data<SyncGateway>,
    req: HttpRequest,
    spot_id: web::Path<String>,
    request: web::Json<ReviewRequest>,
) -> Result<HttpResponse, SyncError> {
    let request = request.into_inner();
    info!(
        "[API] Received review for spot {} (ID: {:?})",
        spot_id, request.document_id
    );

    let mut review = Review::new(&identity(&req));
    review.title = request.title;
    review.text = request.text;
    review.rating = request.rating;
    review.document_id = request.document_id;

    let document_id = gateway.save_review(&review, &spot_id).await?;
    Ok(HttpResponse::Ok().json(SavedResponse { document_id }))
}

#[cfg(feature = "ssr")]
pub async fn delete_review(
    gateway: web::Data<SyncGateway>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, SyncError> {
    let (spot_id, review_id) = path.into_inner();
    let mut review = Review::new(&Identity::anonymous());
    review.document_id = review_id;

    gateway.delete_review(&review, &spot_id).await?;
    Ok(HttpResponse::Ok().body("Review deleted"))
}

#[cfg(feature = "ssr")]
pub async fn list_photos(
    gateway: web::Data<SyncGateway>,
    spot_id: web::Path<String>,
) -> Result<HttpResponse, SyncError> {
    let photos: Vec<PhotoMetadata> = gateway
        .list_photos(&spot_id)
        .await?
        .iter()
        .map(Photo::metadata)
        .collect();
    Ok(HttpResponse::Ok().json(photos))
}

/// Body is the raw image in any format the decoder understands; it is
/// re-encoded as JPEG before upload.
#[cfg(feature = "ssr")]
pub async fn upload_photo(
    gateway: web::Data<SyncGateway>,
    req: HttpRequest,
    spot_id: web::Path<String>,
    query: web::Query<PhotoQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, SyncError> {
    let mut photo = Photo::new(image::DynamicImage::new_rgb8(0, 0), &identity(&req));
    photo.decode_image(&body)?;
    photo.description = query.into_inner().description.unwrap_or_default();

    let document_id = gateway.save_photo(&photo, &spot_id).await?;
    Ok(HttpResponse::Ok().json(SavedResponse { document_id }))
}

#[cfg(feature = "ssr")]
pub async fn photo_image(
    gateway: web::Data<SyncGateway>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, SyncError> {
    let (spot_id, photo_id) = path.into_inner();
    let bytes = gateway.photo_blob(&spot_id, &photo_id).await?;
    Ok(HttpResponse::Ok().content_type(JPEG_CONTENT_TYPE).body(bytes))
}

/// Registers the `/api` routes. Photo uploads may carry up to
/// `max_upload_bytes` of body.
#[cfg(feature = "ssr")]
pub fn configure(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    cfg.service(
        web::scope("/api")
            .route("/spots", web::get().to(list_spots))
            .route("/spots", web::post().to(save_spot))
            .route("/spots/{spot_id}/reviews", web::get().to(list_reviews))
            .route("/spots/{spot_id}/reviews", web::post().to(save_review))
            .route(
                "/spots/{spot_id}/reviews/{review_id}",
                web::delete().to(delete_review),
            )
            .service(
                web::resource("/spots/{spot_id}/photos")
                    .app_data(web::PayloadConfig::new(max_upload_bytes))
                    .route(web::get().to(list_photos))
                    .route(web::post().to(upload_photo)),
            )
            .route(
                "/spots/{spot_id}/photos/{photo_id}/image",
                web::get().to(photo_image),
            ),
    );
}
