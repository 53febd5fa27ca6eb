//! Average rating and review count derived from a spot's reviews.

use crate::models::{Fields, Review, Spot};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 5;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub number_of_reviews: u32,
}

impl RatingSummary {
    /// Arithmetic mean over every review. Ratings outside 0..=5 are clamped
    /// so the average always stays in range.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return RatingSummary::default();
        }

        let total: i64 = reviews
            .iter()
            .map(|review| i64::from(review.rating.clamp(MIN_RATING, MAX_RATING)))
            .sum();

        RatingSummary {
            average_rating: total as f64 / reviews.len() as f64,
            number_of_reviews: u32::try_from(reviews.len()).unwrap_or(u32::MAX),
        }
    }

    /// The spot fields this summary owns, ready for a merge write.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("averageRating".into(), Value::from(self.average_rating));
        fields.insert("numberOfReviews".into(), Value::from(self.number_of_reviews));
        fields
    }

    pub fn apply_to(&self, spot: &mut Spot) {
        spot.average_rating = self.average_rating;
        spot.number_of_reviews = self.number_of_reviews;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Identity, Record};

    fn reviews(ratings: &[i32]) -> Vec<Review> {
        ratings
            .iter()
            .map(|&rating| {
                let mut review = Review::new(&Identity::anonymous());
                review.rating = rating;
                review
            })
            .collect()
    }

    #[test]
    fn test_average_of_three() {
        let summary = RatingSummary::from_reviews(&reviews(&[3, 4, 5]));
        assert_eq!(summary.average_rating, 4.0);
        assert_eq!(summary.number_of_reviews, 3);
    }

    #[test]
    fn test_no_reviews() {
        let summary = RatingSummary::from_reviews(&[]);
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.number_of_reviews, 0);
    }

    #[test]
    fn test_out_of_range_ratings_are_clamped() {
        let summary = RatingSummary::from_reviews(&reviews(&[9, -2]));
        assert_eq!(summary.average_rating, 2.5);
        assert_eq!(summary.number_of_reviews, 2);
    }

    #[test]
    fn test_summary_fields_decode_into_spot() {
        let summary = RatingSummary::from_reviews(&reviews(&[5, 3]));
        let mut spot = Spot::new(&Identity::anonymous());
        summary.apply_to(&mut spot);

        let mut fields = spot.to_fields();
        fields.extend(summary.to_fields());
        let decoded = Spot::from_fields(&fields);
        assert_eq!(decoded.average_rating, 4.0);
        assert_eq!(decoded.number_of_reviews, 2);
    }
}
