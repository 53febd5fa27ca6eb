use crate::models::{Coordinate, Spot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Client-side ordering of a fetched spot list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    Name,
    /// Nearest to the given point first.
    Distance(Coordinate),
    /// Highest average rating first.
    AverageRating,
}

pub fn sort_spots(spots: &mut [Spot], order: &SortOrder) {
    match order {
        SortOrder::Name => spots.sort_by(by_name),
        SortOrder::Distance(origin) => spots.sort_by(|a, b| {
            let da = origin.distance_to(&a.coordinate);
            let db = origin.distance_to(&b.coordinate);
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        }),
        SortOrder::AverageRating => spots.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| by_name(a, b))
        }),
    }
}

fn by_name(a: &Spot, b: &Spot) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Identity;

    fn spot(name: &str, rating: f64, latitude: f64, longitude: f64) -> Spot {
        let mut spot = Spot::new(&Identity::anonymous());
        spot.name = name.into();
        spot.average_rating = rating;
        spot.coordinate = Coordinate::new(latitude, longitude);
        spot
    }

    fn names(spots: &[Spot]) -> Vec<&str> {
        spots.iter().map(|spot| spot.name.as_str()).collect()
    }

    fn sample() -> Vec<Spot> {
        vec![
            spot("shake Shack", 3.5, 42.335, -71.169),
            spot("El Pelon", 4.5, 42.349, -71.103),
            spot("Pinos Pizza", 4.5, 42.336, -71.149),
        ]
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut spots = sample();
        sort_spots(&mut spots, &SortOrder::Name);
        assert_eq!(names(&spots), vec!["El Pelon", "Pinos Pizza", "shake Shack"]);
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let mut spots = sample();
        sort_spots(&mut spots, &SortOrder::AverageRating);
        assert_eq!(names(&spots), vec!["El Pelon", "Pinos Pizza", "shake Shack"]);
        assert!(spots[0].average_rating >= spots[2].average_rating);
    }

    #[test]
    fn test_sort_by_distance_ascending() {
        let mut spots = sample();
        // Chestnut Hill
        let origin = Coordinate::new(42.3355, -71.1685);
        sort_spots(&mut spots, &SortOrder::Distance(origin));
        assert_eq!(names(&spots), vec!["shake Shack", "Pinos Pizza", "El Pelon"]);
    }
}
