//! Restaurant search and table reservations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use wayfarer_core::types::{Booking, BookingKind, BookingStatus, Restaurant};

use crate::bookings::{BookingLedger, NewBooking};
use crate::error::ServiceError;
use crate::hotels::{slug, title_case};

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantQuery {
    pub city: String,
    pub cuisine: Option<String>,
    pub date: NaiveDate,
    pub party_size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantReservation {
    pub restaurant: Restaurant,
    pub date: NaiveDate,
    /// Local time, `HH:MM`.
    pub time: String,
    pub party_size: u32,
}

#[async_trait]
pub trait RestaurantService: Send + Sync {
    async fn search(&self, query: &RestaurantQuery) -> Result<Vec<Restaurant>, ServiceError>;

    async fn reserve(&self, reservation: &RestaurantReservation) -> Result<Booking, ServiceError>;
}

/// (cuisine, name pattern, rating, price level). `{}` is replaced by the city.
static KITCHENS: &[(&str, &str, f32, u8)] = &[
    ("italian", "Trattoria {}", 4.6, 2),
    ("japanese", "Sakura {}", 4.5, 3),
    ("french", "Bistro du {}", 4.3, 3),
    ("seafood", "{} Harbour Grill", 4.4, 3),
    ("mexican", "Cantina {}", 4.0, 1),
    ("indian", "{} Spice House", 4.2, 2),
    ("thai", "Baan {}", 4.1, 1),
    ("steakhouse", "{} Chophouse", 4.7, 4),
];

/// Deposit charged per guest and price level when reserving.
const DEPOSIT_PER_LEVEL: f64 = 10.0;

pub struct InMemoryRestaurants {
    ledger: Arc<BookingLedger>,
}

impl InMemoryRestaurants {
    pub fn new(ledger: Arc<BookingLedger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl RestaurantService for InMemoryRestaurants {
    async fn search(&self, query: &RestaurantQuery) -> Result<Vec<Restaurant>, ServiceError> {
        if query.city.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("City is required".to_string()));
        }
        if query.party_size == 0 {
            return Err(ServiceError::InvalidRequest(
                "Party size must be positive".to_string(),
            ));
        }
        let city = title_case(query.city.trim());
        let cuisine = query.cuisine.as_ref().map(|c| c.to_lowercase());

        let mut found: Vec<Restaurant> = KITCHENS
            .iter()
            .filter(|(kind, ..)| cuisine.as_deref().map_or(true, |c| c == *kind))
            .enumerate()
            .map(|(i, (kind, pattern, rating, level))| Restaurant {
                id: format!("rst-{}-{}", slug(&city), kind),
                name: pattern.replace("{}", &city),
                city: city.clone(),
                cuisine: kind.to_string(),
                rating: *rating,
                price_level: *level,
                address: format!("{} Market Street, {}", 3 + i * 9, city),
            })
            .collect();
        found.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        Ok(found)
    }

    async fn reserve(&self, reservation: &RestaurantReservation) -> Result<Booking, ServiceError> {
        if reservation.party_size == 0 {
            return Err(ServiceError::InvalidRequest(
                "Party size must be positive".to_string(),
            ));
        }
        let restaurant = &reservation.restaurant;
        self.ledger.record(NewBooking {
            kind: BookingKind::Restaurant,
            item_id: restaurant.id.clone(),
            title: format!("{} at {}", restaurant.name, reservation.time),
            start_date: reservation.date,
            end_date: None,
            guests: reservation.party_size,
            total_price: DEPOSIT_PER_LEVEL
                * f64::from(restaurant.price_level)
                * f64::from(reservation.party_size),
            status: BookingStatus::Confirmed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(cuisine: Option<&str>) -> RestaurantQuery {
        RestaurantQuery {
            city: "paris".to_string(),
            cuisine: cuisine.map(String::from),
            date: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
            party_size: 2,
        }
    }

    #[tokio::test]
    async fn test_search_all_cuisines_sorted() {
        let svc = InMemoryRestaurants::new(Arc::new(BookingLedger::new()));
        let found = svc.search(&query(None)).await.unwrap();
        assert_eq!(found.len(), KITCHENS.len());
        assert_eq!(found[0].name, "Paris Chophouse");
        assert!(found.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[tokio::test]
    async fn test_search_filters_cuisine() {
        let svc = InMemoryRestaurants::new(Arc::new(BookingLedger::new()));
        let found = svc.search(&query(Some("Italian"))).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Trattoria Paris");
    }

    #[tokio::test]
    async fn test_search_unknown_cuisine_is_empty() {
        let svc = InMemoryRestaurants::new(Arc::new(BookingLedger::new()));
        assert!(svc.search(&query(Some("martian"))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reserve_records_deposit() {
        let ledger = Arc::new(BookingLedger::new());
        let svc = InMemoryRestaurants::new(Arc::clone(&ledger));
        let restaurant = svc.search(&query(Some("italian"))).await.unwrap().remove(0);
        let booking = svc
            .reserve(&RestaurantReservation {
                restaurant,
                date: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
                time: "19:30".to_string(),
                party_size: 4,
            })
            .await
            .unwrap();
        assert!(booking.is_confirmed());
        assert_eq!(booking.title, "Trattoria Paris at 19:30");
        assert!((booking.total_price - 80.0).abs() < f64::EPSILON);
        assert_eq!(ledger.len(), 1);
    }
}
