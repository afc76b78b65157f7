//! Hotel search and booking.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use wayfarer_core::types::{Booking, BookingKind, BookingStatus, Hotel};

use crate::bookings::{BookingLedger, NewBooking};
use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq)]
pub struct HotelQuery {
    pub city: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub max_results: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelBookingRequest {
    pub hotel: Hotel,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

#[async_trait]
pub trait HotelService: Send + Sync {
    /// Hotels in the query city, best rated first.
    async fn search(&self, query: &HotelQuery) -> Result<Vec<Hotel>, ServiceError>;

    async fn book(&self, request: &HotelBookingRequest) -> Result<Booking, ServiceError>;
}

// =============================================================================
// Fixture data
// =============================================================================

/// (city, name, street, rating, nightly rate)
static CURATED: &[(&str, &str, &str, f32, f64)] = &[
    ("Rome", "Hotel Artemide", "Via Nazionale 22", 4.7, 210.0),
    ("Rome", "Palazzo Navona", "Via dei Coronari 3", 4.5, 260.0),
    ("Rome", "Trastevere Suites", "Via della Lungaretta 71", 4.2, 145.0),
    ("Paris", "Hotel Lutetia", "45 Boulevard Raspail", 4.8, 420.0),
    ("Paris", "Le Marais Maison", "12 Rue de Turenne", 4.4, 230.0),
    ("Paris", "Montmartre Loft", "8 Rue Lepic", 4.1, 160.0),
    ("London", "The Strand Palace", "372 Strand", 4.3, 240.0),
    ("London", "Kensington Gardens House", "18 Queen's Gate", 4.6, 310.0),
    ("Tokyo", "Shinjuku Granbell", "2-14-5 Kabukicho", 4.4, 180.0),
    ("Tokyo", "Ginza Sky Tower", "6-2-1 Ginza", 4.7, 330.0),
    ("New York", "The Hudson Grand", "356 W 58th St", 4.3, 290.0),
    ("New York", "SoHo Loft Hotel", "112 Prince St", 4.5, 350.0),
    ("Barcelona", "Casa Gracia", "Passeig de Gracia 116", 4.6, 190.0),
    ("Barcelona", "Gothic Quarter Inn", "Carrer de Ferran 26", 4.0, 120.0),
];

static AMENITIES: &[&str] = &["wifi", "breakfast", "gym", "spa", "pool", "bar"];

fn hotels_in(city: &str) -> Vec<Hotel> {
    let curated: Vec<Hotel> = CURATED
        .iter()
        .enumerate()
        .filter(|(_, (c, ..))| c.eq_ignore_ascii_case(city))
        .map(|(i, (c, name, street, rating, rate))| Hotel {
            id: format!("htl-{}-{}", slug(c), i + 1),
            name: name.to_string(),
            city: c.to_string(),
            address: format!("{}, {}", street, c),
            rating: *rating,
            price_per_night: *rate,
            amenities: AMENITIES.iter().take(2 + i % 4).map(|a| a.to_string()).collect(),
            image_url: Some(format!("https://images.wayfarer.travel/hotels/{}.jpg", slug(name))),
        })
        .collect();
    if !curated.is_empty() {
        return curated;
    }

    // Any other city gets a generic trio.
    let city = title_case(city);
    [
        (format!("{} Grand Hotel", city), 4.4, 220.0),
        (format!("Hotel {} Central", city), 4.1, 150.0),
        (format!("{} Boutique Inn", city), 3.9, 110.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, rating, rate))| Hotel {
        id: format!("htl-{}-{}", slug(&city), i + 1),
        address: format!("{} Main Street, {}", 10 + i * 12, city),
        city: city.clone(),
        rating,
        price_per_night: rate,
        amenities: AMENITIES.iter().take(2 + i).map(|a| a.to_string()).collect(),
        image_url: None,
        name,
    })
    .collect()
}

pub(crate) fn slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// =============================================================================
// InMemoryHotels
// =============================================================================

pub struct InMemoryHotels {
    ledger: Arc<BookingLedger>,
    sold_out: HashSet<String>,
}

impl InMemoryHotels {
    pub fn new(ledger: Arc<BookingLedger>) -> Self {
        Self {
            ledger,
            sold_out: HashSet::new(),
        }
    }

    /// Mark hotels as sold out. Bookings for them come back `Failed`.
    pub fn with_sold_out<I, S>(mut self, hotel_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sold_out.extend(hotel_ids.into_iter().map(Into::into));
        self
    }
}

fn validate_stay(check_in: NaiveDate, check_out: NaiveDate, guests: u32) -> Result<(), ServiceError> {
    if check_out <= check_in {
        return Err(ServiceError::InvalidRequest(format!(
            "Check-out {} must be after check-in {}",
            check_out, check_in
        )));
    }
    if guests == 0 {
        return Err(ServiceError::InvalidRequest(
            "Guest count must be positive".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl HotelService for InMemoryHotels {
    async fn search(&self, query: &HotelQuery) -> Result<Vec<Hotel>, ServiceError> {
        validate_stay(query.check_in, query.check_out, query.guests)?;
        if query.city.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("City is required".to_string()));
        }

        let mut hotels = hotels_in(query.city.trim());
        hotels.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        hotels.truncate(query.max_results);
        Ok(hotels)
    }

    async fn book(&self, request: &HotelBookingRequest) -> Result<Booking, ServiceError> {
        validate_stay(request.check_in, request.check_out, request.guests)?;
        let nights = (request.check_out - request.check_in).num_days();
        let status = if self.sold_out.contains(&request.hotel.id) {
            tracing::debug!(hotel_id = %request.hotel.id, "Hotel sold out");
            BookingStatus::Failed
        } else {
            BookingStatus::Confirmed
        };

        self.ledger.record(NewBooking {
            kind: BookingKind::Hotel,
            item_id: request.hotel.id.clone(),
            title: request.hotel.name.clone(),
            start_date: request.check_in,
            end_date: Some(request.check_out),
            guests: request.guests,
            total_price: request.hotel.price_per_night * nights as f64,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    fn query(city: &str) -> HotelQuery {
        HotelQuery {
            city: city.to_string(),
            check_in: date(10),
            check_out: date(15),
            guests: 2,
            max_results: 10,
        }
    }

    // ---- search ----

    #[tokio::test]
    async fn test_search_curated_city_sorted_by_rating() {
        let svc = InMemoryHotels::new(Arc::new(BookingLedger::new()));
        let hotels = svc.search(&query("rome")).await.unwrap();
        assert_eq!(hotels.len(), 3);
        assert_eq!(hotels[0].name, "Hotel Artemide");
        assert!(hotels.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert!(hotels.iter().all(|h| h.city == "Rome"));
    }

    #[tokio::test]
    async fn test_search_generic_city() {
        let svc = InMemoryHotels::new(Arc::new(BookingLedger::new()));
        let hotels = svc.search(&query("reykjavik")).await.unwrap();
        assert_eq!(hotels[0].name, "Reykjavik Grand Hotel");
        assert_eq!(hotels[0].id, "htl-reykjavik-1");
    }

    #[tokio::test]
    async fn test_search_rejects_inverted_dates() {
        let svc = InMemoryHotels::new(Arc::new(BookingLedger::new()));
        let mut q = query("Rome");
        q.check_out = date(9);
        assert!(matches!(
            svc.search(&q).await,
            Err(ServiceError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_search_respects_max_results() {
        let svc = InMemoryHotels::new(Arc::new(BookingLedger::new()));
        let mut q = query("Paris");
        q.max_results = 1;
        assert_eq!(svc.search(&q).await.unwrap().len(), 1);
    }

    // ---- book ----

    #[tokio::test]
    async fn test_book_prices_by_nights() {
        let ledger = Arc::new(BookingLedger::new());
        let svc = InMemoryHotels::new(Arc::clone(&ledger));
        let hotel = svc.search(&query("Rome")).await.unwrap().remove(0);
        let booking = svc
            .book(&HotelBookingRequest {
                hotel: hotel.clone(),
                check_in: date(10),
                check_out: date(15),
                guests: 2,
            })
            .await
            .unwrap();
        assert!(booking.is_confirmed());
        assert!((booking.total_price - hotel.price_per_night * 5.0).abs() < f64::EPSILON);
        assert_eq!(booking.end_date, Some(date(15)));
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_book_sold_out_hotel_fails() {
        let svc = InMemoryHotels::new(Arc::new(BookingLedger::new())).with_sold_out(["htl-rome-1"]);
        let hotel = svc.search(&query("Rome")).await.unwrap().remove(0);
        let booking = svc
            .book(&HotelBookingRequest {
                hotel,
                check_in: date(10),
                check_out: date(12),
                guests: 1,
            })
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Failed);
    }

    // ---- helpers ----

    #[test]
    fn test_title_case_and_slug() {
        assert_eq!(title_case("new YORK"), "New York");
        assert_eq!(slug("Hotel Artemide"), "hotel-artemide");
    }
}
