//! Domain records shared by the services and the dialogue engine.
//!
//! These are the shapes the travel collaborators return: flights, hotels,
//! restaurants, car rentals, destinations, trip themes, bookings and
//! loyalty points.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Newtype Wrappers - Temporal
// =============================================================================

/// Unix timestamp in seconds since epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }

    /// Seconds elapsed since this timestamp (negative if in the future).
    pub fn age_secs(&self) -> i64 {
        Timestamp::now().0 - self.0
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Result bucket a search belongs to. Also tracks the last active domain
/// of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDomain {
    Hotel,
    Flight,
    Restaurant,
    Car,
    Destination,
    Booking,
}

impl fmt::Display for SearchDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDomain::Hotel => write!(f, "hotel"),
            SearchDomain::Flight => write!(f, "flight"),
            SearchDomain::Restaurant => write!(f, "restaurant"),
            SearchDomain::Car => write!(f, "car"),
            SearchDomain::Destination => write!(f, "destination"),
            SearchDomain::Booking => write!(f, "booking"),
        }
    }
}

impl std::str::FromStr for SearchDomain {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotel" => Ok(SearchDomain::Hotel),
            "flight" => Ok(SearchDomain::Flight),
            "restaurant" => Ok(SearchDomain::Restaurant),
            "car" => Ok(SearchDomain::Car),
            "destination" => Ok(SearchDomain::Destination),
            "booking" => Ok(SearchDomain::Booking),
            _ => Err(format!("Unknown search domain: {}", s)),
        }
    }
}

/// What a booking reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    Flight,
    Hotel,
    Restaurant,
    Car,
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingKind::Flight => write!(f, "flight"),
            BookingKind::Hotel => write!(f, "hotel"),
            BookingKind::Restaurant => write!(f, "restaurant"),
            BookingKind::Car => write!(f, "car"),
        }
    }
}

/// Booking lifecycle. `Confirmed` is the only success signal the engine
/// relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
    Failed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Operational state of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightState {
    OnTime,
    Delayed,
    Boarding,
    Departed,
    Cancelled,
}

impl fmt::Display for FlightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightState::OnTime => write!(f, "on time"),
            FlightState::Delayed => write!(f, "delayed"),
            FlightState::Boarding => write!(f, "boarding"),
            FlightState::Departed => write!(f, "departed"),
            FlightState::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Domain Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    /// IATA code of the departure airport.
    pub origin: String,
    /// IATA code of the arrival airport.
    pub destination: String,
    pub destination_city: String,
    pub departure_date: NaiveDate,
    pub departure_time: String,
    pub arrival_time: String,
    pub cabin_class: String,
    pub price: f64,
    pub stops: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: String,
    pub rating: f32,
    pub price_per_night: f64,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub city: String,
    pub cuisine: String,
    pub rating: f32,
    /// 1 (budget) to 4 (fine dining).
    pub price_level: u8,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRental {
    pub id: String,
    pub company: String,
    pub model: String,
    pub category: String,
    pub city: String,
    pub price_per_day: f64,
    pub seats: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub image_url: Option<String>,
}

/// A themed itinerary idea spanning one or more destinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripTheme {
    pub id: String,
    pub title: String,
    pub description: String,
    pub destinations: Vec<String>,
    pub duration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Human-facing reference, e.g. `BK-1001`.
    pub id: String,
    pub kind: BookingKind,
    /// Identifier of the reserved flight, hotel, restaurant or car.
    pub item_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsBalance {
    pub points: u64,
    pub tier: String,
    pub lounge_passes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsValuation {
    pub points: u64,
    pub cents_per_point: f64,
    /// Cash value in dollars.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsBoost {
    pub base_points: u64,
    pub boosted_points: u64,
    pub multiplier: f64,
    pub partner: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightStatus {
    pub flight_id: String,
    pub state: FlightState,
    pub gate: Option<String>,
    pub scheduled_departure: String,
    pub estimated_departure: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Timestamp ----

    #[test]
    fn test_timestamp_now_is_recent() {
        let ts = Timestamp::now();
        assert!(ts.age_secs().abs() < 2);
    }

    #[test]
    fn test_timestamp_datetime_round_trip() {
        let now = Utc::now();
        let ts = Timestamp::from_datetime(now);
        assert_eq!(ts.to_datetime().timestamp(), now.timestamp());
    }

    // ---- SearchDomain ----

    #[test]
    fn test_search_domain_display_and_parse() {
        for domain in [
            SearchDomain::Hotel,
            SearchDomain::Flight,
            SearchDomain::Restaurant,
            SearchDomain::Car,
            SearchDomain::Destination,
            SearchDomain::Booking,
        ] {
            let parsed: SearchDomain = domain.to_string().parse().unwrap();
            assert_eq!(parsed, domain);
        }
        assert!("spaceship".parse::<SearchDomain>().is_err());
    }

    // ---- Booking ----

    fn make_booking(status: BookingStatus) -> Booking {
        Booking {
            id: "BK-1001".to_string(),
            kind: BookingKind::Hotel,
            item_id: "htl-rome-1".to_string(),
            title: "Hotel Artemide".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 4),
            guests: 2,
            total_price: 540.0,
            status,
            created_at: Timestamp(1_700_000_000),
        }
    }

    #[test]
    fn test_booking_is_confirmed_only_for_confirmed_status() {
        assert!(make_booking(BookingStatus::Confirmed).is_confirmed());
        assert!(!make_booking(BookingStatus::Pending).is_confirmed());
        assert!(!make_booking(BookingStatus::Cancelled).is_confirmed());
        assert!(!make_booking(BookingStatus::Failed).is_confirmed());
    }

    #[test]
    fn test_booking_status_serializes_snake_case() {
        let json = serde_json::to_string(&make_booking(BookingStatus::Confirmed)).unwrap();
        assert!(json.contains("\"status\":\"confirmed\""));
        assert!(json.contains("\"kind\":\"hotel\""));
    }

    #[test]
    fn test_flight_state_display() {
        assert_eq!(FlightState::OnTime.to_string(), "on time");
        assert_eq!(FlightState::Delayed.to_string(), "delayed");
        assert_eq!(FlightState::Cancelled.to_string(), "cancelled");
    }
}
