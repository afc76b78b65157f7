//! Flight search, booking and status lookup.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use wayfarer_core::types::{Booking, BookingKind, BookingStatus, Flight, FlightState, FlightStatus};

use crate::bookings::{BookingLedger, NewBooking};
use crate::error::ServiceError;

/// Filter parameters for a flight search.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightQuery {
    /// Departure airport code. Defaults to the home airport when absent.
    pub origin: Option<String>,
    /// Arrival airport code.
    pub destination: Option<String>,
    /// Arrival city, used when no airport code was given.
    pub destination_city: Option<String>,
    pub date: NaiveDate,
    pub cabin_class: Option<String>,
    pub passengers: u32,
    pub max_results: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightBookingRequest {
    pub flight: Flight,
    pub passengers: u32,
}

#[async_trait]
pub trait FlightService: Send + Sync {
    /// Flights matching the query, cheapest first.
    async fn search(&self, query: &FlightQuery) -> Result<Vec<Flight>, ServiceError>;

    async fn book(&self, request: &FlightBookingRequest) -> Result<Booking, ServiceError>;

    /// Operational status of a flight number such as `SK117`.
    async fn status(&self, flight_id: &str) -> Result<FlightStatus, ServiceError>;
}

// =============================================================================
// Fixture data
// =============================================================================

const HOME_AIRPORT: &str = "JFK";

/// City to airport code.
static AIRPORTS: &[(&str, &str)] = &[
    ("New York", "JFK"),
    ("Los Angeles", "LAX"),
    ("San Francisco", "SFO"),
    ("Miami", "MIA"),
    ("Chicago", "ORD"),
    ("London", "LHR"),
    ("Paris", "CDG"),
    ("Rome", "FCO"),
    ("Barcelona", "BCN"),
    ("Madrid", "MAD"),
    ("Lisbon", "LIS"),
    ("Amsterdam", "AMS"),
    ("Berlin", "BER"),
    ("Athens", "ATH"),
    ("Istanbul", "IST"),
    ("Dubai", "DXB"),
    ("Tokyo", "HND"),
    ("Singapore", "SIN"),
    ("Bangkok", "BKK"),
    ("Sydney", "SYD"),
];

/// (airline, carrier code, departure, arrival, stops, base fare)
static SCHEDULES: &[(&str, &str, &str, &str, u8, f64)] = &[
    ("Skyline Air", "SK", "07:15", "15:40", 0, 420.0),
    ("Atlas Airways", "AT", "11:30", "21:05", 1, 365.0),
    ("Meridian", "MR", "18:45", "08:10", 0, 510.0),
];

static KNOWN_CARRIERS: &[&str] = &["SK", "AT", "MR", "UA", "DL", "AA", "BA", "AF", "LH"];

fn cabin_multiplier(cabin: &str) -> f64 {
    match cabin.to_lowercase().as_str() {
        "premium economy" | "premium" => 1.6,
        "business" => 3.2,
        "first" | "first class" => 5.0,
        _ => 1.0,
    }
}

fn airport_for_city(city: &str) -> Option<&'static str> {
    AIRPORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(city))
        .map(|(_, code)| *code)
}

fn city_for_airport(code: &str) -> Option<&'static str> {
    AIRPORTS
        .iter()
        .find(|(_, c)| c.eq_ignore_ascii_case(code))
        .map(|(name, _)| *name)
}

// =============================================================================
// InMemoryFlights
// =============================================================================

/// Fixture-backed flight service. Every route in the airport table is
/// served by the same three daily departures.
pub struct InMemoryFlights {
    ledger: Arc<BookingLedger>,
}

impl InMemoryFlights {
    pub fn new(ledger: Arc<BookingLedger>) -> Self {
        Self { ledger }
    }

    fn flights_to(&self, origin: &str, dest_code: &str, query: &FlightQuery) -> Vec<Flight> {
        let city = city_for_airport(dest_code).unwrap_or(dest_code);
        let cabin = query
            .cabin_class
            .clone()
            .unwrap_or_else(|| "economy".to_string());
        let route_seed: u32 = dest_code.bytes().map(u32::from).sum::<u32>() % 90;

        SCHEDULES
            .iter()
            .enumerate()
            .map(|(i, (airline, carrier, dep, arr, stops, fare))| {
                let number = format!("{}{}", carrier, 100 + route_seed + i as u32 * 7);
                Flight {
                    id: format!("fl-{}-{}", number.to_lowercase(), query.date),
                    airline: airline.to_string(),
                    flight_number: number,
                    origin: origin.to_string(),
                    destination: dest_code.to_string(),
                    destination_city: city.to_string(),
                    departure_date: query.date,
                    departure_time: dep.to_string(),
                    arrival_time: arr.to_string(),
                    cabin_class: cabin.clone(),
                    price: (fare * cabin_multiplier(&cabin)).round(),
                    stops: *stops,
                }
            })
            .collect()
    }
}

#[async_trait]
impl FlightService for InMemoryFlights {
    async fn search(&self, query: &FlightQuery) -> Result<Vec<Flight>, ServiceError> {
        if query.passengers == 0 {
            return Err(ServiceError::InvalidRequest(
                "At least one passenger is required".to_string(),
            ));
        }
        let origin = query
            .origin
            .clone()
            .unwrap_or_else(|| HOME_AIRPORT.to_string())
            .to_uppercase();

        let destinations: Vec<String> = match (&query.destination, &query.destination_city) {
            (Some(code), _) => vec![code.to_uppercase()],
            (None, Some(city)) => match airport_for_city(city) {
                Some(code) => vec![code.to_string()],
                None => return Ok(Vec::new()),
            },
            // No destination: show departures to a few popular airports.
            (None, None) => AIRPORTS
                .iter()
                .map(|(_, code)| code.to_string())
                .filter(|code| *code != origin)
                .take(3)
                .collect(),
        };

        let mut flights: Vec<Flight> = destinations
            .iter()
            .filter(|code| **code != origin)
            .flat_map(|code| self.flights_to(&origin, code, query))
            .collect();
        flights.sort_by(|a, b| a.price.total_cmp(&b.price));
        flights.truncate(query.max_results);
        Ok(flights)
    }

    async fn book(&self, request: &FlightBookingRequest) -> Result<Booking, ServiceError> {
        if request.passengers == 0 {
            return Err(ServiceError::InvalidRequest(
                "At least one passenger is required".to_string(),
            ));
        }
        let flight = &request.flight;
        self.ledger.record(NewBooking {
            kind: BookingKind::Flight,
            item_id: flight.id.clone(),
            title: format!(
                "{} {} to {}",
                flight.airline, flight.flight_number, flight.destination_city
            ),
            start_date: flight.departure_date,
            end_date: None,
            guests: request.passengers,
            total_price: flight.price * f64::from(request.passengers),
            status: BookingStatus::Confirmed,
        })
    }

    async fn status(&self, flight_id: &str) -> Result<FlightStatus, ServiceError> {
        let id = flight_id.trim().to_uppercase();
        let (carrier, digits) = match (id.get(..2), id.get(2..)) {
            (Some(carrier), Some(digits)) => (carrier, digits),
            _ => {
                return Err(ServiceError::InvalidRequest(format!(
                    "Not a flight number: {}",
                    flight_id
                )))
            }
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ServiceError::InvalidRequest(format!(
                "Not a flight number: {}",
                flight_id
            )));
        }
        if !KNOWN_CARRIERS.contains(&carrier) {
            return Err(ServiceError::NotFound(id));
        }

        let seed: u32 = digits.chars().filter_map(|c| c.to_digit(10)).sum();
        let state = match seed % 5 {
            1 => FlightState::Delayed,
            2 => FlightState::Boarding,
            4 => FlightState::Departed,
            _ => FlightState::OnTime,
        };
        let hour = 6 + seed % 14;
        let scheduled = format!("{:02}:{:02}", hour, (seed * 5) % 60);
        let estimated = if state == FlightState::Delayed {
            format!("{:02}:{:02}", hour + 1, (seed * 5) % 60)
        } else {
            scheduled.clone()
        };
        let gate = match state {
            FlightState::Departed => None,
            _ => Some(format!("{}{}", ['A', 'B', 'C', 'D'][(seed % 4) as usize], 1 + seed % 30)),
        };

        Ok(FlightStatus {
            flight_id: id,
            state,
            gate,
            scheduled_departure: scheduled,
            estimated_departure: estimated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> InMemoryFlights {
        InMemoryFlights::new(Arc::new(BookingLedger::new()))
    }

    fn query() -> FlightQuery {
        FlightQuery {
            origin: None,
            destination: None,
            destination_city: Some("Rome".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
            cabin_class: None,
            passengers: 1,
            max_results: 10,
        }
    }

    // ---- search ----

    #[tokio::test]
    async fn test_search_by_city_sorted_by_price() {
        let flights = service().search(&query()).await.unwrap();
        assert_eq!(flights.len(), 3);
        assert!(flights.iter().all(|f| f.destination == "FCO"));
        assert!(flights.iter().all(|f| f.origin == "JFK"));
        assert!(flights.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[tokio::test]
    async fn test_search_unknown_city_is_empty() {
        let mut q = query();
        q.destination_city = Some("Atlantis".to_string());
        assert!(service().search(&q).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_business_costs_more() {
        let economy = service().search(&query()).await.unwrap();
        let mut q = query();
        q.cabin_class = Some("business".to_string());
        let business = service().search(&q).await.unwrap();
        assert!(business[0].price > economy[0].price);
        assert_eq!(business[0].cabin_class, "business");
    }

    #[tokio::test]
    async fn test_search_airport_pair() {
        let mut q = query();
        q.origin = Some("LHR".to_string());
        q.destination = Some("CDG".to_string());
        let flights = service().search(&q).await.unwrap();
        assert!(flights.iter().all(|f| f.origin == "LHR" && f.destination_city == "Paris"));
    }

    #[tokio::test]
    async fn test_search_without_destination_lists_popular_routes() {
        let mut q = query();
        q.destination_city = None;
        q.max_results = 4;
        let flights = service().search(&q).await.unwrap();
        assert_eq!(flights.len(), 4);
    }

    // ---- book ----

    #[tokio::test]
    async fn test_book_records_confirmed_booking() {
        let ledger = Arc::new(BookingLedger::new());
        let svc = InMemoryFlights::new(Arc::clone(&ledger));
        let flight = svc.search(&query()).await.unwrap().remove(0);
        let booking = svc
            .book(&FlightBookingRequest {
                flight: flight.clone(),
                passengers: 2,
            })
            .await
            .unwrap();
        assert!(booking.is_confirmed());
        assert_eq!(booking.item_id, flight.id);
        assert!((booking.total_price - flight.price * 2.0).abs() < f64::EPSILON);
        assert_eq!(ledger.len(), 1);
    }

    // ---- status ----

    #[tokio::test]
    async fn test_status_is_deterministic() {
        let a = service().status("SK117").await.unwrap();
        let b = service().status("sk117").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.flight_id, "SK117");
    }

    #[tokio::test]
    async fn test_status_unknown_carrier() {
        assert!(matches!(
            service().status("ZZ100").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_status_malformed_number() {
        assert!(matches!(
            service().status("hello").await,
            Err(ServiceError::InvalidRequest(_))
        ));
    }
}
