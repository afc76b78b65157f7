//! Travel domain services consumed by the Wayfarer dialogue engine.
//!
//! Each domain (flights, hotels, restaurants, cars, destinations, bookings,
//! points) is an async trait so hosts can plug in real backends. The
//! `InMemory*` implementations serve fixed fixture records and record every
//! booking in a shared [`BookingLedger`].

pub mod bookings;
pub mod cars;
pub mod destinations;
pub mod error;
pub mod flights;
pub mod hotels;
pub mod points;
pub mod restaurants;

use std::sync::Arc;

pub use bookings::{BookingChange, BookingLedger, BookingService};
pub use cars::{CarBookingRequest, CarQuery, CarService, InMemoryCars};
pub use destinations::{DestinationQuery, DestinationService, InMemoryDestinations};
pub use error::ServiceError;
pub use flights::{FlightBookingRequest, FlightQuery, FlightService, InMemoryFlights};
pub use hotels::{HotelBookingRequest, HotelQuery, HotelService, InMemoryHotels};
pub use points::{InMemoryPoints, PointsService};
pub use restaurants::{InMemoryRestaurants, RestaurantQuery, RestaurantReservation, RestaurantService};

/// Bundle of every collaborator the engine talks to.
#[derive(Clone)]
pub struct TravelServices {
    pub flights: Arc<dyn FlightService>,
    pub hotels: Arc<dyn HotelService>,
    pub restaurants: Arc<dyn RestaurantService>,
    pub cars: Arc<dyn CarService>,
    pub destinations: Arc<dyn DestinationService>,
    pub bookings: Arc<dyn BookingService>,
    pub points: Arc<dyn PointsService>,
}

impl TravelServices {
    /// Fixture-backed services sharing one booking ledger.
    pub fn in_memory() -> Self {
        Self::in_memory_with_ledger(Arc::new(BookingLedger::new()))
    }

    /// Fixture-backed services recording bookings into `ledger`.
    pub fn in_memory_with_ledger(ledger: Arc<BookingLedger>) -> Self {
        Self {
            flights: Arc::new(InMemoryFlights::new(Arc::clone(&ledger))),
            hotels: Arc::new(InMemoryHotels::new(Arc::clone(&ledger))),
            restaurants: Arc::new(InMemoryRestaurants::new(Arc::clone(&ledger))),
            cars: Arc::new(InMemoryCars::new(Arc::clone(&ledger))),
            destinations: Arc::new(InMemoryDestinations::new()),
            bookings: ledger,
            points: Arc::new(InMemoryPoints::new()),
        }
    }
}
