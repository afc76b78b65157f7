//! Car rental search and booking.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use wayfarer_core::types::{Booking, BookingKind, BookingStatus, CarRental};

use crate::bookings::{BookingLedger, NewBooking};
use crate::error::ServiceError;
use crate::hotels::{slug, title_case};

#[derive(Debug, Clone, PartialEq)]
pub struct CarQuery {
    pub city: String,
    pub pickup: NaiveDate,
    pub dropoff: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarBookingRequest {
    pub car: CarRental,
    pub pickup: NaiveDate,
    pub dropoff: NaiveDate,
}

#[async_trait]
pub trait CarService: Send + Sync {
    /// Available cars, cheapest first.
    async fn search(&self, query: &CarQuery) -> Result<Vec<CarRental>, ServiceError>;

    async fn book(&self, request: &CarBookingRequest) -> Result<Booking, ServiceError>;
}

/// (company, model, category, daily rate, seats)
static FLEET: &[(&str, &str, &str, f64, u8)] = &[
    ("Voyager Rentals", "Toyota Corolla", "compact", 48.0, 5),
    ("Metro Drive", "Fiat 500", "economy", 35.0, 4),
    ("Coastline Cars", "Volkswagen Tiguan", "suv", 72.0, 5),
    ("Voyager Rentals", "BMW 5 Series", "luxury", 129.0, 5),
    ("Metro Drive", "Ford Transit", "van", 95.0, 9),
];

pub struct InMemoryCars {
    ledger: Arc<BookingLedger>,
}

impl InMemoryCars {
    pub fn new(ledger: Arc<BookingLedger>) -> Self {
        Self { ledger }
    }
}

fn rental_days(pickup: NaiveDate, dropoff: NaiveDate) -> Result<i64, ServiceError> {
    if dropoff < pickup {
        return Err(ServiceError::InvalidRequest(format!(
            "Drop-off {} is before pick-up {}",
            dropoff, pickup
        )));
    }
    Ok((dropoff - pickup).num_days().max(1))
}

#[async_trait]
impl CarService for InMemoryCars {
    async fn search(&self, query: &CarQuery) -> Result<Vec<CarRental>, ServiceError> {
        rental_days(query.pickup, query.dropoff)?;
        if query.city.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("City is required".to_string()));
        }
        let city = title_case(query.city.trim());

        let mut cars: Vec<CarRental> = FLEET
            .iter()
            .map(|(company, model, category, rate, seats)| CarRental {
                id: format!("car-{}-{}", slug(&city), slug(model)),
                company: company.to_string(),
                model: model.to_string(),
                category: category.to_string(),
                city: city.clone(),
                price_per_day: *rate,
                seats: *seats,
            })
            .collect();
        cars.sort_by(|a, b| a.price_per_day.total_cmp(&b.price_per_day));
        Ok(cars)
    }

    async fn book(&self, request: &CarBookingRequest) -> Result<Booking, ServiceError> {
        let days = rental_days(request.pickup, request.dropoff)?;
        let car = &request.car;
        self.ledger.record(NewBooking {
            kind: BookingKind::Car,
            item_id: car.id.clone(),
            title: format!("{} {} in {}", car.company, car.model, car.city),
            start_date: request.pickup,
            end_date: Some(request.dropoff),
            guests: u32::from(car.seats),
            total_price: car.price_per_day * days as f64,
            status: BookingStatus::Confirmed,
        })
    }
}
