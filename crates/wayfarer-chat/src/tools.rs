//! Tool executor: one adapter per [`ToolKind`] over the travel services.
//!
//! Every adapter is total. Bad parameters and collaborator failures become
//! `success = false` results with a message; nothing here returns an error
//! to the orchestrator.

use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, warn};
use wayfarer_core::config::SearchConfig;
use wayfarer_core::types::Booking;
use wayfarer_services::{
    BookingChange, CarBookingRequest, CarQuery, DestinationQuery, FlightBookingRequest,
    FlightQuery, HotelBookingRequest, HotelQuery, RestaurantQuery, RestaurantReservation,
    ServiceError, TravelServices,
};

use crate::parser::resolve_date;
use crate::types::{SelectedItem, ToolData, ToolKind, ToolParams, ToolResult};

const DEFAULT_DINNER_TIME: &str = "19:30";

/// Why an adapter could not produce a normal result.
#[derive(Debug, thiserror::Error)]
enum ToolError {
    #[error("{0}")]
    InvalidParams(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

fn invalid(message: impl Into<String>) -> ToolError {
    ToolError::InvalidParams(message.into())
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {}", one)
    } else {
        format!("{} {}", count, many)
    }
}

// =============================================================================
// ToolExecutor
// =============================================================================

pub struct ToolExecutor {
    services: TravelServices,
    search: SearchConfig,
    /// Fixed "today" for date resolution; the local date when unset.
    today: Option<NaiveDate>,
}

impl ToolExecutor {
    pub fn new(services: TravelServices, search: SearchConfig) -> Self {
        Self {
            services,
            search,
            today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Run one tool and wrap the outcome.
    pub async fn execute(&self, tool: ToolKind, params: &ToolParams) -> ToolResult {
        let outcome = match tool {
            ToolKind::SearchFlights => self.search_flights(params).await,
            ToolKind::BookFlight => self.book_flight(params).await,
            ToolKind::GetFlightStatus => self.flight_status(params).await,
            ToolKind::SearchHotels => self.search_hotels(params).await,
            ToolKind::BookHotel => self.book_hotel(params).await,
            ToolKind::SearchRestaurants => self.search_restaurants(params).await,
            ToolKind::BookRestaurant => self.book_restaurant(params).await,
            ToolKind::SearchCars => self.search_cars(params).await,
            ToolKind::BookCar => self.book_car(params).await,
            ToolKind::SearchDestinations => self.search_destinations(params).await,
            ToolKind::GetTripSuggestions => self.trip_suggestions(params).await,
            ToolKind::ListBookings => self.list_bookings().await,
            ToolKind::CancelBooking => self.cancel_booking(params).await,
            ToolKind::ModifyBooking => self.modify_booking(params).await,
            ToolKind::GetPointsBalance => self.points_balance().await,
            ToolKind::CalculatePointsValue => self.points_value(params).await,
            ToolKind::ApplyPointsBoost => self.points_boost(params).await,
        };

        let result = match outcome {
            Ok(result) => result,
            Err(ToolError::InvalidParams(message)) => ToolResult::failed(tool, message),
            Err(ToolError::Service(err)) => {
                warn!(tool = %tool, error = %err, "Travel service call failed");
                ToolResult::failed(tool, err.to_string())
            }
        };
        debug!(tool = %tool, success = result.success, "Tool executed");
        result
    }

    // -----------------------------------------------------------------
    // Parameter helpers
    // -----------------------------------------------------------------

    fn start_date(&self, params: &ToolParams) -> Result<NaiveDate, ToolError> {
        match params.get("date") {
            Some(expr) => resolve_date(expr, self.today())
                .ok_or_else(|| invalid(format!("I couldn't understand the date \"{}\".", expr))),
            None => Ok(self.today()),
        }
    }

    /// Start date through start + the default stay length.
    fn window(&self, params: &ToolParams) -> Result<(NaiveDate, NaiveDate), ToolError> {
        let start = self.start_date(params)?;
        let nights = i64::from(self.search.default_stay_nights.max(1));
        let end = start
            .checked_add_signed(Duration::days(nights))
            .ok_or_else(|| invalid(format!("A {}-night stay is too long to search.", nights)))?;
        Ok((start, end))
    }

    fn guests(&self, params: &ToolParams) -> Result<u32, ToolError> {
        match params.get("guests") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid(format!("\"{}\" is not a valid number of guests.", raw))),
            None => Ok(self.search.default_guests),
        }
    }

    fn max_results(&self, params: &ToolParams) -> usize {
        params
            .get("max_results")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(self.search.max_results)
    }

    fn location<'a>(&self, params: &'a ToolParams, what: &str) -> Result<&'a str, ToolError> {
        params
            .get("location")
            .ok_or_else(|| invalid(format!("Which city should I search {} in?", what)))
    }

    fn points_arg(params: &ToolParams) -> Result<Option<u64>, ToolError> {
        params
            .get("points")
            .map(|raw| {
                raw.replace(',', "")
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("\"{}\" is not a points amount.", raw)))
            })
            .transpose()
    }

    fn booking_id(params: &ToolParams) -> Result<String, ToolError> {
        match (&params.selection, params.get("booking_ref")) {
            (Some(SelectedItem::Booking(booking)), _) => Ok(booking.id.clone()),
            (_, Some(reference)) => Ok(reference.to_uppercase()),
            _ => Err(invalid("Which booking do you mean? Give me its reference, like BK-1001.")),
        }
    }

    // -----------------------------------------------------------------
    // Flights
    // -----------------------------------------------------------------

    async fn search_flights(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let query = FlightQuery {
            origin: params.get("origin_airport").map(str::to_string),
            destination: params.get("destination_airport").map(str::to_string),
            destination_city: params.get("location").map(str::to_string),
            date: self.start_date(params)?,
            cabin_class: params.get("cabin_class").map(str::to_string),
            passengers: self.guests(params)?,
            max_results: self.max_results(params),
        };
        let flights = self.services.flights.search(&query).await?;
        let message = if flights.is_empty() {
            "No flights matched that search.".to_string()
        } else {
            format!("Found {}.", plural(flights.len(), "flight", "flights"))
        };
        Ok(ToolResult::new(
            ToolKind::SearchFlights,
            !flights.is_empty(),
            ToolData::Flights(flights),
            message,
        ))
    }

    async fn book_flight(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let Some(SelectedItem::Flight(flight)) = &params.selection else {
            return Err(invalid("There's no flight selected to book."));
        };
        let request = FlightBookingRequest {
            flight: flight.clone(),
            passengers: self.guests(params)?,
        };
        let booking = self.services.flights.book(&request).await?;
        Ok(booking_result(ToolKind::BookFlight, booking))
    }

    async fn flight_status(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let flight_id = params
            .get("flight_id")
            .ok_or_else(|| invalid("Which flight number should I check?"))?;
        let status = self.services.flights.status(flight_id).await?;
        let message = format!("{} is {}.", status.flight_id, status.state);
        Ok(ToolResult::new(
            ToolKind::GetFlightStatus,
            true,
            ToolData::FlightStatus(status),
            message,
        ))
    }

    // -----------------------------------------------------------------
    // Hotels, restaurants, cars
    // -----------------------------------------------------------------

    async fn search_hotels(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let city = self.location(params, "hotels")?;
        let (check_in, check_out) = self.window(params)?;
        let query = HotelQuery {
            city: city.to_string(),
            check_in,
            check_out,
            guests: self.guests(params)?,
            max_results: self.max_results(params),
        };
        let hotels = self.services.hotels.search(&query).await?;
        let message = if hotels.is_empty() {
            format!("No hotels available in {}.", city)
        } else {
            format!("Found {} in {}.", plural(hotels.len(), "hotel", "hotels"), city)
        };
        Ok(ToolResult::new(
            ToolKind::SearchHotels,
            !hotels.is_empty(),
            ToolData::Hotels(hotels),
            message,
        ))
    }

    async fn book_hotel(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let Some(SelectedItem::Hotel(hotel)) = &params.selection else {
            return Err(invalid("There's no hotel selected to book."));
        };
        let (check_in, check_out) = self.window(params)?;
        let request = HotelBookingRequest {
            hotel: hotel.clone(),
            check_in,
            check_out,
            guests: self.guests(params)?,
        };
        let booking = self.services.hotels.book(&request).await?;
        Ok(booking_result(ToolKind::BookHotel, booking))
    }

    async fn search_restaurants(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let city = self.location(params, "restaurants")?;
        let query = RestaurantQuery {
            city: city.to_string(),
            cuisine: params.get("cuisine").map(str::to_string),
            date: self.start_date(params)?,
            party_size: self.guests(params)?,
        };
        let restaurants = self.services.restaurants.search(&query).await?;
        let message = if restaurants.is_empty() {
            format!("No restaurants matched in {}.", city)
        } else {
            format!(
                "Found {} in {}.",
                plural(restaurants.len(), "restaurant", "restaurants"),
                city
            )
        };
        Ok(ToolResult::new(
            ToolKind::SearchRestaurants,
            !restaurants.is_empty(),
            ToolData::Restaurants(restaurants),
            message,
        ))
    }

    async fn book_restaurant(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let Some(SelectedItem::Restaurant(restaurant)) = &params.selection else {
            return Err(invalid("There's no restaurant selected to reserve."));
        };
        let reservation = RestaurantReservation {
            restaurant: restaurant.clone(),
            date: self.start_date(params)?,
            time: params.get("time").unwrap_or(DEFAULT_DINNER_TIME).to_string(),
            party_size: self.guests(params)?,
        };
        let booking = self.services.restaurants.reserve(&reservation).await?;
        Ok(booking_result(ToolKind::BookRestaurant, booking))
    }

    async fn search_cars(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let city = self.location(params, "rental cars")?;
        let (pickup, dropoff) = self.window(params)?;
        let query = CarQuery {
            city: city.to_string(),
            pickup,
            dropoff,
        };
        let cars = self.services.cars.search(&query).await?;
        let message = if cars.is_empty() {
            format!("No rental cars available in {}.", city)
        } else {
            format!("Found {} in {}.", plural(cars.len(), "car", "cars"), city)
        };
        Ok(ToolResult::new(
            ToolKind::SearchCars,
            !cars.is_empty(),
            ToolData::Cars(cars),
            message,
        ))
    }

    async fn book_car(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let Some(SelectedItem::CarRental(car)) = &params.selection else {
            return Err(invalid("There's no car selected to book."));
        };
        let (pickup, dropoff) = self.window(params)?;
        let request = CarBookingRequest {
            car: car.clone(),
            pickup,
            dropoff,
        };
        let booking = self.services.cars.book(&request).await?;
        Ok(booking_result(ToolKind::BookCar, booking))
    }

    // -----------------------------------------------------------------
    // Destinations
    // -----------------------------------------------------------------

    async fn search_destinations(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let query = DestinationQuery {
            name: params.get("location").map(str::to_string),
            max_results: self.max_results(params),
        };
        let destinations = self.services.destinations.search(&query).await?;
        let message = if destinations.is_empty() {
            "No destinations matched.".to_string()
        } else {
            format!(
                "Found {}.",
                plural(destinations.len(), "destination", "destinations")
            )
        };
        Ok(ToolResult::new(
            ToolKind::SearchDestinations,
            !destinations.is_empty(),
            ToolData::Destinations(destinations),
            message,
        ))
    }

    async fn trip_suggestions(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let themes = self
            .services
            .destinations
            .suggestions(params.get("location"))
            .await?;
        let message = format!("Found {}.", plural(themes.len(), "trip idea", "trip ideas"));
        Ok(ToolResult::new(
            ToolKind::GetTripSuggestions,
            !themes.is_empty(),
            ToolData::TripThemes(themes),
            message,
        ))
    }

    // -----------------------------------------------------------------
    // Bookings
    // -----------------------------------------------------------------

    async fn list_bookings(&self) -> Result<ToolResult, ToolError> {
        let bookings = self.services.bookings.list().await?;
        let message = if bookings.is_empty() {
            "You don't have any bookings yet.".to_string()
        } else {
            format!("You have {}.", plural(bookings.len(), "booking", "bookings"))
        };
        Ok(ToolResult::new(
            ToolKind::ListBookings,
            !bookings.is_empty(),
            ToolData::Bookings(bookings),
            message,
        ))
    }

    async fn cancel_booking(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let booking_id = Self::booking_id(params)?;
        let cancelled = self.services.bookings.cancel(&booking_id).await?;
        let message = if cancelled {
            format!("Booking {} is cancelled.", booking_id)
        } else {
            format!("Booking {} was already cancelled.", booking_id)
        };
        Ok(ToolResult::new(
            ToolKind::CancelBooking,
            cancelled,
            ToolData::Cancellation {
                booking_id,
                cancelled,
            },
            message,
        ))
    }

    async fn modify_booking(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let booking_id = Self::booking_id(params)?;
        let start_date = match params.get("date") {
            Some(_) => Some(self.start_date(params)?),
            None => None,
        };
        let guests = match params.get("guests") {
            Some(_) => Some(self.guests(params)?),
            None => None,
        };
        if start_date.is_none() && guests.is_none() {
            return Err(invalid(
                "What should I change? Tell me a new date or number of guests.",
            ));
        }
        let change = BookingChange {
            booking_id,
            start_date,
            guests,
        };
        let booking = self.services.bookings.modify(&change).await?;
        Ok(booking_result(ToolKind::ModifyBooking, booking))
    }

    // -----------------------------------------------------------------
    // Points
    // -----------------------------------------------------------------

    async fn points_balance(&self) -> Result<ToolResult, ToolError> {
        let balance = self.services.points.balance().await?;
        let message = format!("You have {} points.", balance.points);
        Ok(ToolResult::new(
            ToolKind::GetPointsBalance,
            true,
            ToolData::PointsBalance(balance),
            message,
        ))
    }

    /// Points named in the turn, or the whole balance.
    async fn points_or_balance(&self, params: &ToolParams) -> Result<u64, ToolError> {
        match Self::points_arg(params)? {
            Some(points) => Ok(points),
            None => Ok(self.services.points.balance().await?.points),
        }
    }

    async fn points_value(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let points = self.points_or_balance(params).await?;
        let valuation = self.services.points.calculate_value(points).await?;
        let message = format!("{} points are worth ${:.2}.", points, valuation.value);
        Ok(ToolResult::new(
            ToolKind::CalculatePointsValue,
            true,
            ToolData::PointsValuation(valuation),
            message,
        ))
    }

    async fn points_boost(&self, params: &ToolParams) -> Result<ToolResult, ToolError> {
        let points = self.points_or_balance(params).await?;
        let boost = self.services.points.apply_boost(points).await?;
        let message = boost.description.clone();
        Ok(ToolResult::new(
            ToolKind::ApplyPointsBoost,
            true,
            ToolData::PointsBoost(boost),
            message,
        ))
    }
}

/// Booking tools succeed only on a confirmed booking.
fn booking_result(tool: ToolKind, booking: Booking) -> ToolResult {
    let confirmed = booking.is_confirmed();
    let message = if confirmed {
        format!("{} is confirmed ({}).", booking.title, booking.id)
    } else {
        format!("{} could not be confirmed ({}).", booking.title, booking.status)
    };
    ToolResult::new(tool, confirmed, ToolData::Booking(booking), message)
}

// =============================================================================
// Tests
// =============================================================================
