//! Booking ledger and the booking-management service.
//!
//! Every domain service that books something records the result here, so
//! listing, cancelling and modifying work across flights, hotels,
//! restaurants and cars.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use wayfarer_core::types::{Booking, BookingKind, BookingStatus, Timestamp};

use crate::error::ServiceError;

/// Requested changes to an existing booking. `None` fields stay as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingChange {
    pub booking_id: String,
    pub start_date: Option<NaiveDate>,
    pub guests: Option<u32>,
}

/// A booking about to be written to the ledger.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub kind: BookingKind,
    pub item_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
}

/// Listing, cancellation and modification of existing bookings.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// All bookings, earliest start date first.
    async fn list(&self) -> Result<Vec<Booking>, ServiceError>;

    async fn get(&self, booking_id: &str) -> Result<Booking, ServiceError>;

    /// Cancel a booking. Returns `false` if it was already cancelled.
    async fn cancel(&self, booking_id: &str) -> Result<bool, ServiceError>;

    async fn modify(&self, change: &BookingChange) -> Result<Booking, ServiceError>;
}

struct LedgerState {
    bookings: Vec<Booking>,
    next_seq: u64,
}

/// In-memory booking ledger.
pub struct BookingLedger {
    state: Mutex<LedgerState>,
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLedger {
    /// Create an empty ledger. References start at `BK-1001`.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                bookings: Vec::new(),
                next_seq: 1001,
            }),
        }
    }

    /// Write a booking and return it with its assigned reference.
    pub fn record(&self, draft: NewBooking) -> Result<Booking, ServiceError> {
        let mut state = self.lock()?;
        let booking = Booking {
            id: format!("BK-{}", state.next_seq),
            kind: draft.kind,
            item_id: draft.item_id,
            title: draft.title,
            start_date: draft.start_date,
            end_date: draft.end_date,
            guests: draft.guests,
            total_price: draft.total_price,
            status: draft.status,
            created_at: Timestamp::now(),
        };
        state.next_seq += 1;
        state.bookings.push(booking.clone());
        tracing::debug!(booking_id = %booking.id, kind = %booking.kind, "Booking recorded");
        Ok(booking)
    }

    /// Number of bookings in the ledger, in any status.
    pub fn len(&self) -> usize {
        self.lock().map(|s| s.bookings.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, LedgerState>, ServiceError> {
        self.state
            .lock()
            .map_err(|e| ServiceError::Unavailable(format!("Ledger lock poisoned: {}", e)))
    }
}

#[async_trait]
impl BookingService for BookingLedger {
    async fn list(&self) -> Result<Vec<Booking>, ServiceError> {
        let state = self.lock()?;
        let mut bookings = state.bookings.clone();
        bookings.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(bookings)
    }

    async fn get(&self, booking_id: &str) -> Result<Booking, ServiceError> {
        let state = self.lock()?;
        state
            .bookings
            .iter()
            .find(|b| b.id.eq_ignore_ascii_case(booking_id))
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(booking_id.to_string()))
    }

    async fn cancel(&self, booking_id: &str) -> Result<bool, ServiceError> {
        let mut state = self.lock()?;
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id.eq_ignore_ascii_case(booking_id))
            .ok_or_else(|| ServiceError::NotFound(booking_id.to_string()))?;

        if booking.status == BookingStatus::Cancelled {
            return Ok(false);
        }
        booking.status = BookingStatus::Cancelled;
        tracing::info!(booking_id = %booking.id, "Booking cancelled");
        Ok(true)
    }

    async fn modify(&self, change: &BookingChange) -> Result<Booking, ServiceError> {
        let mut state = self.lock()?;
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id.eq_ignore_ascii_case(&change.booking_id))
            .ok_or_else(|| ServiceError::NotFound(change.booking_id.clone()))?;

        if booking.status != BookingStatus::Confirmed {
            return Err(ServiceError::Rejected(format!(
                "Booking {} is {} and cannot be changed",
                booking.id, booking.status
            )));
        }

        if let Some(start) = change.start_date {
            // Keep the original length of stay.
            if let Some(end) = booking.end_date {
                let length = end - booking.start_date;
                booking.end_date = Some(start + length);
            }
            booking.start_date = start;
        }
        if let Some(guests) = change.guests {
            if guests == 0 {
                return Err(ServiceError::InvalidRequest(
                    "Guest count must be positive".to_string(),
                ));
            }
            booking.guests = guests;
        }
        Ok(booking.clone())
    }
}
