//! Response formatting for tool results and canned replies.
//!
//! Renders a [`ToolResult`] into user-facing text plus an optional
//! [`RichContent`] payload. Successful searches are written back into the
//! conversation context; failures never touch it.

use wayfarer_core::types::{
    Booking, CarRental, Destination, Flight, FlightStatus, Hotel, PointsBalance, Restaurant,
    TripTheme,
};

use crate::context::{ConversationContext, SearchResultSet};
use crate::types::{
    ClassifiedIntent, Intent, PendingAction, PendingActionKind, RichContent, SelectedItem,
    ToolData, ToolKind, ToolParams, ToolResult,
};

/// How many runner-ups a single-pick summary names.
const MAX_ALTERNATIVES: usize = 2;

/// Text and optional rich payload for one agent message.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedResponse {
    pub text: String,
    pub rich_content: Option<RichContent>,
}

impl FormattedResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rich_content: None,
        }
    }

    fn rich(text: impl Into<String>, rich_content: RichContent) -> Self {
        Self {
            text: text.into(),
            rich_content: Some(rich_content),
        }
    }
}

// =============================================================================
// ResponseFormatter
// =============================================================================

/// Formats tool results, updating the context for successful searches.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(
        &self,
        result: &ToolResult,
        classified: &ClassifiedIntent,
        context: &mut ConversationContext,
    ) -> FormattedResponse {
        if !result.success {
            return self.format_failure(result);
        }

        // Arguments a later confirmation should reuse (dates, party size).
        let carried = ToolParams::from_entities(&classified.entities).args;

        match &result.data {
            ToolData::Hotels(hotels) => {
                context.record_results(SearchResultSet::Hotels(hotels.clone()));
                match hotels.first() {
                    Some(top) => {
                        context.set_pending_action(
                            PendingAction::new(
                                PendingActionKind::BookHotel,
                                SelectedItem::Hotel(top.clone()),
                            )
                            .with_args(carried),
                        );
                        hotel_summary(top, hotels)
                    }
                    None => FormattedResponse::text(result.message.clone()),
                }
            }
            ToolData::Restaurants(restaurants) => {
                context.record_results(SearchResultSet::Restaurants(restaurants.clone()));
                match restaurants.first() {
                    Some(top) => {
                        context.set_pending_action(
                            PendingAction::new(
                                PendingActionKind::BookRestaurant,
                                SelectedItem::Restaurant(top.clone()),
                            )
                            .with_args(carried),
                        );
                        restaurant_summary(top, restaurants)
                    }
                    None => FormattedResponse::text(result.message.clone()),
                }
            }
            ToolData::Cars(cars) => {
                context.record_results(SearchResultSet::Cars(cars.clone()));
                match cars.first() {
                    Some(top) => {
                        context.set_pending_action(
                            PendingAction::new(
                                PendingActionKind::BookCar,
                                SelectedItem::CarRental(top.clone()),
                            )
                            .with_args(carried),
                        );
                        car_summary(top, cars)
                    }
                    None => FormattedResponse::text(result.message.clone()),
                }
            }
            ToolData::Flights(flights) => {
                context.record_results(SearchResultSet::Flights(flights.clone()));
                flight_list(flights)
            }
            ToolData::Destinations(destinations) => {
                context.record_results(SearchResultSet::Destinations(destinations.clone()));
                if let Some(top) = destinations.first() {
                    context.set_pending_action(PendingAction::new(
                        PendingActionKind::SelectItinerary,
                        SelectedItem::Destination(top.clone()),
                    ));
                }
                destination_list(destinations)
            }
            ToolData::TripThemes(themes) => theme_list(themes),
            ToolData::Bookings(bookings) => {
                context.record_results(SearchResultSet::Bookings(bookings.clone()));
                booking_list(bookings)
            }
            ToolData::Booking(booking) if result.tool == ToolKind::ModifyBooking => {
                FormattedResponse::rich(
                    format!(
                        "Done. {} now starts {} for {}.",
                        booking.title,
                        booking.start_date.format("%b %-d"),
                        guests(booking.guests)
                    ),
                    RichContent::Link {
                        url: format!("/bookings/{}", booking.id),
                        label: format!("View booking {}", booking.id),
                    },
                )
            }
            ToolData::Booking(booking) => FormattedResponse::rich(
                format!(
                    "You're all set! {} is confirmed. Your reference is {}.",
                    booking.title, booking.id
                ),
                RichContent::BookingConfirmation {
                    booking: booking.clone(),
                },
            ),
            ToolData::Cancellation { booking_id, .. } => FormattedResponse::text(format!(
                "Done. Booking {} has been cancelled.",
                booking_id
            )),
            ToolData::PointsBalance(balance) if classified.intent == Intent::CheckBenefits => {
                benefits_summary(balance)
            }
            ToolData::PointsBalance(balance) => FormattedResponse::rich(
                format!(
                    "You have {} points with {} status.",
                    thousands(balance.points),
                    balance.tier
                ),
                RichContent::StatusBadge {
                    label: format!("{} member", balance.tier),
                    status: format!("{} points", thousands(balance.points)),
                },
            ),
            ToolData::PointsValuation(valuation) => FormattedResponse::text(format!(
                "Your {} points are worth about ${:.2} at {} cents each.",
                thousands(valuation.points),
                valuation.value,
                valuation.cents_per_point
            )),
            ToolData::PointsBoost(boost) => FormattedResponse::text(boost.description.clone()),
            ToolData::FlightStatus(status) => flight_status(status),
            ToolData::None => FormattedResponse::text(result.message.clone()),
        }
    }

    fn format_failure(&self, result: &ToolResult) -> FormattedResponse {
        let text = match (&result.data, result.tool) {
            (ToolData::Booking(booking), _) => format!(
                "Sorry, I couldn't complete the booking for {} (it came back {}). Would you like to try another option?",
                booking.title, booking.status
            ),
            (ToolData::Cancellation { .. }, _) => result.message.clone(),
            (ToolData::None, _) if result.message.ends_with('?') => result.message.clone(),
            (ToolData::None, _) => format!(
                "Sorry, I couldn't complete that: {}. Please try again.",
                result.message.trim_end_matches('.')
            ),
            (_, ToolKind::SearchHotels) => {
                "Sorry, I couldn't find any hotels. Try another city or different dates.".to_string()
            }
            (_, ToolKind::SearchFlights) => {
                "Sorry, I couldn't find any flights for that route. Try another date or destination."
                    .to_string()
            }
            (_, ToolKind::SearchRestaurants) => {
                "Sorry, I couldn't find any restaurants like that. Try another cuisine.".to_string()
            }
            (_, ToolKind::SearchCars) => {
                "Sorry, there are no rental cars available for those dates.".to_string()
            }
            (_, ToolKind::ListBookings) => {
                "You don't have any bookings yet. Want me to find you a hotel or a flight?"
                    .to_string()
            }
            _ => format!("Sorry, {}", lowercase_first(&result.message)),
        };
        FormattedResponse::text(text)
    }
}

// =============================================================================
// Canned replies
// =============================================================================

pub fn greeting() -> FormattedResponse {
    FormattedResponse::text(
        "Hi! I'm your travel assistant. I can find flights, hotels, restaurants and rental cars, \
         manage your bookings and help you get the most from your points. Where would you like to go?",
    )
}

pub fn help() -> FormattedResponse {
    FormattedResponse::text(
        "Here's what I can do:\n\
         - Search and book flights, hotels, restaurants and rental cars\n\
         - Check flight status (\"is SK117 on time?\")\n\
         - Show, change or cancel your bookings\n\
         - Check your points, benefits and the best ways to redeem them\n\
         - Suggest destinations and plan a whole trip\n\
         Try \"find hotels in Rome\" to get started.",
    )
}

pub fn nothing_to_confirm() -> FormattedResponse {
    FormattedResponse::text(
        "There's nothing waiting for confirmation right now. What would you like to do?",
    )
}

/// Acknowledge a "no" in terms of what the user was last looking at.
pub fn rejection(context: &ConversationContext) -> FormattedResponse {
    let results = &context.last_results;
    let text = if results.hotels.is_some() {
        "No problem. Would you like to see other hotels? I can look in a different area, price range or dates."
    } else if results.flights.is_some() {
        "No problem. Want me to look for flights on another date or at a different time?"
    } else if results.restaurants.is_some() {
        "No problem. Should I look for a different cuisine or another night?"
    } else if results.cars.is_some() {
        "No problem. I can look for a different car size or rental company."
    } else {
        "No problem. What would you like to do instead?"
    };
    FormattedResponse::text(text)
}

pub fn ask_again() -> FormattedResponse {
    FormattedResponse::text(
        "Sorry, I didn't quite catch that. Could you say it another way? \
         For example, \"find hotels in Rome\" or \"flights to Tokyo next friday\".",
    )
}

/// Clarification when an intent is too uncertain or yields no plan.
pub fn clarification(intent: Intent) -> FormattedResponse {
    let text = match intent {
        Intent::SearchHotels | Intent::BookHotel => {
            "Which city would you like a hotel in, and for which dates?"
        }
        Intent::SearchFlights | Intent::BookFlight => "Where would you like to fly, and when?",
        Intent::SearchRestaurants | Intent::BookRestaurant => {
            "Which city are you dining in, and is there a cuisine you're in the mood for?"
        }
        Intent::SearchCars | Intent::BookCar => "Where do you need to pick up the car?",
        Intent::GetFlightStatus => "Which flight should I check? Give me a number like SK117.",
        Intent::CancelBooking | Intent::ModifyBooking => {
            "Which booking do you mean? You can give me its reference, like BK-1001."
        }
        Intent::PlanTrip | Intent::SearchDestinations | Intent::GetTripSuggestions => {
            "Where are you thinking of going? I can also suggest some ideas."
        }
        _ => "I'm not sure what you'd like to do. Could you tell me a bit more, like \"find hotels in Rome\"?",
    };
    FormattedResponse::text(text)
}

/// One-line offer for the pending action.
pub fn proposal(action: &PendingAction) -> String {
    match action.kind {
        PendingActionKind::SelectItinerary => {
            format!("Would you like me to {}?", action.description)
        }
        PendingActionKind::CancelBooking | PendingActionKind::ModifyBooking => format!(
            "Should I {}? Just say yes to confirm.",
            action.description
        ),
        _ => format!(
            "Would you like me to {}? Just say \"book it\" to confirm.",
            action.description
        ),
    }
}

// =============================================================================
// Per-domain rendering
// =============================================================================

fn alternatives<T>(items: &[T], name: impl Fn(&T) -> String) -> Vec<String> {
    items
        .iter()
        .skip(1)
        .take(MAX_ALTERNATIVES)
        .map(name)
        .collect()
}

fn or_list(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

fn hotel_summary(top: &Hotel, hotels: &[Hotel]) -> FormattedResponse {
    let others = alternatives(hotels, |h| h.name.clone());
    let mut text = format!(
        "I found {} in {}. My top pick is {} ({:.1} stars, ${:.0} a night).",
        count(hotels.len(), "hotel", "hotels"),
        top.city,
        top.name,
        top.rating,
        top.price_per_night
    );
    if !others.is_empty() {
        text.push_str(&format!(" You could also consider {}.", or_list(&others)));
    }
    FormattedResponse::rich(
        text,
        RichContent::HotelCard {
            hotel: top.clone(),
            alternatives: others,
        },
    )
}

fn restaurant_summary(top: &Restaurant, restaurants: &[Restaurant]) -> FormattedResponse {
    let others = alternatives(restaurants, |r| r.name.clone());
    let mut text = format!(
        "{} is the best-rated {} spot I found in {} ({:.1} stars, {}).",
        top.name,
        top.cuisine,
        top.city,
        top.rating,
        "$".repeat(usize::from(top.price_level.max(1)))
    );
    if !others.is_empty() {
        text.push_str(&format!(" Other good options: {}.", or_list(&others)));
    }
    FormattedResponse::rich(
        text,
        RichContent::RestaurantCard {
            restaurant: top.clone(),
            alternatives: others,
        },
    )
}

fn car_summary(top: &CarRental, cars: &[CarRental]) -> FormattedResponse {
    let others = alternatives(cars, |c| format!("the {}", c.model));
    let mut text = format!(
        "The best deal in {} is the {} from {} at ${:.0} a day.",
        top.city, top.model, top.company, top.price_per_day
    );
    if !others.is_empty() {
        text.push_str(&format!(" Also available: {}.", or_list(&others)));
    }
    FormattedResponse::rich(
        text,
        RichContent::CarRentalResults {
            cars: cars.to_vec(),
        },
    )
}

fn flight_list(flights: &[Flight]) -> FormattedResponse {
    let text = match flights.first() {
        Some(cheapest) => format!(
            "I found {}. The cheapest is {} {} from {} to {} at {} for ${:.0}.",
            count(flights.len(), "flight", "flights"),
            cheapest.airline,
            cheapest.flight_number,
            cheapest.origin,
            cheapest.destination,
            cheapest.departure_time,
            cheapest.price
        ),
        None => "I didn't find any flights.".to_string(),
    };
    FormattedResponse::rich(
        text,
        RichContent::FlightResults {
            flights: flights.to_vec(),
        },
    )
}

fn destination_list(destinations: &[Destination]) -> FormattedResponse {
    if let [only] = destinations {
        let text = format!("{}, {}: {}", only.name, only.country, only.description);
        if let Some(url) = &only.image_url {
            return FormattedResponse::rich(
                text.clone(),
                RichContent::Image {
                    url: url.clone(),
                    caption: format!("{}, {}", only.name, only.country),
                },
            );
        }
    }
    let names: Vec<String> = destinations.iter().map(|d| d.name.clone()).collect();
    FormattedResponse::rich(
        format!("Here are some places you might like: {}.", names.join(", ")),
        RichContent::DestinationResults {
            destinations: destinations.to_vec(),
        },
    )
}

fn theme_list(themes: &[TripTheme]) -> FormattedResponse {
    let titles: Vec<String> = themes
        .iter()
        .map(|t| format!("{} ({} days)", t.title, t.duration_days))
        .collect();
    FormattedResponse::rich(
        format!("Here are a few trip ideas: {}.", titles.join(", ")),
        RichContent::ItineraryThemes {
            themes: themes.to_vec(),
        },
    )
}

fn booking_list(bookings: &[Booking]) -> FormattedResponse {
    let lines: Vec<String> = bookings
        .iter()
        .map(|b| {
            format!(
                "{} {} on {} ({})",
                b.id,
                b.title,
                b.start_date.format("%b %-d"),
                b.status
            )
        })
        .collect();
    FormattedResponse::rich(
        format!(
            "You have {}: {}.",
            count(bookings.len(), "booking", "bookings"),
            lines.join("; ")
        ),
        RichContent::BookingsList {
            bookings: bookings.to_vec(),
        },
    )
}

fn benefits_summary(balance: &PointsBalance) -> FormattedResponse {
    let text = format!(
        "As a {} member you have {} points and {} lounge {} available. \
         Your tier also includes priority check-in, free seat selection and bonus points on every stay.",
        balance.tier,
        thousands(balance.points),
        balance.lounge_passes,
        if balance.lounge_passes == 1 { "pass" } else { "passes" }
    );
    FormattedResponse::rich(
        text,
        RichContent::LoungeCard {
            tier: balance.tier.clone(),
            lounge_passes: balance.lounge_passes,
            points: balance.points,
        },
    )
}

fn flight_status(status: &FlightStatus) -> FormattedResponse {
    let mut text = format!(
        "{} is {}. Scheduled departure {}, estimated {}.",
        status.flight_id, status.state, status.scheduled_departure, status.estimated_departure
    );
    if let Some(gate) = &status.gate {
        text.push_str(&format!(" Gate {}.", gate));
    }
    FormattedResponse::rich(
        text,
        RichContent::StatusBadge {
            label: status.flight_id.clone(),
            status: status.state.to_string(),
        },
    )
}

// =============================================================================
// Text helpers
// =============================================================================

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {}", one)
    } else {
        format!("{} {}", n, many)
    }
}

fn guests(n: u32) -> String {
    if n == 1 {
        "1 guest".to_string()
    } else {
        format!("{} guests", n)
    }
}

/// 84250 -> "84,250"
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntitySlot, Entities};
    use chrono::NaiveDate;
    use wayfarer_core::types::{BookingKind, BookingStatus, Timestamp};

    fn hotel(id: &str, name: &str) -> Hotel {
        Hotel {
            id: id.to_string(),
            name: name.to_string(),
            city: "Rome".to_string(),
            address: String::new(),
            rating: 4.7,
            price_per_night: 210.0,
            amenities: vec![],
            image_url: None,
        }
    }

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: "BK-1001".to_string(),
            kind: BookingKind::Hotel,
            item_id: "htl-rome-1".to_string(),
            title: "Hotel Artemide".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 11, 7),
            guests: 2,
            total_price: 1050.0,
            status,
            created_at: Timestamp(0),
        }
    }

    fn classified(intent: Intent) -> ClassifiedIntent {
        ClassifiedIntent::new(intent, 0.8, Entities::new())
    }

    fn hotels_result() -> ToolResult {
        ToolResult::new(
            ToolKind::SearchHotels,
            true,
            ToolData::Hotels(vec![
                hotel("htl-rome-1", "Hotel Artemide"),
                hotel("htl-rome-2", "Palazzo Navona"),
                hotel("htl-rome-3", "Trastevere Suites"),
            ]),
            "Found 3 hotels in Rome.",
        )
    }

    // ---- Search results ----

    #[test]
    fn test_hotel_results_set_pending_top_pick() {
        let mut ctx = ConversationContext::new("c");
        let mut intent = classified(Intent::SearchHotels);
        intent.entities.insert(EntitySlot::Guests, "3".to_string());
        let response = ResponseFormatter::new().format(&hotels_result(), &intent, &mut ctx);

        assert!(response.text.contains("Hotel Artemide"));
        assert!(response.text.contains("Palazzo Navona or Trastevere Suites"));
        match response.rich_content {
            Some(RichContent::HotelCard { hotel, alternatives }) => {
                assert_eq!(hotel.id, "htl-rome-1");
                assert_eq!(alternatives.len(), 2);
            }
            other => panic!("unexpected rich content: {:?}", other),
        }

        let pending = ctx.pending_action.as_ref().unwrap();
        assert_eq!(pending.kind, PendingActionKind::BookHotel);
        assert!(matches!(&pending.data, SelectedItem::Hotel(h) if h.id == "htl-rome-1"));
        assert_eq!(pending.args.get("guests").map(String::as_str), Some("3"));
        assert_eq!(ctx.last_results.hotels.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn test_empty_results_do_not_mutate_context() {
        let mut ctx = ConversationContext::new("c");
        let empty = ToolResult::new(
            ToolKind::SearchHotels,
            false,
            ToolData::Hotels(vec![]),
            "No hotels available in Atlantis.",
        );
        let response = ResponseFormatter::new().format(&empty, &classified(Intent::SearchHotels), &mut ctx);
        assert!(response.text.starts_with("Sorry"));
        assert!(response.rich_content.is_none());
        assert!(ctx.last_results.hotels.is_none());
        assert!(ctx.pending_action.is_none());
    }

    #[test]
    fn test_flight_results_are_a_list_without_pending() {
        let mut ctx = ConversationContext::new("c");
        let result = ToolResult::new(ToolKind::SearchFlights, true, ToolData::Flights(vec![]), "");
        let response = ResponseFormatter::new().format(&result, &classified(Intent::SearchFlights), &mut ctx);
        assert!(matches!(response.rich_content, Some(RichContent::FlightResults { .. })));
        assert!(ctx.pending_action.is_none());
    }

    // ---- Bookings ----

    #[test]
    fn test_confirmed_booking() {
        let mut ctx = ConversationContext::new("c");
        let result = ToolResult::new(
            ToolKind::BookHotel,
            true,
            ToolData::Booking(booking(BookingStatus::Confirmed)),
            "",
        );
        let response = ResponseFormatter::new().format(&result, &classified(Intent::Confirmation), &mut ctx);
        assert!(response.text.contains("BK-1001"));
        assert!(matches!(
            response.rich_content,
            Some(RichContent::BookingConfirmation { .. })
        ));
    }

    #[test]
    fn test_failed_booking_apologises_without_rich_content() {
        let mut ctx = ConversationContext::new("c");
        let result = ToolResult::new(
            ToolKind::BookHotel,
            false,
            ToolData::Booking(booking(BookingStatus::Failed)),
            "",
        );
        let response = ResponseFormatter::new().format(&result, &classified(Intent::Confirmation), &mut ctx);
        assert!(response.text.starts_with("Sorry"));
        assert!(response.rich_content.is_none());
    }

    #[test]
    fn test_modified_booking_links_to_details() {
        let mut ctx = ConversationContext::new("c");
        let result = ToolResult::new(
            ToolKind::ModifyBooking,
            true,
            ToolData::Booking(booking(BookingStatus::Confirmed)),
            "",
        );
        let response = ResponseFormatter::new().format(&result, &classified(Intent::Confirmation), &mut ctx);
        assert_eq!(response.text, "Done. Hotel Artemide now starts Nov 2 for 2 guests.");
        assert_eq!(
            response.rich_content,
            Some(RichContent::Link {
                url: "/bookings/BK-1001".to_string(),
                label: "View booking BK-1001".to_string(),
            })
        );
    }

    #[test]
    fn test_cancellation_is_text_only() {
        let mut ctx = ConversationContext::new("c");
        let result = ToolResult::new(
            ToolKind::CancelBooking,
            true,
            ToolData::Cancellation {
                booking_id: "BK-1001".to_string(),
                cancelled: true,
            },
            "",
        );
        let response = ResponseFormatter::new().format(&result, &classified(Intent::Confirmation), &mut ctx);
        assert!(response.text.contains("cancelled"));
        assert!(response.rich_content.is_none());
    }

    // ---- Points ----

    #[test]
    fn test_benefits_use_longer_form() {
        let balance = PointsBalance {
            points: 84_250,
            tier: "Gold".to_string(),
            lounge_passes: 2,
        };
        let result = ToolResult::new(
            ToolKind::GetPointsBalance,
            true,
            ToolData::PointsBalance(balance),
            "",
        );
        let formatter = ResponseFormatter::new();
        let mut ctx = ConversationContext::new("c");

        let points = formatter.format(&result, &classified(Intent::CheckPoints), &mut ctx);
        assert_eq!(points.text, "You have 84,250 points with Gold status.");
        assert!(matches!(points.rich_content, Some(RichContent::StatusBadge { .. })));

        let benefits = formatter.format(&result, &classified(Intent::CheckBenefits), &mut ctx);
        assert!(benefits.text.len() > points.text.len());
        assert!(matches!(
            benefits.rich_content,
            Some(RichContent::LoungeCard { lounge_passes: 2, .. })
        ));
    }

    // ---- Canned replies ----

    #[test]
    fn test_trip_themes_render_as_itinerary_themes() {
        let mut ctx = ConversationContext::new("c");
        let themes = vec![TripTheme {
            id: "theme-coastal".to_string(),
            title: "Coastal Escape".to_string(),
            description: "Beaches and seafood".to_string(),
            destinations: vec!["Lisbon".to_string()],
            duration_days: 5,
        }];
        let result = ToolResult::new(
            ToolKind::GetTripSuggestions,
            true,
            ToolData::TripThemes(themes),
            "Found 1 trip idea.",
        );
        let response =
            ResponseFormatter::new().format(&result, &classified(Intent::GetTripSuggestions), &mut ctx);

        assert!(response.text.contains("Coastal Escape (5 days)"));
        match response.rich_content {
            Some(RichContent::ItineraryThemes { themes }) => assert_eq!(themes.len(), 1),
            other => panic!("unexpected rich content: {:?}", other),
        }
        assert!(ctx.pending_action.is_none());
    }

    #[test]
    fn test_rejection_references_last_domain_by_priority() {
        let mut ctx = ConversationContext::new("c");
        assert!(rejection(&ctx).text.contains("instead"));
        ctx.record_results(SearchResultSet::Cars(vec![]));
        assert!(rejection(&ctx).text.contains("car"));
        ctx.record_results(SearchResultSet::Hotels(vec![]));
        assert!(rejection(&ctx).text.contains("hotels"));
    }

    #[test]
    fn test_proposal_text() {
        let action = PendingAction::new(
            PendingActionKind::BookHotel,
            SelectedItem::Hotel(hotel("htl-rome-1", "Hotel Artemide")),
        );
        assert_eq!(
            proposal(&action),
            "Would you like me to book Hotel Artemide? Just say \"book it\" to confirm."
        );

        let cancel = PendingAction::new(
            PendingActionKind::CancelBooking,
            SelectedItem::Booking(booking(BookingStatus::Confirmed)),
        );
        assert_eq!(
            proposal(&cancel),
            "Should I cancel Hotel Artemide (BK-1001)? Just say yes to confirm."
        );
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
