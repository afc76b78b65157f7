//! Turns a classified intent into an ordered plan of tool calls.
//!
//! The planner is pure: it reads the context but never mutates it, and it
//! never fails. An empty plan means "no plan" and is answered with a
//! clarification by the orchestrator.

use wayfarer_core::types::SearchDomain;

use crate::context::ConversationContext;
use crate::types::{ClassifiedIntent, EntitySlot, Intent, Plan, PlanStep, ToolKind, ToolParams};

/// Destination searches without any entities list this many featured places.
const FEATURED_DESTINATIONS: &str = "5";

#[derive(Debug, Default, Clone, Copy)]
pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self
    }

    pub fn plan(&self, classified: &ClassifiedIntent, context: &ConversationContext) -> Plan {
        let params = ToolParams::from_entities(&classified.entities);
        let location = classified.entity(EntitySlot::Location);

        match classified.intent {
            Intent::SearchFlights => single(ToolKind::SearchFlights, params, location),
            Intent::SearchHotels => single(ToolKind::SearchHotels, params, location),
            Intent::SearchRestaurants => single(ToolKind::SearchRestaurants, params, location),
            Intent::SearchCars => single(ToolKind::SearchCars, params, location),
            Intent::SearchDestinations => {
                let params = if classified.entities.is_empty() {
                    params.with_arg("max_results", FEATURED_DESTINATIONS)
                } else {
                    params
                };
                single(ToolKind::SearchDestinations, params, location)
            }
            Intent::GetTripSuggestions => single(ToolKind::GetTripSuggestions, params, location),
            Intent::CheckBookings => single(ToolKind::ListBookings, params, None),
            Intent::CheckPoints | Intent::CheckBenefits => {
                single(ToolKind::GetPointsBalance, params, None)
            }

            Intent::BookHotel | Intent::BookFlight | Intent::BookRestaurant | Intent::BookCar => {
                self.plan_booking(classified, context, params)
            }
            Intent::CancelBooking => {
                self.plan_booking_change(classified, context, params, ToolKind::CancelBooking)
            }
            Intent::ModifyBooking => {
                self.plan_booking_change(classified, context, params, ToolKind::ModifyBooking)
            }

            Intent::PlanTrip => {
                let mut steps = Vec::with_capacity(5);
                if location.is_some() {
                    steps.push(step(ToolKind::SearchDestinations, params.clone(), location));
                }
                for tool in [
                    ToolKind::SearchFlights,
                    ToolKind::SearchHotels,
                    ToolKind::SearchRestaurants,
                    ToolKind::SearchCars,
                ] {
                    steps.push(step(tool, params.clone(), location));
                }
                Plan {
                    steps,
                    description: match location {
                        Some(place) => format!("Plan a trip to {}", place),
                        None => "Plan a trip".to_string(),
                    },
                }
            }

            Intent::MaximizePoints => Plan {
                steps: vec![
                    step(ToolKind::GetPointsBalance, params.clone(), None),
                    step(ToolKind::CalculatePointsValue, params.clone(), None),
                    step(ToolKind::ApplyPointsBoost, params, None),
                ],
                description: "Find the best use of your points".to_string(),
            },

            Intent::GetFlightStatus => {
                if classified.entities.contains_key(&EntitySlot::FlightId) {
                    single(ToolKind::GetFlightStatus, params, None)
                } else {
                    single(ToolKind::ListBookings, params, None)
                }
            }

            Intent::Greeting
            | Intent::Confirmation
            | Intent::Rejection
            | Intent::GeneralHelp
            | Intent::FollowUp => Plan::empty(),
        }
    }

    /// Book against prior results when they exist, otherwise search first
    /// and gate the booking behind confirmation.
    fn plan_booking(
        &self,
        classified: &ClassifiedIntent,
        context: &ConversationContext,
        params: ToolParams,
    ) -> Plan {
        let Some(domain) = classified.intent.target_domain() else {
            return Plan::empty();
        };
        let (search_tool, book_tool) = match domain {
            SearchDomain::Hotel => (ToolKind::SearchHotels, ToolKind::BookHotel),
            SearchDomain::Flight => (ToolKind::SearchFlights, ToolKind::BookFlight),
            SearchDomain::Restaurant => (ToolKind::SearchRestaurants, ToolKind::BookRestaurant),
            SearchDomain::Car => (ToolKind::SearchCars, ToolKind::BookCar),
            SearchDomain::Destination | SearchDomain::Booking => return Plan::empty(),
        };
        let location = classified.entity(EntitySlot::Location);

        if context.has_results(domain) {
            let picked = context
                .pick(domain, classified.selection(), None)
                .or_else(|| context.pick(domain, None, None));
            let params = match picked {
                Some(item) => params.with_selection(item),
                None => params,
            };
            return Plan {
                description: format!("Book a {} from your last search", domain),
                steps: vec![gated(book_tool, params)],
            };
        }

        Plan {
            description: format!("Find and book a {}", domain),
            steps: vec![
                step(search_tool, params.clone(), location),
                gated(book_tool, params),
            ],
        }
    }

    /// Cancel or modify an existing booking, listing bookings first when
    /// the one meant is not already known.
    fn plan_booking_change(
        &self,
        classified: &ClassifiedIntent,
        context: &ConversationContext,
        params: ToolParams,
        tool: ToolKind,
    ) -> Plan {
        let verb = if tool == ToolKind::CancelBooking {
            "Cancel"
        } else {
            "Change"
        };
        let picked = context.pick(
            SearchDomain::Booking,
            classified.selection(),
            classified.entity(EntitySlot::BookingRef),
        );

        match picked {
            Some(item) => Plan {
                description: format!("{} {}", verb, item.name()),
                steps: vec![gated(tool, params.with_selection(item))],
            },
            None => Plan {
                description: format!("{} a booking", verb),
                steps: vec![
                    step(ToolKind::ListBookings, params.clone(), None),
                    gated(tool, params),
                ],
            },
        }
    }
}

fn describe(tool: ToolKind, location: Option<&str>) -> String {
    let what = match tool {
        ToolKind::SearchFlights => "Search flights",
        ToolKind::SearchHotels => "Search hotels",
        ToolKind::SearchRestaurants => "Search restaurants",
        ToolKind::SearchCars => "Search rental cars",
        ToolKind::SearchDestinations => "Search destinations",
        ToolKind::GetTripSuggestions => "Suggest trip themes",
        ToolKind::ListBookings => "List your bookings",
        ToolKind::GetPointsBalance => "Check your points balance",
        ToolKind::CalculatePointsValue => "Calculate the value of your points",
        ToolKind::ApplyPointsBoost => "Look for a points boost",
        ToolKind::GetFlightStatus => "Check flight status",
        ToolKind::BookFlight => "Book the flight",
        ToolKind::BookHotel => "Book the hotel",
        ToolKind::BookRestaurant => "Reserve the table",
        ToolKind::BookCar => "Book the car",
        ToolKind::CancelBooking => "Cancel the booking",
        ToolKind::ModifyBooking => "Change the booking",
    };
    match location {
        Some(place) => format!("{} in {}", what, place),
        None => what.to_string(),
    }
}

fn step(tool: ToolKind, params: ToolParams, location: Option<&str>) -> PlanStep {
    PlanStep {
        tool,
        params,
        description: describe(tool, location),
        requires_confirmation: false,
    }
}

fn gated(tool: ToolKind, params: ToolParams) -> PlanStep {
    PlanStep {
        tool,
        params,
        description: describe(tool, None),
        requires_confirmation: true,
    }
}

fn single(tool: ToolKind, params: ToolParams, location: Option<&str>) -> Plan {
    let step = step(tool, params, location);
    Plan {
        description: step.description.clone(),
        steps: vec![step],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SearchResultSet;
    use crate::types::{Entities, SelectedItem};
    use chrono::NaiveDate;
    use wayfarer_core::types::{Booking, BookingKind, BookingStatus, Hotel, Timestamp};

    fn intent(intent: Intent, entities: &[(EntitySlot, &str)]) -> ClassifiedIntent {
        let entities: Entities = entities
            .iter()
            .map(|(slot, value)| (*slot, value.to_string()))
            .collect();
        ClassifiedIntent::new(intent, 0.8, entities)
    }

    fn hotel(id: &str, city: &str) -> Hotel {
        Hotel {
            id: id.to_string(),
            name: format!("Hotel {}", id),
            city: city.to_string(),
            address: String::new(),
            rating: 4.0,
            price_per_night: 120.0,
            amenities: vec![],
            image_url: None,
        }
    }

    fn booking(id: &str) -> Booking {
        Booking {
            id: id.to_string(),
            kind: BookingKind::Car,
            item_id: "car-1".to_string(),
            title: "Fiat 500".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            end_date: None,
            guests: 1,
            total_price: 70.0,
            status: BookingStatus::Confirmed,
            created_at: Timestamp(0),
        }
    }

    fn plan(classified: &ClassifiedIntent, ctx: &ConversationContext) -> Plan {
        Planner::new().plan(classified, ctx)
    }

    // ---- Search-only intents ----

    #[test]
    fn test_search_is_single_unconfirmed_step() {
        let ctx = ConversationContext::new("c");
        let p = plan(&intent(Intent::SearchHotels, &[(EntitySlot::Location, "Rome")]), &ctx);
        assert_eq!(p.tools(), vec![ToolKind::SearchHotels]);
        assert!(!p.steps[0].requires_confirmation);
        assert_eq!(p.steps[0].params.get("location"), Some("Rome"));
        assert_eq!(p.description, "Search hotels in Rome");
    }

    #[test]
    fn test_destinations_without_entities_use_featured_list() {
        let ctx = ConversationContext::new("c");
        let p = plan(&intent(Intent::SearchDestinations, &[]), &ctx);
        assert_eq!(p.steps[0].params.get("max_results"), Some("5"));
    }

    #[test]
    fn test_check_intents_map_to_read_tools() {
        let ctx = ConversationContext::new("c");
        assert_eq!(
            plan(&intent(Intent::CheckBookings, &[]), &ctx).tools(),
            vec![ToolKind::ListBookings]
        );
        assert_eq!(
            plan(&intent(Intent::CheckBenefits, &[]), &ctx).tools(),
            vec![ToolKind::GetPointsBalance]
        );
    }

    // ---- Book intents ----

    #[test]
    fn test_book_without_results_searches_first() {
        let ctx = ConversationContext::new("c");
        let p = plan(&intent(Intent::BookHotel, &[(EntitySlot::Location, "Rome")]), &ctx);
        assert_eq!(p.tools(), vec![ToolKind::SearchHotels, ToolKind::BookHotel]);
        assert!(!p.steps[0].requires_confirmation);
        assert!(p.steps[1].requires_confirmation);
        assert!(p.steps[1].params.selection.is_none());
    }

    #[test]
    fn test_book_with_results_is_single_gated_step() {
        let mut ctx = ConversationContext::new("c");
        ctx.record_results(SearchResultSet::Hotels(vec![hotel("a", "Rome"), hotel("b", "Rome")]));
        let p = plan(&intent(Intent::BookHotel, &[(EntitySlot::Selection, "1")]), &ctx);
        assert_eq!(p.tools(), vec![ToolKind::BookHotel]);
        assert!(p.steps[0].requires_confirmation);
        assert!(matches!(
            &p.steps[0].params.selection,
            Some(SelectedItem::Hotel(h)) if h.id == "b"
        ));
    }

    #[test]
    fn test_book_out_of_range_selection_falls_back_to_top_pick() {
        let mut ctx = ConversationContext::new("c");
        ctx.record_results(SearchResultSet::Hotels(vec![hotel("a", "Rome")]));
        let p = plan(&intent(Intent::BookHotel, &[(EntitySlot::Selection, "4")]), &ctx);
        assert!(matches!(
            &p.steps[0].params.selection,
            Some(SelectedItem::Hotel(h)) if h.id == "a"
        ));
    }

    #[test]
    fn test_book_with_results_ignores_named_city() {
        let mut ctx = ConversationContext::new("c");
        ctx.record_results(SearchResultSet::Hotels(vec![hotel("a", "Rome")]));
        let p = plan(&intent(Intent::BookHotel, &[(EntitySlot::Location, "Paris")]), &ctx);
        assert_eq!(p.tools(), vec![ToolKind::BookHotel]);
        assert!(p.steps[0].requires_confirmation);
        assert!(matches!(
            &p.steps[0].params.selection,
            Some(SelectedItem::Hotel(h)) if h.id == "a"
        ));
    }

    // ---- Cancel / modify ----

    #[test]
    fn test_cancel_without_bookings_lists_first() {
        let ctx = ConversationContext::new("c");
        let p = plan(&intent(Intent::CancelBooking, &[(EntitySlot::BookingRef, "BK-1001")]), &ctx);
        assert_eq!(p.tools(), vec![ToolKind::ListBookings, ToolKind::CancelBooking]);
        assert_eq!(p.steps[1].params.get("booking_ref"), Some("BK-1001"));
    }

    #[test]
    fn test_cancel_known_booking_is_single_gated_step() {
        let mut ctx = ConversationContext::new("c");
        ctx.record_results(SearchResultSet::Bookings(vec![booking("BK-1001"), booking("BK-1002")]));
        let p = plan(&intent(Intent::CancelBooking, &[(EntitySlot::BookingRef, "BK-1002")]), &ctx);
        assert_eq!(p.tools(), vec![ToolKind::CancelBooking]);
        assert!(p.steps[0].requires_confirmation);
        assert!(matches!(
            &p.steps[0].params.selection,
            Some(SelectedItem::Booking(b)) if b.id == "BK-1002"
        ));
    }

    #[test]
    fn test_modify_carries_change_arguments() {
        let mut ctx = ConversationContext::new("c");
        ctx.record_results(SearchResultSet::Bookings(vec![booking("BK-1001")]));
        let p = plan(
            &intent(
                Intent::ModifyBooking,
                &[(EntitySlot::Date, "next friday"), (EntitySlot::Guests, "3")],
            ),
            &ctx,
        );
        assert_eq!(p.tools(), vec![ToolKind::ModifyBooking]);
        assert_eq!(p.steps[0].params.get("date"), Some("next friday"));
        assert_eq!(p.steps[0].params.get("guests"), Some("3"));
    }

    // ---- Multi-step intents ----

    #[test]
    fn test_plan_trip_with_location() {
        let ctx = ConversationContext::new("c");
        let p = plan(&intent(Intent::PlanTrip, &[(EntitySlot::Location, "Barcelona")]), &ctx);
        assert_eq!(
            p.tools(),
            vec![
                ToolKind::SearchDestinations,
                ToolKind::SearchFlights,
                ToolKind::SearchHotels,
                ToolKind::SearchRestaurants,
                ToolKind::SearchCars,
            ]
        );
        assert!(p.steps.iter().all(|s| !s.requires_confirmation));
    }

    #[test]
    fn test_plan_trip_without_location_skips_destinations() {
        let ctx = ConversationContext::new("c");
        let p = plan(&intent(Intent::PlanTrip, &[]), &ctx);
        assert_eq!(p.steps.len(), 4);
        assert_eq!(p.steps[0].tool, ToolKind::SearchFlights);
    }

    #[test]
    fn test_maximize_points_three_steps() {
        let ctx = ConversationContext::new("c");
        let p = plan(&intent(Intent::MaximizePoints, &[]), &ctx);
        assert_eq!(
            p.tools(),
            vec![
                ToolKind::GetPointsBalance,
                ToolKind::CalculatePointsValue,
                ToolKind::ApplyPointsBoost,
            ]
        );
        assert!(p.steps.iter().all(|s| !s.requires_confirmation));
    }

    #[test]
    fn test_flight_status_falls_back_to_bookings() {
        let ctx = ConversationContext::new("c");
        let with_id = plan(&intent(Intent::GetFlightStatus, &[(EntitySlot::FlightId, "SK117")]), &ctx);
        assert_eq!(with_id.tools(), vec![ToolKind::GetFlightStatus]);
        let without = plan(&intent(Intent::GetFlightStatus, &[]), &ctx);
        assert_eq!(without.tools(), vec![ToolKind::ListBookings]);
    }

    #[test]
    fn test_conversational_intents_have_no_plan() {
        let ctx = ConversationContext::new("c");
        for i in [Intent::Greeting, Intent::Confirmation, Intent::FollowUp, Intent::GeneralHelp] {
            assert!(plan(&intent(i, &[]), &ctx).is_empty());
        }
    }
}
