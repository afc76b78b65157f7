//! Types shared across the dialogue engine: intents and entities, plans and
//! tool calls, pending actions, tool results, rich content and chat
//! messages.
//!
//! `ToolKind`, `ToolParams` and `ToolResult` are serde types so another
//! engine that emits tool calls can drive the same executor.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfarer_core::types::{
    Booking, CarRental, Destination, Flight, FlightStatus, Hotel, PointsBalance, PointsBoost,
    PointsValuation, Restaurant, SearchDomain, TripTheme,
};

// =============================================================================
// Intent
// =============================================================================

/// Closed set of things a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    Greeting,
    Confirmation,
    Rejection,
    GeneralHelp,
    FollowUp,
    SearchFlights,
    BookFlight,
    GetFlightStatus,
    SearchHotels,
    BookHotel,
    SearchRestaurants,
    BookRestaurant,
    SearchCars,
    BookCar,
    SearchDestinations,
    GetTripSuggestions,
    PlanTrip,
    CheckPoints,
    MaximizePoints,
    CheckBenefits,
    CheckBookings,
    CancelBooking,
    ModifyBooking,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Confirmation => "confirmation",
            Intent::Rejection => "rejection",
            Intent::GeneralHelp => "generalHelp",
            Intent::FollowUp => "followUp",
            Intent::SearchFlights => "searchFlights",
            Intent::BookFlight => "bookFlight",
            Intent::GetFlightStatus => "getFlightStatus",
            Intent::SearchHotels => "searchHotels",
            Intent::BookHotel => "bookHotel",
            Intent::SearchRestaurants => "searchRestaurants",
            Intent::BookRestaurant => "bookRestaurant",
            Intent::SearchCars => "searchCars",
            Intent::BookCar => "bookCar",
            Intent::SearchDestinations => "searchDestinations",
            Intent::GetTripSuggestions => "getTripSuggestions",
            Intent::PlanTrip => "planTrip",
            Intent::CheckPoints => "checkPoints",
            Intent::MaximizePoints => "maximizePoints",
            Intent::CheckBenefits => "checkBenefits",
            Intent::CheckBookings => "checkBookings",
            Intent::CancelBooking => "cancelBooking",
            Intent::ModifyBooking => "modifyBooking",
        }
    }

    /// Search intent that serves a result domain.
    pub fn search_for(domain: SearchDomain) -> Intent {
        match domain {
            SearchDomain::Hotel => Intent::SearchHotels,
            SearchDomain::Flight => Intent::SearchFlights,
            SearchDomain::Restaurant => Intent::SearchRestaurants,
            SearchDomain::Car => Intent::SearchCars,
            SearchDomain::Destination => Intent::SearchDestinations,
            SearchDomain::Booking => Intent::CheckBookings,
        }
    }

    /// Book intent for a result domain, if items of that domain can be booked.
    pub fn book_for(domain: SearchDomain) -> Option<Intent> {
        match domain {
            SearchDomain::Hotel => Some(Intent::BookHotel),
            SearchDomain::Flight => Some(Intent::BookFlight),
            SearchDomain::Restaurant => Some(Intent::BookRestaurant),
            SearchDomain::Car => Some(Intent::BookCar),
            SearchDomain::Destination | SearchDomain::Booking => None,
        }
    }

    /// Domain whose prior results an action intent operates on.
    pub fn target_domain(&self) -> Option<SearchDomain> {
        match self {
            Intent::BookHotel => Some(SearchDomain::Hotel),
            Intent::BookFlight => Some(SearchDomain::Flight),
            Intent::BookRestaurant => Some(SearchDomain::Restaurant),
            Intent::BookCar => Some(SearchDomain::Car),
            Intent::CancelBooking | Intent::ModifyBooking => Some(SearchDomain::Booking),
            _ => None,
        }
    }

    /// Intents that search or book and therefore take learned preferences.
    pub fn uses_preferences(&self) -> bool {
        matches!(
            self,
            Intent::SearchFlights
                | Intent::BookFlight
                | Intent::SearchHotels
                | Intent::BookHotel
                | Intent::SearchRestaurants
                | Intent::BookRestaurant
                | Intent::PlanTrip
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Entities
// =============================================================================

/// Named slot filled from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitySlot {
    Location,
    Date,
    Guests,
    Cuisine,
    CabinClass,
    OriginAirport,
    DestinationAirport,
    FlightId,
    BookingRef,
    /// Zero-based ordinal ("the second one" is `1`).
    Selection,
}

impl EntitySlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntitySlot::Location => "location",
            EntitySlot::Date => "date",
            EntitySlot::Guests => "guests",
            EntitySlot::Cuisine => "cuisine",
            EntitySlot::CabinClass => "cabin_class",
            EntitySlot::OriginAirport => "origin_airport",
            EntitySlot::DestinationAirport => "destination_airport",
            EntitySlot::FlightId => "flight_id",
            EntitySlot::BookingRef => "booking_ref",
            EntitySlot::Selection => "selection",
        }
    }
}

impl fmt::Display for EntitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Entities = BTreeMap<EntitySlot, String>;

/// Output of the extractor for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedIntent {
    pub intent: Intent,
    pub confidence: f32,
    pub entities: Entities,
}

impl ClassifiedIntent {
    pub fn new(intent: Intent, confidence: f32, entities: Entities) -> Self {
        Self {
            intent,
            confidence,
            entities,
        }
    }

    pub fn entity(&self, slot: EntitySlot) -> Option<&str> {
        self.entities.get(&slot).map(String::as_str)
    }

    /// Parsed `selection` ordinal, if one was given.
    pub fn selection(&self) -> Option<usize> {
        self.entity(EntitySlot::Selection)
            .and_then(|s| s.parse().ok())
    }
}

// =============================================================================
// Tools
// =============================================================================

/// Every operation the engine can invoke against the travel services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolKind {
    SearchFlights,
    BookFlight,
    GetFlightStatus,
    SearchHotels,
    BookHotel,
    SearchRestaurants,
    BookRestaurant,
    SearchCars,
    BookCar,
    SearchDestinations,
    GetTripSuggestions,
    ListBookings,
    CancelBooking,
    ModifyBooking,
    GetPointsBalance,
    CalculatePointsValue,
    ApplyPointsBoost,
}

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::SearchFlights => "searchFlights",
            ToolKind::BookFlight => "bookFlight",
            ToolKind::GetFlightStatus => "getFlightStatus",
            ToolKind::SearchHotels => "searchHotels",
            ToolKind::BookHotel => "bookHotel",
            ToolKind::SearchRestaurants => "searchRestaurants",
            ToolKind::BookRestaurant => "bookRestaurant",
            ToolKind::SearchCars => "searchCars",
            ToolKind::BookCar => "bookCar",
            ToolKind::SearchDestinations => "searchDestinations",
            ToolKind::GetTripSuggestions => "getTripSuggestions",
            ToolKind::ListBookings => "listBookings",
            ToolKind::CancelBooking => "cancelBooking",
            ToolKind::ModifyBooking => "modifyBooking",
            ToolKind::GetPointsBalance => "getPointsBalance",
            ToolKind::CalculatePointsValue => "calculatePointsValue",
            ToolKind::ApplyPointsBoost => "applyPointsBoost",
        }
    }

    /// Result domain a tool reads from or books into.
    pub fn domain(&self) -> Option<SearchDomain> {
        match self {
            ToolKind::SearchFlights | ToolKind::BookFlight => Some(SearchDomain::Flight),
            ToolKind::SearchHotels | ToolKind::BookHotel => Some(SearchDomain::Hotel),
            ToolKind::SearchRestaurants | ToolKind::BookRestaurant => {
                Some(SearchDomain::Restaurant)
            }
            ToolKind::SearchCars | ToolKind::BookCar => Some(SearchDomain::Car),
            ToolKind::SearchDestinations => Some(SearchDomain::Destination),
            ToolKind::ListBookings | ToolKind::CancelBooking | ToolKind::ModifyBooking => {
                Some(SearchDomain::Booking)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("Unknown tool: {}", s))
    }
}

/// A concrete record the user picked, carried into booking and
/// cancellation tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "item", rename_all = "camelCase")]
pub enum SelectedItem {
    Hotel(Hotel),
    Flight(Flight),
    Restaurant(Restaurant),
    CarRental(CarRental),
    Booking(Booking),
    Destination(Destination),
}

impl SelectedItem {
    /// Human-facing name of the item.
    pub fn name(&self) -> String {
        match self {
            SelectedItem::Hotel(h) => h.name.clone(),
            SelectedItem::Flight(f) => format!("{} {}", f.airline, f.flight_number),
            SelectedItem::Restaurant(r) => r.name.clone(),
            SelectedItem::CarRental(c) => format!("the {} from {}", c.model, c.company),
            SelectedItem::Booking(b) => format!("{} ({})", b.title, b.id),
            SelectedItem::Destination(d) => d.name.clone(),
        }
    }

    pub fn domain(&self) -> SearchDomain {
        match self {
            SelectedItem::Hotel(_) => SearchDomain::Hotel,
            SelectedItem::Flight(_) => SearchDomain::Flight,
            SelectedItem::Restaurant(_) => SearchDomain::Restaurant,
            SelectedItem::CarRental(_) => SearchDomain::Car,
            SelectedItem::Booking(_) => SearchDomain::Booking,
            SelectedItem::Destination(_) => SearchDomain::Destination,
        }
    }
}

/// Parameters of one tool call: string arguments plus an optional
/// selected record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolParams {
    #[serde(default)]
    pub args: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectedItem>,
}

impl ToolParams {
    pub fn from_entities(entities: &Entities) -> Self {
        Self {
            args: entities
                .iter()
                .map(|(slot, value)| (slot.as_str().to_string(), value.clone()))
                .collect(),
            selection: None,
        }
    }

    pub fn with_arg(mut self, key: &str, value: impl Into<String>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    pub fn with_selection(mut self, item: SelectedItem) -> Self {
        self.selection = Some(item);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.args
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

// =============================================================================
// Plans
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStep {
    pub tool: ToolKind,
    pub params: ToolParams,
    pub description: String,
    pub requires_confirmation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub description: String,
}

impl Plan {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn tools(&self) -> Vec<ToolKind> {
        self.steps.iter().map(|s| s.tool).collect()
    }
}

// =============================================================================
// Pending actions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingActionKind {
    BookHotel,
    BookFlight,
    BookRestaurant,
    BookCar,
    CancelBooking,
    ModifyBooking,
    SelectItinerary,
}

impl PendingActionKind {
    /// Pending action opened by a confirmation-gated tool.
    pub fn for_tool(tool: ToolKind) -> Option<Self> {
        match tool {
            ToolKind::BookHotel => Some(PendingActionKind::BookHotel),
            ToolKind::BookFlight => Some(PendingActionKind::BookFlight),
            ToolKind::BookRestaurant => Some(PendingActionKind::BookRestaurant),
            ToolKind::BookCar => Some(PendingActionKind::BookCar),
            ToolKind::CancelBooking => Some(PendingActionKind::CancelBooking),
            ToolKind::ModifyBooking => Some(PendingActionKind::ModifyBooking),
            _ => None,
        }
    }

    /// Tool run when the action is confirmed.
    pub fn continuation(&self) -> ToolKind {
        match self {
            PendingActionKind::BookHotel => ToolKind::BookHotel,
            PendingActionKind::BookFlight => ToolKind::BookFlight,
            PendingActionKind::BookRestaurant => ToolKind::BookRestaurant,
            PendingActionKind::BookCar => ToolKind::BookCar,
            PendingActionKind::CancelBooking => ToolKind::CancelBooking,
            PendingActionKind::ModifyBooking => ToolKind::ModifyBooking,
            PendingActionKind::SelectItinerary => ToolKind::SearchFlights,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            PendingActionKind::BookHotel
            | PendingActionKind::BookFlight
            | PendingActionKind::BookCar => "book",
            PendingActionKind::BookRestaurant => "reserve a table at",
            PendingActionKind::CancelBooking => "cancel",
            PendingActionKind::ModifyBooking => "change",
            PendingActionKind::SelectItinerary => "look up flights to",
        }
    }
}

/// A proposed action waiting for the user's yes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: PendingActionKind,
    pub description: String,
    pub data: SelectedItem,
    /// Arguments captured when the action was proposed (dates, guests).
    #[serde(default)]
    pub args: BTreeMap<String, String>,
}

impl PendingAction {
    pub fn new(kind: PendingActionKind, data: SelectedItem) -> Self {
        let description = format!("{} {}", kind.verb(), data.name());
        Self {
            kind,
            description,
            data,
            args: BTreeMap::new(),
        }
    }

    pub fn with_args(mut self, args: BTreeMap<String, String>) -> Self {
        self.args = args;
        self
    }
}

// =============================================================================
// Tool results
// =============================================================================

/// Domain payload of a tool result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ToolData {
    #[default]
    None,
    Flights(Vec<Flight>),
    Hotels(Vec<Hotel>),
    Restaurants(Vec<Restaurant>),
    Cars(Vec<CarRental>),
    Destinations(Vec<Destination>),
    TripThemes(Vec<TripTheme>),
    Bookings(Vec<Booking>),
    Booking(Booking),
    Cancellation { booking_id: String, cancelled: bool },
    PointsBalance(PointsBalance),
    PointsValuation(PointsValuation),
    PointsBoost(PointsBoost),
    FlightStatus(FlightStatus),
}

/// Uniform envelope around one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool: ToolKind,
    pub success: bool,
    pub data: ToolData,
    pub message: String,
}

impl ToolResult {
    pub fn new(tool: ToolKind, success: bool, data: ToolData, message: impl Into<String>) -> Self {
        Self {
            tool,
            success,
            data,
            message: message.into(),
        }
    }

    pub fn failed(tool: ToolKind, message: impl Into<String>) -> Self {
        Self::new(tool, false, ToolData::None, message)
    }
}

// =============================================================================
// Rich content and messages
// =============================================================================

/// UI-renderable payload attached to an agent message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RichContent {
    Image {
        url: String,
        caption: String,
    },
    HotelCard {
        hotel: Hotel,
        alternatives: Vec<String>,
    },
    RestaurantCard {
        restaurant: Restaurant,
        alternatives: Vec<String>,
    },
    ItineraryThemes {
        themes: Vec<TripTheme>,
    },
    BookingConfirmation {
        booking: Booking,
    },
    Link {
        url: String,
        label: String,
    },
    LoungeCard {
        tier: String,
        lounge_passes: u32,
        points: u64,
    },
    StatusBadge {
        label: String,
        status: String,
    },
    FlightResults {
        flights: Vec<Flight>,
    },
    DestinationResults {
        destinations: Vec<Destination>,
    },
    BookingsList {
        bookings: Vec<Booking>,
    },
    CarRentalResults {
        cars: Vec<CarRental>,
    },
}

impl RichContent {
    /// Wire name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            RichContent::Image { .. } => "image",
            RichContent::HotelCard { .. } => "hotelCard",
            RichContent::RestaurantCard { .. } => "restaurantCard",
            RichContent::ItineraryThemes { .. } => "itineraryThemes",
            RichContent::BookingConfirmation { .. } => "bookingConfirmation",
            RichContent::Link { .. } => "link",
            RichContent::LoungeCard { .. } => "loungeCard",
            RichContent::StatusBadge { .. } => "statusBadge",
            RichContent::FlightResults { .. } => "flightResults",
            RichContent::DestinationResults { .. } => "destinationResults",
            RichContent::BookingsList { .. } => "bookingsList",
            RichContent::CarRentalResults { .. } => "carRentalResults",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_content: Option<RichContent>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::User,
            text: text.into(),
            timestamp: Utc::now(),
            rich_content: None,
        }
    }

    pub fn agent(text: impl Into<String>, rich_content: Option<RichContent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::Agent,
            text: text.into(),
            timestamp: Utc::now(),
            rich_content,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wayfarer_core::types::{BookingKind, BookingStatus, Timestamp};

    fn hotel() -> Hotel {
        Hotel {
            id: "htl-rome-1".to_string(),
            name: "Hotel Artemide".to_string(),
            city: "Rome".to_string(),
            address: "Via Nazionale 22, Rome".to_string(),
            rating: 4.7,
            price_per_night: 210.0,
            amenities: vec!["wifi".to_string()],
            image_url: None,
        }
    }

    // ---- Intent ----

    #[test]
    fn test_intent_serializes_camel_case() {
        let json = serde_json::to_string(&Intent::SearchHotels).unwrap();
        assert_eq!(json, "\"searchHotels\"");
        assert_eq!(Intent::GeneralHelp.to_string(), "generalHelp");
    }

    #[test]
    fn test_intent_domain_helpers() {
        assert_eq!(Intent::search_for(SearchDomain::Car), Intent::SearchCars);
        assert_eq!(Intent::book_for(SearchDomain::Flight), Some(Intent::BookFlight));
        assert_eq!(Intent::book_for(SearchDomain::Destination), None);
        assert_eq!(Intent::CancelBooking.target_domain(), Some(SearchDomain::Booking));
        assert_eq!(Intent::SearchHotels.target_domain(), None);
    }

    // ---- ToolKind ----

    #[test]
    fn test_tool_kind_round_trips_through_str() {
        let tool: ToolKind = "applyPointsBoost".parse().unwrap();
        assert_eq!(tool, ToolKind::ApplyPointsBoost);
        assert_eq!(tool.to_string(), "applyPointsBoost");
        assert!("teleport".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_tool_call_contract_deserializes() {
        let json = r#"{"args":{"location":"Rome","guests":"2"}}"#;
        let params: ToolParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.get("location"), Some("Rome"));
        assert!(params.selection.is_none());
    }

    #[test]
    fn test_tool_params_ignore_blank_args() {
        let params = ToolParams::default().with_arg("location", "  ");
        assert_eq!(params.get("location"), None);
    }

    #[test]
    fn test_selected_item_tagged_union() {
        let item = SelectedItem::Hotel(hotel());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "hotel");
        assert_eq!(value["item"]["name"], "Hotel Artemide");
        assert_eq!(item.domain(), SearchDomain::Hotel);
    }

    // ---- PendingAction ----

    #[test]
    fn test_pending_action_description() {
        let action = PendingAction::new(PendingActionKind::BookHotel, SelectedItem::Hotel(hotel()));
        assert_eq!(action.description, "book Hotel Artemide");
        assert_eq!(action.kind.continuation(), ToolKind::BookHotel);
        assert_eq!(
            PendingActionKind::SelectItinerary.continuation(),
            ToolKind::SearchFlights
        );
    }

    // ---- RichContent / ChatMessage ----

    #[test]
    fn test_rich_content_wire_shape() {
        let rich = RichContent::LoungeCard {
            tier: "Gold".to_string(),
            lounge_passes: 2,
            points: 84_250,
        };
        let value = serde_json::to_value(&rich).unwrap();
        assert_eq!(value["type"], "loungeCard");
        assert_eq!(value["loungePasses"], 2);
        assert_eq!(rich.kind(), "loungeCard");
    }

    #[test]
    fn test_chat_message_wire_shape() {
        let booking = Booking {
            id: "BK-1001".to_string(),
            kind: BookingKind::Hotel,
            item_id: "htl-rome-1".to_string(),
            title: "Hotel Artemide".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(),
            end_date: None,
            guests: 2,
            total_price: 420.0,
            status: BookingStatus::Confirmed,
            created_at: Timestamp(0),
        };
        let msg = ChatMessage::agent(
            "Booked!",
            Some(RichContent::BookingConfirmation { booking }),
        );
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["sender"], "agent");
        assert_eq!(value["richContent"]["type"], "bookingConfirmation");

        let plain = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(plain["sender"], "user");
        assert!(plain.get("richContent").is_none());
    }
}
