//! Conversation context management.
//!
//! Holds per-conversation state (history, last results by domain, the single
//! pending action, learned preferences), resolves follow-up turns against it,
//! and keeps contexts in an injectable store with idle eviction.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wayfarer_core::config::ChatConfig;
use wayfarer_core::types::{
    Booking, CarRental, Destination, Flight, Hotel, Restaurant, SearchDomain, Timestamp,
};

use crate::error::ChatError;
use crate::types::{ChatMessage, ClassifiedIntent, Entities, EntitySlot, Intent, PendingAction, SelectedItem};

/// Slots remembered as preferences and re-applied to later searches.
const PREFERENCE_SLOTS: [EntitySlot; 3] =
    [EntitySlot::Cuisine, EntitySlot::CabinClass, EntitySlot::Guests];

// =============================================================================
// Search results
// =============================================================================

/// One domain's worth of search results.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResultSet {
    Hotels(Vec<Hotel>),
    Flights(Vec<Flight>),
    Restaurants(Vec<Restaurant>),
    Cars(Vec<CarRental>),
    Destinations(Vec<Destination>),
    Bookings(Vec<Booking>),
}

impl SearchResultSet {
    pub fn domain(&self) -> SearchDomain {
        match self {
            SearchResultSet::Hotels(_) => SearchDomain::Hotel,
            SearchResultSet::Flights(_) => SearchDomain::Flight,
            SearchResultSet::Restaurants(_) => SearchDomain::Restaurant,
            SearchResultSet::Cars(_) => SearchDomain::Car,
            SearchResultSet::Destinations(_) => SearchDomain::Destination,
            SearchResultSet::Bookings(_) => SearchDomain::Booking,
        }
    }
}

/// At most one result list per domain. Recording a domain replaces only
/// that domain's slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastSearchResults {
    pub hotels: Option<Vec<Hotel>>,
    pub flights: Option<Vec<Flight>>,
    pub restaurants: Option<Vec<Restaurant>>,
    pub cars: Option<Vec<CarRental>>,
    pub destinations: Option<Vec<Destination>>,
    pub bookings: Option<Vec<Booking>>,
}

impl LastSearchResults {
    fn len(&self, domain: SearchDomain) -> usize {
        match domain {
            SearchDomain::Hotel => self.hotels.as_ref().map_or(0, Vec::len),
            SearchDomain::Flight => self.flights.as_ref().map_or(0, Vec::len),
            SearchDomain::Restaurant => self.restaurants.as_ref().map_or(0, Vec::len),
            SearchDomain::Car => self.cars.as_ref().map_or(0, Vec::len),
            SearchDomain::Destination => self.destinations.as_ref().map_or(0, Vec::len),
            SearchDomain::Booking => self.bookings.as_ref().map_or(0, Vec::len),
        }
    }
}

// =============================================================================
// ConversationContext
// =============================================================================

/// Mutable state of exactly one conversation. Every operation is total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub id: String,
    pub history: Vec<ChatMessage>,
    pub last_domain: Option<SearchDomain>,
    pub last_results: LastSearchResults,
    pub pending_action: Option<PendingAction>,
    pub user_preferences: BTreeMap<String, String>,
    /// Entities of the last planned turn, carried into follow-ups.
    pub last_entities: Entities,
}

impl ConversationContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            history: Vec::new(),
            last_domain: None,
            last_results: LastSearchResults::default(),
            pending_action: None,
            user_preferences: BTreeMap::new(),
            last_entities: Entities::new(),
        }
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// Store a domain's results and make it the active domain.
    pub fn record_results(&mut self, results: SearchResultSet) {
        self.last_domain = Some(results.domain());
        let slots = &mut self.last_results;
        match results {
            SearchResultSet::Hotels(v) => slots.hotels = Some(v),
            SearchResultSet::Flights(v) => slots.flights = Some(v),
            SearchResultSet::Restaurants(v) => slots.restaurants = Some(v),
            SearchResultSet::Cars(v) => slots.cars = Some(v),
            SearchResultSet::Destinations(v) => slots.destinations = Some(v),
            SearchResultSet::Bookings(v) => slots.bookings = Some(v),
        }
    }

    /// Replace any outstanding pending action.
    pub fn set_pending_action(&mut self, action: PendingAction) {
        self.pending_action = Some(action);
    }

    pub fn take_pending_action(&mut self) -> Option<PendingAction> {
        self.pending_action.take()
    }

    pub fn clear_pending_action(&mut self) {
        self.pending_action = None;
    }

    pub fn has_results(&self, domain: SearchDomain) -> bool {
        self.last_results.len(domain) > 0
    }

    /// Pick an item from prior results. Bookings can be addressed by
    /// reference; otherwise `selection` indexes the list (default: top pick).
    pub fn pick(
        &self,
        domain: SearchDomain,
        selection: Option<usize>,
        booking_ref: Option<&str>,
    ) -> Option<SelectedItem> {
        let index = selection.unwrap_or(0);
        let results = &self.last_results;
        match domain {
            SearchDomain::Hotel => results
                .hotels
                .as_ref()?
                .get(index)
                .cloned()
                .map(SelectedItem::Hotel),
            SearchDomain::Flight => results
                .flights
                .as_ref()?
                .get(index)
                .cloned()
                .map(SelectedItem::Flight),
            SearchDomain::Restaurant => results
                .restaurants
                .as_ref()?
                .get(index)
                .cloned()
                .map(SelectedItem::Restaurant),
            SearchDomain::Car => results
                .cars
                .as_ref()?
                .get(index)
                .cloned()
                .map(SelectedItem::CarRental),
            SearchDomain::Destination => results
                .destinations
                .as_ref()?
                .get(index)
                .cloned()
                .map(SelectedItem::Destination),
            SearchDomain::Booking => {
                let bookings = results.bookings.as_ref()?;
                let found = match booking_ref {
                    Some(reference) => bookings
                        .iter()
                        .find(|b| b.id.eq_ignore_ascii_case(reference)),
                    None => bookings.get(index),
                };
                found.cloned().map(SelectedItem::Booking)
            }
        }
    }

    /// Remember cuisine, cabin class and party size the user mentioned.
    pub fn learn_preferences(&mut self, entities: &Entities) {
        for slot in PREFERENCE_SLOTS {
            if let Some(value) = entities.get(&slot) {
                self.user_preferences
                    .insert(slot.as_str().to_string(), value.clone());
            }
        }
    }

    pub fn preference(&self, slot: EntitySlot) -> Option<&str> {
        self.user_preferences.get(slot.as_str()).map(String::as_str)
    }

    /// Keep a turn's entities for later follow-ups. Ordinals never carry over.
    pub fn remember_entities(&mut self, entities: &Entities) {
        self.last_entities = entities
            .iter()
            .filter(|(slot, _)| **slot != EntitySlot::Selection)
            .map(|(slot, value)| (*slot, value.clone()))
            .collect();
    }
}

// =============================================================================
// FollowUpResolver
// =============================================================================

/// Resolves follow-up turns and fills learned defaults.
pub struct FollowUpResolver;

impl FollowUpResolver {
    /// Turn a bare follow-up ("what about Paris?") into the last domain's
    /// search, carrying the previous turn's entities forward. New entities win.
    pub fn resolve(&self, classified: &mut ClassifiedIntent, context: &ConversationContext) {
        if classified.intent != Intent::FollowUp || classified.entities.is_empty() {
            return;
        }
        let Some(domain) = context.last_domain else {
            return;
        };

        let mut merged = context.last_entities.clone();
        merged.extend(
            classified
                .entities
                .iter()
                .map(|(slot, value)| (*slot, value.clone())),
        );
        classified.intent = Intent::search_for(domain);
        classified.confidence = classified.confidence.max(0.6);
        classified.entities = merged;
    }

    /// Fill cuisine, cabin class and guests from preferences when the turn
    /// leaves them out.
    pub fn apply_preferences(&self, classified: &mut ClassifiedIntent, context: &ConversationContext) {
        if !classified.intent.uses_preferences() {
            return;
        }
        for slot in PREFERENCE_SLOTS {
            if classified.entities.contains_key(&slot) {
                continue;
            }
            if let Some(value) = context.preference(slot) {
                classified.entities.insert(slot, value.to_string());
            }
        }
    }
}

// =============================================================================
// ContextStore
// =============================================================================

/// A context shared with the turn that currently holds it. The async mutex
/// is held for the whole turn, so turns of one conversation never interleave.
pub type SharedContext = Arc<tokio::sync::Mutex<ConversationContext>>;

#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Fetch a conversation, creating it on first use.
    async fn get_or_create(&self, id: &str) -> Result<SharedContext, ChatError>;

    async fn get(&self, id: &str) -> Result<Option<SharedContext>, ChatError>;

    /// Drop a conversation. Returns whether it existed.
    async fn evict(&self, id: &str) -> Result<bool, ChatError>;

    /// Drop every conversation idle past the timeout. Returns how many.
    async fn evict_expired(&self) -> Result<usize, ChatError>;

    async fn len(&self) -> Result<usize, ChatError>;

    async fn is_empty(&self) -> Result<bool, ChatError> {
        Ok(self.len().await? == 0)
    }
}

struct StoreEntry {
    context: SharedContext,
    last_active: Timestamp,
    /// Access order; the smallest is the least recently active.
    seq: u64,
}

impl StoreEntry {
    /// A turn keeps its own handle on the context from `get_or_create`
    /// until it finishes, so any extra handle or a held lock means a turn
    /// is in flight.
    fn in_use(&self) -> bool {
        Arc::strong_count(&self.context) > 1 || self.context.try_lock().is_err()
    }
}

#[derive(Default)]
struct StoreState {
    entries: HashMap<String, StoreEntry>,
    next_seq: u64,
}

/// In-memory store with idle timeout and a conversation cap (LRU).
pub struct InMemoryContextStore {
    state: Mutex<StoreState>,
    ttl_secs: i64,
    max_conversations: usize,
}

impl InMemoryContextStore {
    pub fn new(ttl: Duration, max_conversations: usize) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            max_conversations: max_conversations.max(1),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(
            Duration::from_secs(u64::from(config.session_timeout_minutes) * 60),
            config.max_conversations,
        )
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreState>, ChatError> {
        self.state
            .lock()
            .map_err(|e| ChatError::ContextStore(format!("store lock poisoned: {}", e)))
    }

    fn is_expired(&self, entry: &StoreEntry) -> bool {
        entry.last_active.age_secs() >= self.ttl_secs
    }

    /// Idle entries go; entries a turn is still holding stay.
    fn remove_expired(&self, state: &mut StoreState) -> usize {
        let before = state.entries.len();
        state
            .entries
            .retain(|_, entry| entry.in_use() || !self.is_expired(entry));
        before - state.entries.len()
    }
}

#[async_trait]
impl ContextStore for InMemoryContextStore {
    async fn get_or_create(&self, id: &str) -> Result<SharedContext, ChatError> {
        let mut state = self.lock()?;
        state.next_seq += 1;
        let seq = state.next_seq;

        if let Some(entry) = state.entries.get_mut(id) {
            entry.last_active = Timestamp::now();
            entry.seq = seq;
            return Ok(entry.context.clone());
        }

        if state.entries.len() >= self.max_conversations {
            let expired = self.remove_expired(&mut state);
            if expired > 0 {
                info!(expired, "Evicted idle conversations");
            }
        }
        if state.entries.len() >= self.max_conversations {
            let oldest = state
                .entries
                .iter()
                .filter(|(_, entry)| !entry.in_use())
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    state.entries.remove(&key);
                    info!(conversation = %key, "Evicted least recently active conversation");
                }
                None => warn!(
                    conversations = state.entries.len(),
                    "Every conversation is busy, growing past the cap"
                ),
            }
        }

        let context = Arc::new(tokio::sync::Mutex::new(ConversationContext::new(id)));
        state.entries.insert(
            id.to_string(),
            StoreEntry {
                context: context.clone(),
                last_active: Timestamp::now(),
                seq,
            },
        );
        Ok(context)
    }

    async fn get(&self, id: &str) -> Result<Option<SharedContext>, ChatError> {
        let state = self.lock()?;
        Ok(state.entries.get(id).map(|entry| entry.context.clone()))
    }

    async fn evict(&self, id: &str) -> Result<bool, ChatError> {
        let removed = self.lock()?.entries.remove(id).is_some();
        if removed {
            info!(conversation = %id, "Evicted conversation");
        }
        Ok(removed)
    }

    async fn evict_expired(&self) -> Result<usize, ChatError> {
        let mut state = self.lock()?;
        let expired = self.remove_expired(&mut state);
        if expired > 0 {
            info!(expired, "Evicted idle conversations");
        }
        Ok(expired)
    }

    async fn len(&self) -> Result<usize, ChatError> {
        Ok(self.lock()?.entries.len())
    }
}

// =============================================================================
// Tests
// =============================================================================
