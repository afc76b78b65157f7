//! Rule-based intent and entity extraction.
//!
//! Classifies a raw user message into an [`Intent`] with a confidence score
//! and pulls typed entities (location, date, guests, cuisine, cabin class,
//! airport codes, flight numbers, booking references, ordinal selections)
//! out of the text. Classification is a pure function of the text, the
//! context snapshot and the gazetteer.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use wayfarer_core::types::SearchDomain;

use crate::context::ConversationContext;
use crate::types::{ClassifiedIntent, Entities, EntitySlot, Intent};

// =============================================================================
// Compiled regex sets (compiled once, reused across calls)
// =============================================================================

struct PhrasePatterns {
    greeting: Regex,
    confirmation: Regex,
    rejection: Regex,
    help: Regex,
    /// Confirms only when something is pending.
    contextual_confirmation: Regex,
}

static PHRASES: LazyLock<PhrasePatterns> = LazyLock::new(|| PhrasePatterns {
    greeting: Regex::new(
        r"^(?:hello|hi|hiya|hey|howdy|greetings|good\s+(?:morning|afternoon|evening))\b",
    )
    .expect("Invalid greeting regex"),
    confirmation: Regex::new(
        r"\b(?:yes|yeah|yep|yup|sure|ok|okay|confirm|book\s+it|go\s+ahead|do\s+it|sounds\s+good|that\s+works|let'?s\s+do\s+it)\b",
    )
    .expect("Invalid confirmation regex"),
    rejection: Regex::new(
        r"\b(?:no|nope|nah|something\s+else|not\s+that|cancel\s+that|different\s+(?:one|option)|other\s+options|never\s*mind)\b",
    )
    .expect("Invalid rejection regex"),
    help: Regex::new(
        r"^(?:help|help\s+me|i\s+need\s+help|can\s+you\s+help(?:\s+me)?|what\s+can\s+you\s+do|how\s+does\s+this\s+work)[\s.!?]*$",
    )
    .expect("Invalid help regex"),
    contextual_confirmation: Regex::new(
        r"\b(?:that\s+one|i'?ll\s+take\s+it|reserve\s+it|go\s+with\s+(?:it|that)|that'?s\s+the\s+one)\b",
    )
    .expect("Invalid contextual confirmation regex"),
});

struct CuePatterns {
    book: Regex,
    status: Regex,
    maximize: Regex,
    cancel: Regex,
    modify: Regex,
    plan: Regex,
    suggest: Regex,
}

static CUES: LazyLock<CuePatterns> = LazyLock::new(|| CuePatterns {
    book: Regex::new(r"\b(?:book|reserve|get\s+me|grab)\b").expect("Invalid cue regex"),
    status: Regex::new(r"\b(?:status|delayed?|on\s+time|departing|gate)\b")
        .expect("Invalid cue regex"),
    maximize: Regex::new(r"\b(?:maximi[sz]e|boost|best\s+use|most\s+out\s+of|optimi[sz]e)\b")
        .expect("Invalid cue regex"),
    cancel: Regex::new(r"\bcancel").expect("Invalid cue regex"),
    modify: Regex::new(r"\b(?:modify|change|reschedule|move|update)\b")
        .expect("Invalid cue regex"),
    plan: Regex::new(r"\bplan").expect("Invalid cue regex"),
    suggest: Regex::new(r"\b(?:suggest|suggestions?|ideas?|inspiration|inspire|recommend)")
        .expect("Invalid cue regex"),
});

// Date expressions, in priority order.
const MONTHS: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

struct DatePatterns {
    month_day: Regex,
    day_month: Regex,
    iso: Regex,
    numeric: Regex,
    relative: Regex,
    simple: Regex,
}

static DATES: LazyLock<DatePatterns> = LazyLock::new(|| DatePatterns {
    month_day: Regex::new(&format!(r"\b{}\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b", MONTHS))
        .expect("Invalid date regex"),
    day_month: Regex::new(&format!(r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{}\b", MONTHS))
        .expect("Invalid date regex"),
    iso: Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("Invalid date regex"),
    numeric: Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").expect("Invalid date regex"),
    relative: Regex::new(
        r"\bnext\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday|weekend|week|month)\b",
    )
    .expect("Invalid date regex"),
    simple: Regex::new(r"\b(today|tonight|tomorrow|this\s+weekend)\b").expect("Invalid date regex"),
});

static GUESTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d{1,2})\s+(?:guests?|people|persons?|travell?ers?|pax|adults?|passengers?)\b",
    )
    .expect("Invalid guests regex")
});

static PARTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bparty\s+of\s+(\d{1,2})\b").expect("Invalid guests regex"));

static AIRPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{3})\b").expect("Invalid airport regex"));

static FLIGHT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-z]{2}\d{2,4})\b").expect("Invalid flight id regex"));

static BOOKING_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bbk-?(\d{3,})\b").expect("Invalid booking ref regex"));

static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(first|second|third|fourth|fifth|1st|2nd|3rd|4th|5th)\s+(?:one|option|choice|hotel|flight|restaurant|car|booking|result|place)\b",
    )
    .expect("Invalid ordinal regex")
});

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:#|\b(?:number|option)\s+)(\d{1,2})\b").expect("Invalid ordinal regex")
});

/// Uppercase words that look like airport codes but are not.
static NOT_AIRPORTS: &[&str] = &[
    "THE", "AND", "FOR", "YOU", "USA", "ANY", "CAN", "NOT", "BUT", "ALL", "ARE", "GET", "HEY",
];

static CUISINES: &[&str] = &[
    "italian", "japanese", "french", "mexican", "indian", "thai", "chinese", "seafood",
    "steakhouse", "vegetarian", "spanish", "greek",
];

/// (phrase, canonical cabin)
static CABINS: &[(&str, &str)] = &[
    ("premium economy", "premium economy"),
    ("first class", "first"),
    ("business class", "business"),
    ("economy", "economy"),
    ("coach", "economy"),
];

static CUISINE_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CUISINES
        .iter()
        .map(|c| (*c, Regex::new(&format!(r"\b{}\b", c)).expect("Invalid cuisine regex")))
        .collect()
});

static CABIN_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CABINS
        .iter()
        .map(|(phrase, canonical)| {
            (
                *canonical,
                Regex::new(&format!(r"\b{}\b", phrase)).expect("Invalid cabin regex"),
            )
        })
        .collect()
});

// =============================================================================
// Domain scoring
// =============================================================================

/// Scoring buckets, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Flight,
    Hotel,
    Restaurant,
    Car,
    Points,
    Booking,
    Trip,
    Benefits,
}

static KEYWORDS: &[(Domain, &[(&str, f32)])] = &[
    (
        Domain::Flight,
        &[
            ("flight", 2.0),
            ("fly", 1.5),
            ("plane", 1.5),
            ("airline", 1.5),
            ("delay", 1.5),
            ("on time", 1.5),
            ("airport", 1.0),
            ("depart", 1.0),
            ("one way", 1.0),
            ("round trip", 1.0),
        ],
    ),
    (
        Domain::Hotel,
        &[
            ("hotel", 2.0),
            ("accommodation", 2.0),
            ("lodging", 2.0),
            ("hostel", 2.0),
            ("motel", 2.0),
            ("stay", 1.5),
            ("room", 1.5),
            ("resort", 1.5),
            ("suite", 1.0),
            ("check in", 1.0),
        ],
    ),
    (
        Domain::Restaurant,
        &[
            ("restaurant", 2.0),
            ("dinner", 1.5),
            ("lunch", 1.5),
            ("eating", 1.5),
            ("to eat", 1.5),
            ("dining", 1.5),
            ("cuisine", 1.5),
            ("food", 1.0),
            ("a table", 1.0),
            ("table for", 1.0),
        ],
    ),
    (
        Domain::Car,
        &[
            ("car", 2.0),
            ("rental", 1.5),
            ("vehicle", 1.5),
            ("suv", 1.5),
            ("drive", 1.0),
        ],
    ),
    (
        Domain::Points,
        &[
            ("points", 2.0),
            ("miles", 1.5),
            ("balance", 1.5),
            ("rewards", 1.5),
            ("redeem", 1.5),
            ("loyalty", 1.0),
            ("maximize", 1.0),
            ("boost", 1.0),
        ],
    ),
    (
        Domain::Booking,
        &[
            ("booking", 2.0),
            ("reservation", 2.0),
            ("cancel", 2.5),
            ("modify", 2.5),
            ("reschedule", 2.0),
            ("upcoming", 1.5),
            ("change", 1.0),
        ],
    ),
    (
        Domain::Trip,
        &[
            ("trip", 2.0),
            ("vacation", 2.0),
            ("holiday", 2.0),
            ("destination", 1.5),
            ("getaway", 1.5),
            ("explore", 1.5),
            ("inspiration", 1.5),
            ("travel", 1.0),
            ("plan", 1.0),
            ("suggest", 1.0),
            ("ideas", 1.0),
        ],
    ),
    (
        Domain::Benefits,
        &[
            ("benefits", 2.0),
            ("perks", 2.0),
            ("lounge", 2.0),
            ("tier", 1.5),
            ("membership", 1.5),
            ("elite", 1.5),
            ("status", 1.0),
        ],
    ),
];

/// Score every domain against normalized text: the sum of the weights of
/// its keywords that occur anywhere in it.
fn score_domains(lower: &str) -> Vec<(Domain, f32)> {
    KEYWORDS
        .iter()
        .map(|(domain, words)| {
            let score: f32 = words
                .iter()
                .filter(|(word, _)| lower.contains(word))
                .map(|(_, weight)| weight)
                .sum();
            (*domain, score)
        })
        .collect()
}

/// Strictly highest nonzero score; ties go to the earlier domain.
fn best_domain(scores: &[(Domain, f32)]) -> Option<(Domain, f32)> {
    let mut best: Option<(Domain, f32)> = None;
    for &(domain, score) in scores {
        if score <= 0.0 {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((domain, score)),
        }
    }
    best
}

// =============================================================================
// IntentClassifier
// =============================================================================

/// Rule-based intent classifier and entity extractor.
pub struct IntentClassifier {
    gazetteer: Vec<(String, Regex)>,
}

impl IntentClassifier {
    /// Create a classifier recognising the given destination names.
    pub fn new(destinations: &[String]) -> Self {
        let gazetteer = destinations
            .iter()
            .filter(|d| !d.trim().is_empty())
            .filter_map(|d| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(d.trim()));
                Regex::new(&pattern).ok().map(|re| (d.trim().to_string(), re))
            })
            .collect();
        Self { gazetteer }
    }

    // -----------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------

    /// Classify a message, optionally informed by the conversation so far.
    pub fn classify(&self, text: &str, context: Option<&ConversationContext>) -> ClassifiedIntent {
        let lower = text.trim().to_lowercase();
        let entities = self.extract_entities(text);
        let phrases = &*PHRASES;

        // Fast paths, in priority order
        if phrases.greeting.is_match(&lower) && lower.chars().count() < 30 {
            return ClassifiedIntent::new(Intent::Greeting, 0.95, entities);
        }
        if phrases.confirmation.is_match(&lower) {
            return ClassifiedIntent::new(Intent::Confirmation, 0.9, entities);
        }
        if phrases.rejection.is_match(&lower) {
            return ClassifiedIntent::new(Intent::Rejection, 0.9, entities);
        }
        if phrases.help.is_match(&lower) {
            return ClassifiedIntent::new(Intent::GeneralHelp, 0.85, entities);
        }

        // Context-aware confirmation
        let last_domain = context.and_then(|c| c.last_domain);
        let has_pending = context.is_some_and(|c| c.pending_action.is_some());
        if has_pending && last_domain.is_some() && phrases.contextual_confirmation.is_match(&lower)
        {
            return ClassifiedIntent::new(Intent::Confirmation, 0.9, entities);
        }

        let scores = score_domains(&lower);
        let Some((domain, score)) = best_domain(&scores) else {
            // "book the second one" right after a search
            if let Some(domain) = last_domain {
                if CUES.book.is_match(&lower) {
                    if let Some(intent) = Intent::book_for(domain) {
                        return ClassifiedIntent::new(intent, 0.6, entities);
                    }
                }
            }
            if lower.chars().count() < 3 {
                return ClassifiedIntent::new(Intent::GeneralHelp, 0.3, entities);
            }
            return ClassifiedIntent::new(Intent::FollowUp, 0.4, entities);
        };

        let intent = self.map_intent(domain, &lower, &entities, context);
        let confidence = (score / 3.0).min(1.0);
        ClassifiedIntent::new(intent, confidence, entities)
    }

    /// Map a winning domain plus action cues to a concrete intent.
    fn map_intent(
        &self,
        domain: Domain,
        lower: &str,
        entities: &Entities,
        context: Option<&ConversationContext>,
    ) -> Intent {
        let cues = &*CUES;
        let wants_booking = cues.book.is_match(lower);
        match domain {
            Domain::Flight => {
                if cues.status.is_match(lower) || entities.contains_key(&EntitySlot::FlightId) {
                    Intent::GetFlightStatus
                } else if wants_booking
                    && (entities.contains_key(&EntitySlot::Location)
                        || entities.contains_key(&EntitySlot::DestinationAirport)
                        || context.is_some_and(|c| c.has_results(SearchDomain::Flight)))
                {
                    Intent::BookFlight
                } else {
                    Intent::SearchFlights
                }
            }
            Domain::Hotel if wants_booking => Intent::BookHotel,
            Domain::Hotel => Intent::SearchHotels,
            Domain::Restaurant if wants_booking => Intent::BookRestaurant,
            Domain::Restaurant => Intent::SearchRestaurants,
            Domain::Car if wants_booking => Intent::BookCar,
            Domain::Car => Intent::SearchCars,
            Domain::Points if cues.maximize.is_match(lower) => Intent::MaximizePoints,
            Domain::Points => Intent::CheckPoints,
            Domain::Booking if cues.cancel.is_match(lower) => Intent::CancelBooking,
            Domain::Booking if cues.modify.is_match(lower) => Intent::ModifyBooking,
            Domain::Booking => Intent::CheckBookings,
            Domain::Trip if cues.plan.is_match(lower) => Intent::PlanTrip,
            Domain::Trip if cues.suggest.is_match(lower) => Intent::GetTripSuggestions,
            Domain::Trip => Intent::SearchDestinations,
            Domain::Benefits => Intent::CheckBenefits,
        }
    }

    // -----------------------------------------------------------------
    // Entity extraction
    // -----------------------------------------------------------------

    /// Extract every recognisable entity from the text. Missing entities
    /// are simply absent from the map.
    pub fn extract_entities(&self, text: &str) -> Entities {
        let lower = text.trim().to_lowercase();
        let mut entities = Entities::new();

        if let Some(location) = self.extract_location(&lower) {
            entities.insert(EntitySlot::Location, location);
        }
        if let Some(date) = extract_date(&lower) {
            entities.insert(EntitySlot::Date, date);
        }
        if let Some(guests) = extract_guests(&lower) {
            entities.insert(EntitySlot::Guests, guests);
        }
        if let Some((cuisine, _)) = CUISINE_RES.iter().find(|(_, re)| re.is_match(&lower)) {
            entities.insert(EntitySlot::Cuisine, cuisine.to_string());
        }
        if let Some((cabin, _)) = CABIN_RES.iter().find(|(_, re)| re.is_match(&lower)) {
            entities.insert(EntitySlot::CabinClass, cabin.to_string());
        }

        let airports = extract_airports(text);
        match airports.as_slice() {
            [] => {}
            [only] => {
                entities.insert(EntitySlot::OriginAirport, only.clone());
            }
            [origin, destination, ..] => {
                entities.insert(EntitySlot::OriginAirport, origin.clone());
                entities.insert(EntitySlot::DestinationAirport, destination.clone());
            }
        }

        if let Some(caps) = BOOKING_REF_RE.captures(&lower) {
            entities.insert(EntitySlot::BookingRef, format!("BK-{}", &caps[1]));
        }
        if let Some(flight_id) = FLIGHT_ID_RE
            .captures_iter(&lower)
            .map(|caps| caps[1].to_uppercase())
            .find(|id| !id.starts_with("BK"))
        {
            entities.insert(EntitySlot::FlightId, flight_id);
        }
        if let Some(index) = extract_selection(&lower) {
            entities.insert(EntitySlot::Selection, index.to_string());
        }

        entities
    }

    /// Earliest gazetteer match in the text, in its canonical spelling.
    /// When two names start at the same place the longer one wins.
    fn extract_location(&self, lower: &str) -> Option<String> {
        self.gazetteer
            .iter()
            .filter_map(|(name, re)| re.find(lower).map(|m| (m.start(), m.len(), name)))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
            .map(|(_, _, name)| name.clone())
    }
}

fn extract_date(lower: &str) -> Option<String> {
    let dates = &*DATES;
    [
        &dates.month_day,
        &dates.day_month,
        &dates.iso,
        &dates.numeric,
        &dates.relative,
        &dates.simple,
    ]
    .iter()
    .find_map(|re| re.find(lower))
    .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
}

fn extract_guests(lower: &str) -> Option<String> {
    GUESTS_RE
        .captures(lower)
        .or_else(|| PARTY_RE.captures(lower))
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|n| *n > 0)
        .map(|n| n.to_string())
}

fn extract_airports(text: &str) -> Vec<String> {
    AIRPORT_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .filter(|code| !NOT_AIRPORTS.contains(&code.as_str()))
        .take(2)
        .collect()
}

fn extract_selection(lower: &str) -> Option<usize> {
    if let Some(caps) = ORDINAL_RE.captures(lower) {
        let index = match &caps[1] {
            "first" | "1st" => 0,
            "second" | "2nd" => 1,
            "third" | "3rd" => 2,
            "fourth" | "4th" => 3,
            _ => 4,
        };
        return Some(index);
    }
    NUMBERED_RE
        .captures(lower)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map(|n| n - 1)
}

// =============================================================================
// Date resolution
// =============================================================================

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_named(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next occurrence of `target` strictly after `today`.
fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let ahead = (target.num_days_from_monday() as i64 - today.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    today + Duration::days(if ahead == 0 { 7 } else { ahead })
}

/// Month-day without a year: this year, or next year if already past.
fn upcoming(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if this_year >= today {
        Some(this_year)
    } else {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    }
}

/// Resolve a date expression (as produced by entity extraction) against
/// `today`. Returns `None` for unrecognised or impossible dates.
pub fn resolve_date(expr: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = expr.trim().to_lowercase();
    let dates = &*DATES;

    if let Some(caps) = dates.iso.captures(&lower) {
        return NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?);
    }
    if let Some(caps) = dates.month_day.captures(&lower) {
        return upcoming(today, month_number(&caps[1])?, caps[2].parse().ok()?);
    }
    if let Some(caps) = dates.day_month.captures(&lower) {
        return upcoming(today, month_number(&caps[2])?, caps[1].parse().ok()?);
    }
    if let Some(caps) = dates.numeric.captures(&lower) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        return match caps.get(3) {
            Some(year) => {
                let mut year: i32 = year.as_str().parse().ok()?;
                if year < 100 {
                    year += 2000;
                }
                NaiveDate::from_ymd_opt(year, month, day)
            }
            None => upcoming(today, month, day),
        };
    }
    if let Some(caps) = dates.relative.captures(&lower) {
        let unit = &caps[1];
        return match unit {
            "week" => Some(next_weekday(today, Weekday::Mon)),
            "weekend" => Some(this_weekend(today) + Duration::days(7)),
            "month" => {
                let (year, month) = if today.month() == 12 {
                    (today.year() + 1, 1)
                } else {
                    (today.year(), today.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
            }
            day => weekday_named(day).map(|wd| next_weekday(today, wd)),
        };
    }
    if let Some(caps) = dates.simple.captures(&lower) {
        return match &caps[1] {
            "today" | "tonight" => Some(today),
            "tomorrow" => Some(today + Duration::days(1)),
            _ => Some(this_weekend(today)),
        };
    }
    None
}

/// Saturday of the current weekend (today on Saturday, yesterday on Sunday).
fn this_weekend(today: NaiveDate) -> NaiveDate {
    match today.weekday() {
        Weekday::Sat => today,
        Weekday::Sun => today - Duration::days(1),
        _ => next_weekday(today, Weekday::Sat),
    }
}

// =============================================================================
// Tests
// =============================================================================
