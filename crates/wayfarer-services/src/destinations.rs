//! Destination catalogue and themed trip suggestions.

use async_trait::async_trait;
use wayfarer_core::types::{Destination, TripTheme};

use crate::error::ServiceError;
use crate::hotels::slug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationQuery {
    /// City or country name. `None` returns the featured list.
    pub name: Option<String>,
    pub max_results: usize,
}

#[async_trait]
pub trait DestinationService: Send + Sync {
    async fn search(&self, query: &DestinationQuery) -> Result<Vec<Destination>, ServiceError>;

    /// Themed itineraries, preferring those that visit `near` when given.
    async fn suggestions(&self, near: Option<&str>) -> Result<Vec<TripTheme>, ServiceError>;
}

/// (name, country, description, highlights)
static CATALOGUE: &[(&str, &str, &str, &[&str])] = &[
    ("Rome", "Italy", "Ancient ruins, piazzas and world-class food.", &["Colosseum", "Vatican Museums", "Trastevere"]),
    ("Paris", "France", "Boulevards, museums and cafe culture.", &["Louvre", "Eiffel Tower", "Le Marais"]),
    ("Barcelona", "Spain", "Gaudi architecture by the Mediterranean.", &["Sagrada Familia", "Park Guell", "Barceloneta"]),
    ("Tokyo", "Japan", "Neon districts beside quiet temples.", &["Shibuya Crossing", "Senso-ji", "Tsukiji Outer Market"]),
    ("Kyoto", "Japan", "Former imperial capital of shrines and gardens.", &["Fushimi Inari", "Arashiyama", "Gion"]),
    ("Santorini", "Greece", "Whitewashed villages over a volcanic caldera.", &["Oia sunset", "Red Beach", "Fira"]),
    ("Bali", "Indonesia", "Rice terraces, surf and temples.", &["Ubud", "Uluwatu", "Tegallalang"]),
    ("New York", "United States", "Skyline, Broadway and endless neighbourhoods.", &["Central Park", "Brooklyn Bridge", "MoMA"]),
    ("Lisbon", "Portugal", "Hilltop viewpoints and tiled facades.", &["Alfama", "Belem Tower", "LX Factory"]),
    ("Dubai", "United Arab Emirates", "Desert luxury and record-breaking towers.", &["Burj Khalifa", "Old Souk", "Desert safari"]),
];

/// (title, description, destinations, days)
static THEMES: &[(&str, &str, &[&str], u32)] = &[
    ("Mediterranean Escape", "Sun, history and seafood along the coast.", &["Rome", "Barcelona", "Santorini"], 10),
    ("Japan Discovery", "Modern Tokyo paired with traditional Kyoto.", &["Tokyo", "Kyoto"], 8),
    ("European Capitals", "A rail-hopping tour of grand cities.", &["Paris", "London", "Amsterdam", "Berlin"], 12),
    ("Island Hopping", "Beaches and sunsets across three islands.", &["Bali", "Santorini", "Honolulu"], 14),
    ("City Lights", "Skylines and rooftop dining.", &["New York", "Dubai", "Singapore"], 9),
];

#[derive(Default)]
pub struct InMemoryDestinations;

impl InMemoryDestinations {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DestinationService for InMemoryDestinations {
    async fn search(&self, query: &DestinationQuery) -> Result<Vec<Destination>, ServiceError> {
        let needle = query.name.as_ref().map(|n| n.trim().to_lowercase());
        let found = CATALOGUE
            .iter()
            .filter(|(name, country, ..)| match needle.as_deref() {
                Some(n) => name.to_lowercase() == n || country.to_lowercase() == n,
                None => true,
            })
            .take(query.max_results)
            .map(|(name, country, description, highlights)| Destination {
                id: format!("dst-{}", slug(name)),
                name: name.to_string(),
                country: country.to_string(),
                description: description.to_string(),
                highlights: highlights.iter().map(|h| h.to_string()).collect(),
                image_url: Some(format!(
                    "https://images.wayfarer.travel/destinations/{}.jpg",
                    slug(name)
                )),
            })
            .collect();
        Ok(found)
    }

    async fn suggestions(&self, near: Option<&str>) -> Result<Vec<TripTheme>, ServiceError> {
        let all: Vec<TripTheme> = THEMES
            .iter()
            .map(|(title, description, destinations, days)| TripTheme {
                id: format!("theme-{}", slug(title)),
                title: title.to_string(),
                description: description.to_string(),
                destinations: destinations.iter().map(|d| d.to_string()).collect(),
                duration_days: *days,
            })
            .collect();

        let Some(place) = near else {
            return Ok(all);
        };
        let matching: Vec<TripTheme> = all
            .iter()
            .filter(|t| t.destinations.iter().any(|d| d.eq_ignore_ascii_case(place)))
            .cloned()
            .collect();
        if matching.is_empty() {
            Ok(all)
        } else {
            Ok(matching)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_by_name() {
        let found = InMemoryDestinations::new()
            .search(&DestinationQuery {
                name: Some("rome".to_string()),
                max_results: 10,
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Rome");
        assert!(found[0].image_url.is_some());
    }

    #[tokio::test]
    async fn test_search_by_country() {
        let found = InMemoryDestinations::new()
            .search(&DestinationQuery {
                name: Some("Japan".to_string()),
                max_results: 10,
            })
            .await
            .unwrap();
        let names: Vec<&str> = found.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Tokyo", "Kyoto"]);
    }

    #[tokio::test]
    async fn test_search_featured_respects_limit() {
        let found = InMemoryDestinations::new()
            .search(&DestinationQuery {
                name: None,
                max_results: 4,
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 4);
    }

    #[tokio::test]
    async fn test_suggestions_near_destination() {
        let themes = InMemoryDestinations::new()
            .suggestions(Some("santorini"))
            .await
            .unwrap();
        let titles: Vec<&str> = themes.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Mediterranean Escape", "Island Hopping"]);
    }

    #[tokio::test]
    async fn test_suggestions_unknown_place_returns_all() {
        let themes = InMemoryDestinations::new()
            .suggestions(Some("Atlantis"))
            .await
            .unwrap();
        assert_eq!(themes.len(), THEMES.len());
    }
}
