//! Location suggestion list

use crate::account::{AccountPayload, AccountRepository};
use crate::cities::{CITIES, City};
use crate::geo::{Coordinate, SUGGESTION_COUNT, fallback_cities, nearest_cities};
use crate::locate::{LocationError, LocationProvider, locate_with_timeout};
use pawprint_core::Notice;
use pawprint_store::KeyValueStore;
use std::time::Duration;
use tracing::{debug, info};

/// One row of the list
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub city: City,
    /// Known only when the list was ranked from a position
    pub distance_km: Option<f64>,
}

impl Suggestion {
    pub fn label(&self) -> String {
        self.city.label()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SuggestionState {
    /// List hidden
    #[default]
    Idle,
    /// Waiting for a position
    AwaitingPosition,
    /// Nearest cities, closest first
    Ranked(Vec<Suggestion>),
    /// Head of the city list when no position is available
    Fallback(Vec<Suggestion>),
}

/// Drives the list from detect request to chosen city
#[derive(Debug, Clone)]
pub struct Suggestions {
    cities: Vec<City>,
    state: SuggestionState,
}

impl Default for Suggestions {
    fn default() -> Self {
        Self::new(CITIES.to_vec())
    }
}

impl Suggestions {
    pub fn new(cities: Vec<City>) -> Self {
        Self {
            cities,
            state: SuggestionState::Idle,
        }
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    /// Rows currently shown; empty unless the list is open
    pub fn items(&self) -> &[Suggestion] {
        match &self.state {
            SuggestionState::Ranked(items) | SuggestionState::Fallback(items) => items,
            _ => &[],
        }
    }

    pub fn is_open(&self) -> bool {
        !self.items().is_empty()
    }

    /// Start a lookup. Without the capability the user is told so and the
    /// head of the list is shown right away.
    pub fn begin(&mut self, supported: bool) -> Notice {
        if !supported {
            self.show_fallback();
            return Notice::GeolocationUnsupported;
        }
        self.state = SuggestionState::AwaitingPosition;
        Notice::DetectingLocation
    }

    /// A position arrived. Ignored unless a lookup is in flight.
    pub fn position_found(&mut self, position: Coordinate) -> bool {
        if self.state != SuggestionState::AwaitingPosition {
            debug!("Position arrived with no lookup pending");
            return false;
        }
        let ranked = nearest_cities(position, &self.cities, SUGGESTION_COUNT)
            .into_iter()
            .map(|(city, d)| Suggestion {
                city: *city,
                distance_km: Some(d),
            })
            .collect();
        self.state = SuggestionState::Ranked(ranked);
        true
    }

    /// The lookup failed; show the head of the list instead
    pub fn position_failed(&mut self, error: &LocationError) -> Notice {
        debug!(%error, "Falling back to default cities");
        self.show_fallback();
        Notice::LocationUnavailable
    }

    fn show_fallback(&mut self) {
        let fallback = fallback_cities(&self.cities, SUGGESTION_COUNT)
            .iter()
            .map(|city| Suggestion {
                city: *city,
                distance_km: None,
            })
            .collect();
        self.state = SuggestionState::Fallback(fallback);
    }

    /// Click outside the list
    pub fn dismiss(&mut self) {
        self.state = SuggestionState::Idle;
    }

    /// Run a whole lookup against `provider`, returning the notices shown
    /// along the way
    pub async fn detect(&mut self, provider: &dyn LocationProvider, timeout: Duration) -> Vec<Notice> {
        let mut notices = vec![self.begin(provider.is_supported())];
        if self.state != SuggestionState::AwaitingPosition {
            return notices;
        }

        match locate_with_timeout(provider, timeout).await {
            Ok(position) => {
                self.position_found(position);
            }
            Err(e) => notices.push(self.position_failed(&e)),
        }
        notices
    }

    /// Pick row `index`: the account location becomes its label, the list
    /// closes and the account is saved. `None` when no such row is shown.
    pub fn choose<S: KeyValueStore>(
        &mut self,
        index: usize,
        account: &mut AccountPayload,
        repo: &mut AccountRepository<S>,
    ) -> Option<Notice> {
        let suggestion = self.items().get(index)?.clone();
        account.location = suggestion.label();
        self.state = SuggestionState::Idle;
        info!(location = %account.location, "Chose suggested location");
        Some(repo.save_with_notice(account))
    }
}
