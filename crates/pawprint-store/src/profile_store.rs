//! Profile persistence
//!
//! Reads never fail: a missing, unreadable or partly invalid record still
//! produces a usable profile. Writes report failure so the caller can tell
//! the user.

use crate::store::{KeyValueStore, StoreError};
use pawprint_core::{LoadReport, Profile};
use tracing::{debug, error, warn};

/// Storage key of the profile record
pub const PROFILE_KEY: &str = "avatar_components_v1";

/// Loads and saves the profile record
#[derive(Debug, Clone)]
pub struct ProfileRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the stored profile merged into defaults
    pub fn load(&self) -> (Profile, LoadReport) {
        let raw = match self.store.get(PROFILE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored profile, using defaults");
                return (Profile::default(), LoadReport::default());
            }
            Err(e) => {
                warn!(error = %e, "Profile storage unavailable, using defaults");
                return (Profile::default(), LoadReport::unreadable(e.to_string()));
            }
        };

        let (profile, report) = Profile::from_record(&raw);
        if let Some(reason) = &report.unreadable {
            warn!(%reason, "Stored profile unreadable, using defaults");
        }
        for rejection in &report.rejected {
            warn!(field = rejection.field, reason = %rejection.reason, "Ignoring stored profile field");
        }
        debug!(accepted = report.accepted.len(), "Loaded profile");

        (profile, report)
    }

    /// Write the whole profile record
    pub fn save(&mut self, profile: &Profile) -> Result<(), StoreError> {
        let record = profile.to_record()?;
        self.store.set(PROFILE_KEY, &record).inspect_err(|e| {
            error!(error = %e, "Failed to save profile");
        })?;
        debug!(bytes = record.len(), "Saved profile");
        Ok(())
    }
}
