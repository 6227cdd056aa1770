//! Editing session for the avatar page
//!
//! Owns the in-memory profile and keeps the store in step with it. Frame
//! picks, clears and randomize are written right away; text and color
//! edits go through the debouncer. Every write passes through the same
//! task, so an older pending snapshot can never land after a newer one.

use crate::debounce::Debouncer;
use crate::profile_store::ProfileRepository;
use crate::store::{KeyValueStore, StoreError};
use pawprint_core::{Category, LoadReport, Notice, Profile, SelectionError};
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The change is applied in memory but could not be written
    #[error("Change not saved: {0}")]
    Store(#[from] StoreError),
}

/// A loaded profile plus its write path
pub struct ProfileSession {
    profile: Profile,
    report: LoadReport,
    writer: Debouncer<Profile, StoreError>,
}

impl ProfileSession {
    /// Load the profile and start the writer. Must be called inside a
    /// tokio runtime.
    pub fn open<S>(store: S, debounce: Duration) -> Self
    where
        S: KeyValueStore + Send + 'static,
    {
        let mut repo = ProfileRepository::new(store);
        let (profile, report) = repo.load();
        let writer = Debouncer::spawn(debounce, move |profile: Profile| repo.save(&profile));

        debug!(clean = report.is_clean(), "Opened profile session");
        Self {
            profile,
            report,
            writer,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// What happened while loading the stored record
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Select a frame by its global index and save
    pub async fn select_frame(&mut self, index: u32) -> Result<Category, SessionError> {
        let category = self.profile.selection.select_frame(index)?;
        self.commit().await?;
        Ok(category)
    }

    /// Select a frame within a category and save
    pub async fn set(&mut self, category: Category, index: u32) -> Result<(), SessionError> {
        self.profile.selection.set(category, index)?;
        self.commit().await?;
        Ok(())
    }

    /// Empty a slot and save
    pub async fn clear(&mut self, category: Category) -> Result<(), SessionError> {
        self.profile.selection.clear(category);
        self.commit().await?;
        Ok(())
    }

    /// Randomize every slot and save
    pub async fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        self.profile.selection.randomize(rng);
        info!(selection = ?self.profile.selection, "Randomized avatar");
        self.commit().await?;
        Ok(())
    }

    pub fn set_nick(&mut self, nick: &str) {
        self.profile.set_nick(nick);
        self.touch();
    }

    pub fn set_about(&mut self, about: &str) {
        self.profile.set_about(about);
        self.touch();
    }

    pub fn set_pronouns(&mut self, pronouns: &str) {
        self.profile.pronouns = pronouns.to_string();
        self.touch();
    }

    pub fn set_accent(&mut self, accent: &str) {
        self.profile.accent = accent.to_string();
        self.touch();
    }

    pub fn set_bg_color(&mut self, bg_color: &str) {
        self.profile.bg_color = bg_color.to_string();
        self.touch();
    }

    /// Explicit save, answered with the notice to show
    pub async fn save(&mut self) -> Notice {
        match self.commit().await {
            Ok(()) => Notice::ProfileSaved,
            Err(_) => Notice::SaveFailed,
        }
    }

    /// Write anything pending and stop the writer
    pub async fn close(self) -> Profile {
        let writes = self.writer.shutdown().await;
        debug!(writes, "Closed profile session");
        self.profile
    }

    fn touch(&self) {
        self.writer.push(self.profile.clone());
    }

    async fn commit(&self) -> Result<(), StoreError> {
        self.touch();
        self.writer.flush().await
    }
}
