//! Position sources
//!
//! A provider answers one position request. Callers bound the wait with
//! [`locate_with_timeout`]; every way of not getting a fix maps to a
//! [`LocationError`] and the suggestion flow falls back on any of them.

use crate::geo::Coordinate;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default bound on a position request
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(8);

/// Ways a position request can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    Denied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),

    #[error("No position within {0:?}")]
    Timeout(Duration),

    #[error("Geolocation not supported")]
    Unsupported,
}

/// Something that can report where the user is
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the capability exists at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Request the current position
    async fn current_position(&self) -> Result<Coordinate, LocationError>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Ask `provider` for a position, giving up after `timeout`
pub async fn locate_with_timeout(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> Result<Coordinate, LocationError> {
    if !provider.is_supported() {
        return Err(LocationError::Unsupported);
    }

    let result = match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout(timeout)),
    };

    match &result {
        Ok(position) => debug!(provider = provider.name(), ?position, "Got position"),
        Err(e) => warn!(provider = provider.name(), error = %e, "No position"),
    }
    result
}

/// A provider that always reports the same position, or the same failure
#[derive(Debug, Clone)]
pub struct FixedLocation {
    result: Result<Coordinate, LocationError>,
    delay: Duration,
}

impl FixedLocation {
    pub fn new(position: Coordinate) -> Self {
        Self {
            result: Ok(position),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(error: LocationError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
        }
    }

    /// Answer only after `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.result {
            Ok(position) if !position.is_valid() => Err(LocationError::Unavailable(format!(
                "invalid coordinate {}, {}",
                position.lat, position.lon
            ))),
            other => other.clone(),
        }
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Stand-in for an environment with no geolocation at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl LocationProvider for NoGeolocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unsupported)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
