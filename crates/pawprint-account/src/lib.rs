//! Pawprint Account - the account page
//!
//! The account record, location suggestions ranked by distance, and the
//! theme borrowed from the stored profile.
//!
//! # Suggestion flow
//!
//! ```text
//! Idle ──detect──► AwaitingPosition ──fix──────► Ranked   (6 nearest)
//!                                   └─failure──► Fallback (first 6)
//! Ranked / Fallback ──select or dismiss──► Idle
//! ```

pub mod account;
pub mod cities;
pub mod geo;
pub mod locate;
pub mod suggest;
pub mod theme;

pub use account::{ACCOUNT_KEY, AccountPayload, AccountRepository, EMAIL_PLACEHOLDER};
pub use cities::{CITIES, City};
pub use geo::{Coordinate, EARTH_RADIUS_KM, SUGGESTION_COUNT, fallback_cities, haversine_km, nearest_cities};
pub use locate::{FixedLocation, LOCATE_TIMEOUT, LocationError, LocationProvider, NoGeolocation, locate_with_timeout};
pub use suggest::{Suggestion, SuggestionState, Suggestions};
pub use theme::AccountTheme;
