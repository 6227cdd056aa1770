//! Pawprint Store - persistence adapter
//!
//! Records are stored as JSON strings under fixed keys, the same shape a
//! browser's `localStorage` would hold. Backends implement
//! [`KeyValueStore`]; repositories on top turn records into domain types
//! and never let a bad record take the caller down.
//!
//! # Write path
//!
//! ```text
//! click / randomize ──► ProfileSession ──► Debouncer ──flush──► store
//! text edit ──────────► ProfileSession ──► Debouncer ──420ms──► store
//! ```
//!
//! All writes funnel through one debouncer task, so they land in order.

pub mod debounce;
pub mod profile_store;
pub mod session;
pub mod store;

pub use debounce::Debouncer;
pub use profile_store::{PROFILE_KEY, ProfileRepository};
pub use session::{ProfileSession, SessionError};
pub use store::{FileStore, KeyValueStore, MemoryStore, SharedStore, StoreError};
