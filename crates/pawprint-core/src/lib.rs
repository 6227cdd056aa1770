//! Pawprint Core - avatar and profile types
//!
//! Pawprint builds a small avatar out of layered frames cut from a single
//! sprite sheet, and keeps a profile record (selection, nickname, theme
//! colors) next to an independent account record.
//!
//! # Layout
//!
//! ```text
//! sprite sheet (COLS x ROWS frames)
//!        │
//!        ▼
//! SpriteSelection ──► layers (shirt, skin, hair, hat, expression) ──► PNG
//!        │
//!        └──► Profile record ──► Theme (accent, background gradient)
//! ```
//!
//! Everything in this crate is pure: no storage, no image decoding. The
//! raster, store and account crates build on these types.

pub mod category;
pub mod color;
pub mod config;
pub mod frame;
pub mod notice;
pub mod profile;
pub mod selection;
pub mod sheet;

// Re-export commonly used types
pub use category::{Category, FrameRange};
pub use color::{ColorError, DEFAULT_BACKGROUND, LIGHTEN_AMOUNT, Rgb, Theme, ThemeVars, lighten_hex};
pub use config::{ConfigError, PawprintConfig};
pub use frame::ImageFrame;
pub use notice::Notice;
pub use profile::{FieldRejection, LoadReport, Profile, RejectReason};
pub use selection::{OptionEntry, SelectionError, SpriteSelection};
pub use sheet::{LayerPlacement, SheetGeometry, SpriteRect};
