//! Pawprint Raster Backend
//!
//! Cuts frames out of the sprite sheet, stacks them as layers and flattens
//! the stack into a single exported image.

pub mod ansi;
pub mod atlas;
pub mod compositor;
pub mod export;

pub use atlas::{SheetError, SpriteSheet};
pub use compositor::{LayerCompositor, RenderLayer};
pub use export::{AvatarExporter, ExportError, ExportedAvatar, compose_avatar};
