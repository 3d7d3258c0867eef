//! Core domain types for asefactory.
//!
//! - `Colour` - RGBA colour values
//! - `IndexedPalette` / `TemplatePalette` - indexed and slot-named palettes
//! - `PixelTemplate` - literal index grids drawn by the generator scripts
//! - `Animation` - frames, durations and tags

mod animation;
mod colour;
mod palette;
mod template;

pub use animation::{Animation, Frame, Tag};
pub use colour::Colour;
pub use palette::{IndexedPalette, TemplatePalette, MAX_PALETTE_SIZE};
pub use template::PixelTemplate;
