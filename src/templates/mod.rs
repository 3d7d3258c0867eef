//! Built-in pixel templates and palettes used by the generator tasks.

mod character;
mod tiles;

pub use character::{
    character_animation, placeholder_animation, placeholder_palette, standing_frame, walk_frames,
    CharacterPreset, IDLE_FRAME_MS, WALK_FRAME_MS,
};
pub use tiles::{render_tileset, tile_palette, tileset_layout, TileKind, TILE_SIZE};
