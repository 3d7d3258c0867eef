//! Terrain tile templates for the placeholder tileset.

use std::fmt;

use image::RgbaImage;

use crate::error::Result;
use crate::types::{Colour, PixelTemplate, TemplatePalette};

/// Edge length of every placeholder tile.
pub const TILE_SIZE: u32 = 16;

const GRASS: &[&str] = &[
    "1111211111121111",
    "1121111311111111",
    "1111111111111211",
    "1311112111111111",
    "1111111111311111",
    "1112111111111121",
    "1111113111111111",
    "1211111111121111",
    "1111111211111111",
    "1111311111111131",
    "1111111111211111",
    "1121111111111111",
    "1111111311111211",
    "1111211111111111",
    "1311111111121111",
    "1111111211111111",
];

const STONE: &[&str] = &[
    "4444444644444446",
    "4554444644555446",
    "4444444644444446",
    "4444454644444546",
    "4444444644444446",
    "6666666666666666",
    "4446444444464444",
    "4556445544464554",
    "4446444444464444",
    "4446444454464444",
    "6666666666666666",
    "4444444644444446",
    "4455444644445546",
    "4444444644444446",
    "4444544644444446",
    "6666666666666666",
];

const WALL: &[&str] = &[
    "7777777877777778",
    "7777777877777778",
    "7777777877777778",
    "8888888888888888",
    "7778777777787777",
    "7778777777787777",
    "7778777777787777",
    "8888888888888888",
    "7777777877777778",
    "7777777877777778",
    "7777777877777778",
    "8888888888888888",
    "7778777777787777",
    "7778777777787777",
    "7778777777787777",
    "8888888888888888",
];

const DIRT: &[&str] = &[
    "9999999a99999999",
    "99b9999999999a99",
    "9999999999b99999",
    "9a99999999999999",
    "99999b999999a999",
    "9999999999999999",
    "999a9999b9999999",
    "9999999999999b99",
    "9b9999a999999999",
    "9999999999999999",
    "99999999b9999a99",
    "9a99999999999999",
    "99999b9999a99999",
    "9999999999999999",
    "999a99999999b999",
    "9999999a99999999",
];

/// Terrain kinds in the placeholder tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Grass,
    Stone,
    Wall,
    Dirt,
}

impl TileKind {
    pub const ALL: [TileKind; 4] = [TileKind::Grass, TileKind::Stone, TileKind::Wall, TileKind::Dirt];

    pub fn name(self) -> &'static str {
        match self {
            TileKind::Grass => "grass",
            TileKind::Stone => "stone",
            TileKind::Wall => "wall",
            TileKind::Dirt => "dirt",
        }
    }

    /// The tile's index template.
    pub fn template(self) -> Result<PixelTemplate> {
        let rows = match self {
            TileKind::Grass => GRASS,
            TileKind::Stone => STONE,
            TileKind::Wall => WALL,
            TileKind::Dirt => DIRT,
        };
        PixelTemplate::parse(self.name(), rows)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Slot palette shared by all terrain tiles.
pub fn tile_palette() -> TemplatePalette {
    let grass = Colour::rgb(0x38, 0xB7, 0x64);
    let stone = Colour::rgb(0x94, 0xB0, 0xC2);
    let dirt = Colour::rgb(0x8F, 0x56, 0x3B);
    TemplatePalette::new("terrain")
        .with_slot("grass", grass)
        .with_slot("grass_light", grass.shifted(35.0))
        .with_slot("grass_dark", grass.shifted(-35.0))
        .with_slot("stone", stone)
        .with_slot("stone_light", stone.shifted(35.0))
        .with_slot("stone_dark", stone.shifted(-45.0))
        .with_slot("brick", Colour::rgb(0xB1, 0x3E, 0x53))
        .with_slot("mortar", Colour::rgb(0x56, 0x6C, 0x86))
        .with_slot("dirt", dirt)
        .with_slot("dirt_light", dirt.shifted(30.0))
        .with_slot("dirt_dark", dirt.shifted(-35.0))
}

/// Kind for each cell of a `columns` x `rows` tileset, row-major.
///
/// Kinds cycle in [`TileKind::ALL`] order.
pub fn tileset_layout(columns: u32, rows: u32) -> Vec<TileKind> {
    (0..(columns as usize * rows as usize))
        .map(|i| TileKind::ALL[i % TileKind::ALL.len()])
        .collect()
}

/// Render the placeholder tileset natively, matching what the editor draws.
pub fn render_tileset(columns: u32, rows: u32) -> Result<RgbaImage> {
    let palette = tile_palette();
    let rendered: Vec<(TileKind, RgbaImage)> = TileKind::ALL
        .iter()
        .map(|&kind| Ok((kind, kind.template()?.render(&palette)?)))
        .collect::<Result<_>>()?;

    let mut sheet = RgbaImage::new(columns * TILE_SIZE, rows * TILE_SIZE);
    for (i, kind) in tileset_layout(columns, rows).into_iter().enumerate() {
        let x = (i as u32 % columns) * TILE_SIZE;
        let y = (i as u32 / columns) * TILE_SIZE;
        if let Some((_, tile)) = rendered.iter().find(|(k, _)| *k == kind) {
            image::imageops::replace(&mut sheet, tile, x as i64, y as i64);
        }
    }
    Ok(sheet)
}
