//! Tileset slicing.
//!
//! Partitions a source image into grid tiles, removes exact duplicates,
//! packs the unique tiles into a square-ish sheet and records the
//! cell-to-tile map alongside it.

mod dedup;
mod grid;
mod pack;

pub use dedup::{dedupe, tiles_equal, Deduped};
pub use grid::{cut_tiles, TileGrid};
pub use pack::{pack_tiles, PackLayout};

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Serialize;

use crate::error::{FactoryError, Result};
use crate::types::{IndexedPalette, MAX_PALETTE_SIZE};

/// Options for slicing an image into a tileset.
#[derive(Debug, Clone, Copy)]
pub struct SliceOptions {
    pub tile_width: u32,
    pub tile_height: u32,
    pub remove_dupes: bool,
    /// Maximum palette entries captured from the source, transparent
    /// included. Sources with more colours slice without a palette.
    pub palette_size: usize,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            tile_width: 16,
            tile_height: 16,
            remove_dupes: true,
            palette_size: MAX_PALETTE_SIZE,
        }
    }
}

/// A sliced tileset.
#[derive(Debug, Clone)]
pub struct Tileset {
    pub grid: TileGrid,
    pub tiles: Vec<RgbaImage>,
    pub map: Vec<usize>,
    pub layout: PackLayout,
    pub sheet: RgbaImage,
    /// Absent when the source has more colours than `palette_size` allows.
    pub palette: Option<IndexedPalette>,
}

impl Tileset {
    /// Number of unique tiles.
    pub fn unique_count(&self) -> usize {
        self.tiles.len()
    }

    /// The map as text: one line per grid row, comma-separated indices.
    pub fn map_text(&self) -> String {
        let mut out = String::new();
        for row in self.map.chunks(self.grid.columns.max(1) as usize) {
            let line: Vec<String> = row.iter().map(|i| i.to_string()).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }

    /// Write `<basename>.png`, `<basename>_map.txt` and `<basename>_tiles.json`.
    pub fn write(&self, dir: &Path, basename: &str) -> Result<TilesetFiles> {
        let files = TilesetFiles {
            image: dir.join(format!("{}.png", basename)),
            map: dir.join(format!("{}_map.txt", basename)),
            json: dir.join(format!("{}_tiles.json", basename)),
        };

        self.sheet.save(&files.image).map_err(|e| FactoryError::Io {
            path: files.image.clone(),
            message: format!("Failed to write tileset image: {}", e),
        })?;

        fs::write(&files.map, self.map_text()).map_err(|e| FactoryError::Io {
            path: files.map.clone(),
            message: format!("Failed to write tile map: {}", e),
        })?;

        let meta = TilesetJson {
            image: format!("{}.png", basename),
            tile_size: [self.grid.tile_width, self.grid.tile_height],
            grid: [self.grid.columns, self.grid.rows],
            sheet: [self.layout.columns, self.layout.rows],
            unique_tiles: self.unique_count(),
            map: &self.map,
            palette: self.palette.as_ref().map(IndexedPalette::to_hex),
        };
        let json = serde_json::to_string_pretty(&meta).map_err(|e| FactoryError::Build {
            message: format!("Failed to serialize tileset metadata: {}", e),
            help: None,
        })?;
        fs::write(&files.json, json).map_err(|e| FactoryError::Io {
            path: files.json.clone(),
            message: format!("Failed to write tileset metadata: {}", e),
        })?;

        Ok(files)
    }
}

/// Paths written by [`Tileset::write`].
#[derive(Debug, Clone)]
pub struct TilesetFiles {
    pub image: PathBuf,
    pub map: PathBuf,
    pub json: PathBuf,
}

#[derive(Serialize)]
struct TilesetJson<'a> {
    image: String,
    tile_size: [u32; 2],
    grid: [u32; 2],
    sheet: [u32; 2],
    unique_tiles: usize,
    map: &'a [usize],
    #[serde(skip_serializing_if = "Option::is_none")]
    palette: Option<Vec<String>>,
}

/// Slice an image into a deduplicated, packed tileset.
pub fn slice(img: &RgbaImage, options: &SliceOptions) -> Result<Tileset> {
    let palette = IndexedPalette::capture(img, options.palette_size).ok();
    let grid = TileGrid::for_image(img, options.tile_width, options.tile_height)?;

    let Deduped { tiles, map } = dedupe(cut_tiles(img, &grid), options.remove_dupes);
    let (sheet, layout) = pack_tiles(&tiles, grid.tile_width, grid.tile_height);

    Ok(Tileset {
        grid,
        tiles,
        map,
        layout,
        sheet,
        palette,
    })
}
