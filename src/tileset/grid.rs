//! Grid partitioning of a source image into fixed-size tiles.

use image::RgbaImage;

use crate::error::{FactoryError, Result};

/// Tile and grid dimensions for a sliced image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl TileGrid {
    /// Compute the grid for an image.
    ///
    /// Trailing partial rows and columns are dropped. Fails if a tile
    /// dimension is zero or the image cannot hold a single tile.
    pub fn for_image(img: &RgbaImage, tile_width: u32, tile_height: u32) -> Result<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(FactoryError::Build {
                message: format!("Tile size must be non-zero, got {}x{}", tile_width, tile_height),
                help: None,
            });
        }

        let columns = img.width() / tile_width;
        let rows = img.height() / tile_height;

        if columns == 0 || rows == 0 {
            return Err(FactoryError::Build {
                message: format!(
                    "Image {}x{} is smaller than one {}x{} tile",
                    img.width(),
                    img.height(),
                    tile_width,
                    tile_height
                ),
                help: Some("Use a smaller tile size or a larger source image".to_string()),
            });
        }

        Ok(Self {
            tile_width,
            tile_height,
            columns,
            rows,
        })
    }

    /// Number of grid cells.
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Pixel origin of the cell at a row-major index.
    pub fn origin(&self, cell: usize) -> (u32, u32) {
        let col = cell as u32 % self.columns;
        let row = cell as u32 / self.columns;
        (col * self.tile_width, row * self.tile_height)
    }
}

/// Cut every full tile out of the image in row-major order.
pub fn cut_tiles(img: &RgbaImage, grid: &TileGrid) -> Vec<RgbaImage> {
    (0..grid.cell_count())
        .map(|cell| {
            let (x, y) = grid.origin(cell);
            image::imageops::crop_imm(img, x, y, grid.tile_width, grid.tile_height).to_image()
        })
        .collect()
}
