//! Packing unique tiles into a roughly square sheet.

use image::RgbaImage;

/// Layout of the packed tile sheet, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackLayout {
    pub columns: u32,
    pub rows: u32,
}

impl PackLayout {
    /// `columns = ceil(sqrt(n))`, `rows = ceil(n / columns)`.
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            return Self { columns: 0, rows: 0 };
        }
        let columns = ceil_sqrt(count);
        let rows = count.div_ceil(columns);
        Self {
            columns: columns as u32,
            rows: rows as u32,
        }
    }

    /// Tile position of the n-th unique tile.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let columns = self.columns.max(1) as usize;
        ((index % columns) as u32, (index / columns) as u32)
    }
}

/// Smallest `c` with `c * c >= n`, computed on integers.
fn ceil_sqrt(n: usize) -> usize {
    let mut c = (n as f64).sqrt() as usize;
    while c * c < n {
        c += 1;
    }
    while c > 1 && (c - 1) * (c - 1) >= n {
        c -= 1;
    }
    c
}

/// Lay tiles left-to-right, top-to-bottom into one image.
///
/// Unused cells in the final row stay transparent.
pub fn pack_tiles(tiles: &[RgbaImage], tile_width: u32, tile_height: u32) -> (RgbaImage, PackLayout) {
    let layout = PackLayout::for_count(tiles.len());
    let mut sheet = RgbaImage::new(layout.columns * tile_width, layout.rows * tile_height);

    for (i, tile) in tiles.iter().enumerate() {
        let (col, row) = layout.position(i);
        image::imageops::replace(
            &mut sheet,
            tile,
            (col * tile_width) as i64,
            (row * tile_height) as i64,
        );
    }

    (sheet, layout)
}
