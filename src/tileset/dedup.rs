//! Exact-match tile deduplication.

use image::RgbaImage;

/// Unique tiles plus the cell-to-tile mapping.
#[derive(Debug, Clone)]
pub struct Deduped {
    /// Unique tiles in order of first appearance.
    pub tiles: Vec<RgbaImage>,
    /// For every grid cell (row-major), the index of its tile in `tiles`.
    pub map: Vec<usize>,
}

/// Two tiles are equal iff they have the same size and identical pixels.
///
/// Fully transparent pixels match each other whatever RGB they carry, the
/// same way palette capture folds them all into entry 0.
pub fn tiles_equal(a: &RgbaImage, b: &RgbaImage) -> bool {
    if a.dimensions() != b.dimensions() {
        return false;
    }
    a.as_raw() == b.as_raw()
        || a
            .pixels()
            .zip(b.pixels())
            .all(|(p, q)| p == q || (p[3] == 0 && q[3] == 0))
}

/// Deduplicate tiles in order.
///
/// Each tile is compared against every unique tile accepted so far; a match
/// reuses that index, otherwise the tile is accepted as new. With
/// `remove_dupes` off every tile is kept and the map is the identity.
pub fn dedupe(tiles: Vec<RgbaImage>, remove_dupes: bool) -> Deduped {
    if !remove_dupes {
        let map = (0..tiles.len()).collect();
        return Deduped { tiles, map };
    }

    let mut unique: Vec<RgbaImage> = Vec::new();
    let mut map = Vec::with_capacity(tiles.len());

    for tile in tiles {
        match unique.iter().position(|u| tiles_equal(u, &tile)) {
            Some(index) => map.push(index),
            None => {
                map.push(unique.len());
                unique.push(tile);
            }
        }
    }

    Deduped { tiles: unique, map }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(r: u8) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([r, 0, 0, 255]))
    }

    #[test]
    fn test_dedupe_merges_identical() {
        let result = dedupe(vec![solid(1), solid(2), solid(1), solid(3), solid(2)], true);
        assert_eq!(result.tiles.len(), 3);
        assert_eq!(result.map, vec![0, 1, 0, 2, 1]);
    }

    #[test]
    fn test_dedupe_disabled_keeps_everything() {
        let result = dedupe(vec![solid(1), solid(1), solid(1)], false);
        assert_eq!(result.tiles.len(), 3);
        assert_eq!(result.map, vec![0, 1, 2]);
    }

    #[test]
    fn test_single_channel_difference_is_distinct() {
        let a = solid(5);
        let mut b = solid(5);
        b.put_pixel(1, 1, Rgba([5, 0, 0, 254]));

        assert!(!tiles_equal(&a, &b));
        let result = dedupe(vec![a, b], true);
        assert_eq!(result.tiles.len(), 2);
    }

    #[test]
    fn test_hidden_rgb_under_alpha_zero_is_ignored() {
        let mut a = solid(5);
        let mut b = solid(5);
        a.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
        b.put_pixel(0, 0, Rgba([0, 0, 0, 0]));

        assert!(tiles_equal(&a, &b));
        let result = dedupe(vec![a, b], true);
        assert_eq!(result.tiles.len(), 1);
        assert_eq!(result.map, vec![0, 0]);
    }

    #[test]
    fn test_alpha_zero_differs_from_opaque() {
        let a = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let b = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        assert!(!tiles_equal(&a, &b));
    }

    #[test]
    fn test_different_sizes_never_equal() {
        let a = RgbaImage::new(2, 4);
        let b = RgbaImage::new(4, 2);
        assert!(!tiles_equal(&a, &b));
    }

    #[test]
    fn test_dedupe_empty() {
        let result = dedupe(vec![], true);
        assert!(result.tiles.is_empty());
        assert!(result.map.is_empty());
    }
}
