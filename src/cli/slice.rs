//! Slice command implementation.
//!
//! Cuts a PNG into a deduplicated tileset locally, the same way the
//! `slice_tileset` job finishes after Aseprite has reduced the palette.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{FactoryError, Result};
use crate::output::{display_path, plural, Printer};
use crate::tileset::{self, SliceOptions, TilesetFiles};
use crate::types::MAX_PALETTE_SIZE;

/// Slice a PNG into a deduplicated tileset without Aseprite
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// PNG file to slice
    #[arg(required = true)]
    pub input: PathBuf,

    /// Tile size as WxH (e.g. 16x16)
    #[arg(long, default_value = "16x16")]
    pub tile: String,

    /// Output directory for the tileset files
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,

    /// Base name for output files (default: input filename stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Keep duplicate tiles instead of merging them
    #[arg(long)]
    pub keep_dupes: bool,
}

/// Parse a "WxH" dimension string into (width, height).
pub fn parse_dimensions(s: &str) -> Result<(u32, u32)> {
    let parts: Vec<&str> = s.splitn(2, |c| c == 'x' || c == 'X').collect();
    if parts.len() != 2 {
        return Err(FactoryError::Parse {
            message: format!("Invalid dimensions '{}': expected WxH (e.g. 16x16)", s),
            help: Some("Use the format WxH, for example: 16x16, 8x16".to_string()),
        });
    }

    let w: u32 = parts[0].parse().map_err(|_| FactoryError::Parse {
        message: format!("Invalid width '{}' in dimensions '{}'", parts[0], s),
        help: Some("Width must be a positive integer".to_string()),
    })?;

    let h: u32 = parts[1].parse().map_err(|_| FactoryError::Parse {
        message: format!("Invalid height '{}' in dimensions '{}'", parts[1], s),
        help: Some("Height must be a positive integer".to_string()),
    })?;

    if w == 0 || h == 0 {
        return Err(FactoryError::Parse {
            message: format!("Dimensions must be non-zero, got {}x{}", w, h),
            help: Some("Both width and height must be at least 1".to_string()),
        });
    }

    Ok((w, h))
}

fn base_name(input: &Path, name: Option<String>) -> String {
    name.unwrap_or_else(|| {
        input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("tileset")
            .to_string()
    })
}

pub fn run(args: SliceArgs, printer: &Printer) -> Result<TilesetFiles> {
    let path = &args.input;
    let display = display_path(path);

    if !path.exists() {
        return Err(FactoryError::Io {
            path: path.clone(),
            message: format!("File not found: {}", display),
        });
    }

    if path.extension().and_then(|e| e.to_str()) != Some("png") {
        printer.warning("Warning", &format!("{} does not have a .png extension", display));
    }

    let (tile_width, tile_height) = parse_dimensions(&args.tile)?;

    printer.status("Loading", &display);
    let img = image::open(path)
        .map_err(|e| FactoryError::Io {
            path: path.clone(),
            message: format!("Failed to load image: {}", e),
        })?
        .to_rgba8();

    if img.width() % tile_width != 0 || img.height() % tile_height != 0 {
        printer.warning(
            "Warning",
            &format!(
                "{}x{} image is not a multiple of {}x{}; partial edge tiles dropped",
                img.width(),
                img.height(),
                tile_width,
                tile_height
            ),
        );
    }

    let options = SliceOptions {
        tile_width,
        tile_height,
        remove_dupes: !args.keep_dupes,
        palette_size: MAX_PALETTE_SIZE,
    };
    let tileset = tileset::slice(&img, &options)?;
    if tileset.palette.is_none() {
        printer.warning(
            "Warning",
            &format!("{} uses more than {} colours; palette omitted", display, MAX_PALETTE_SIZE),
        );
    }

    printer.status(
        "Slicing",
        &format!(
            "{}x{} grid ({}x{} tiles)",
            tileset.grid.columns, tileset.grid.rows, tile_width, tile_height
        ),
    );

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| FactoryError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let name = base_name(path, args.name);
    let files = tileset.write(&args.output, &name)?;

    printer.info(
        "Finished",
        &format!(
            "{} from {} ({})",
            plural(tileset.unique_count(), "unique tile", "unique tiles"),
            plural(tileset.grid.cell_count(), "cell", "cells"),
            display_path(&files.image)
        ),
    );

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_parse_dimensions_valid() {
        assert_eq!(parse_dimensions("16x16").unwrap(), (16, 16));
    }

    #[test]
    fn test_parse_dimensions_rectangular() {
        assert_eq!(parse_dimensions("8x16").unwrap(), (8, 16));
    }

    #[test]
    fn test_parse_dimensions_uppercase() {
        assert_eq!(parse_dimensions("8X16").unwrap(), (8, 16));
    }

    #[test]
    fn test_parse_dimensions_invalid() {
        assert!(parse_dimensions("abc").is_err());
        assert!(parse_dimensions("axb").is_err());
    }

    #[test]
    fn test_parse_dimensions_zero() {
        assert!(parse_dimensions("0x16").is_err());
        assert!(parse_dimensions("16x0").is_err());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("art/dungeon.png"), None), "dungeon");
        assert_eq!(base_name(Path::new("art/dungeon.png"), Some("walls".into())), "walls");
    }

    #[test]
    fn test_run_writes_tileset() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sheet.png");
        let mut img = RgbaImage::from_pixel(8, 4, Rgba([10, 20, 30, 255]));
        img.put_pixel(5, 1, Rgba([200, 0, 0, 255]));
        img.save(&input).unwrap();

        let args = SliceArgs {
            input,
            tile: "4x4".to_string(),
            output: dir.path().join("out"),
            name: None,
            keep_dupes: false,
        };
        let files = run(args, &Printer::with_color(false)).unwrap();

        assert_eq!(files.image, dir.path().join("out").join("sheet.png"));
        assert_eq!(fs::read_to_string(&files.map).unwrap(), "0,1\n");
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempdir().unwrap();
        let args = SliceArgs {
            input: dir.path().join("missing.png"),
            tile: "16x16".to_string(),
            output: dir.path().to_path_buf(),
            name: None,
            keep_dupes: false,
        };
        assert!(run(args, &Printer::with_color(false)).is_err());
    }
}
