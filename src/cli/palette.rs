use std::path::PathBuf;

use clap::Args;

use crate::error::{FactoryError, Result};
use crate::output::{display_path, plural, Printer};
use crate::types::{IndexedPalette, MAX_PALETTE_SIZE};

/// Print the indexed palette of a PNG
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// PNG file to read colours from
    #[arg(required = true)]
    pub file: PathBuf,

    /// Maximum palette entries, transparent included
    #[arg(long, default_value_t = MAX_PALETTE_SIZE)]
    pub max: usize,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let path = &args.file;
    let display = display_path(path);

    if args.max == 0 || args.max > MAX_PALETTE_SIZE {
        return Err(FactoryError::Parse {
            message: format!("--max must be between 1 and {}, got {}", MAX_PALETTE_SIZE, args.max),
            help: None,
        });
    }

    let img = image::open(path)
        .map_err(|e| FactoryError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?
        .to_rgba8();

    let palette = IndexedPalette::capture(&img, args.max)?;
    printer.status(
        "Sampled",
        &format!("{} from {}", plural(palette.len(), "colour", "colours"), display),
    );

    // index 0 is always transparent
    for (i, hex) in palette.to_hex().iter().enumerate() {
        println!("{:>3}: {}", i, hex);
    }

    Ok(())
}
