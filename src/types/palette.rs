//! Palette types: indexed palettes and named template palettes.

use image::RgbaImage;

use crate::error::{FactoryError, Result};

use super::Colour;

/// Largest palette an indexed image can carry.
pub const MAX_PALETTE_SIZE: usize = 256;

/// An ordered list of colours addressed by index.
///
/// Index 0 is conventionally the transparent entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPalette {
    entries: Vec<Colour>,
}

impl IndexedPalette {
    /// Create a palette from explicit entries.
    pub fn new(entries: Vec<Colour>) -> Result<Self> {
        if entries.len() > MAX_PALETTE_SIZE {
            return Err(FactoryError::Build {
                message: format!(
                    "Palette has {} entries, indexed images allow at most {}",
                    entries.len(),
                    MAX_PALETTE_SIZE
                ),
                help: None,
            });
        }
        Ok(Self { entries })
    }

    /// Capture the colours used by an image.
    ///
    /// Entry 0 is always transparent; remaining colours follow in order of
    /// first appearance when scanning row-major. Every fully transparent
    /// pixel folds into entry 0. Fails if more than `max` entries are needed.
    pub fn capture(img: &RgbaImage, max: usize) -> Result<Self> {
        let max = max.min(MAX_PALETTE_SIZE);
        let mut entries = vec![Colour::TRANSPARENT];

        for pixel in img.pixels() {
            let colour = Colour::from(*pixel);
            if colour.is_transparent() || entries.contains(&colour) {
                continue;
            }
            if entries.len() == max {
                return Err(FactoryError::Build {
                    message: format!("Image uses more than {} colours", max),
                    help: Some(
                        "Reduce the palette in the editor first, or raise palette_size"
                            .to_string(),
                    ),
                });
            }
            entries.push(colour);
        }

        Ok(Self { entries })
    }

    /// Colour at an index.
    pub fn get(&self, index: usize) -> Option<Colour> {
        self.entries.get(index).copied()
    }

    pub fn entries(&self) -> &[Colour] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hex strings for every entry, in index order.
    pub fn to_hex(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.to_string()).collect()
    }
}

/// A palette whose entries are named semantic slots.
///
/// Slot `i` is palette index `i`, so templates can address slots by index
/// while the generated scripts still know what each colour means.
#[derive(Debug, Clone)]
pub struct TemplatePalette {
    /// Palette name
    pub name: String,

    slots: Vec<(String, Colour)>,
}

impl TemplatePalette {
    /// Create a palette with the transparent slot at index 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: vec![("transparent".to_string(), Colour::TRANSPARENT)],
        }
    }

    /// Append a named slot.
    pub fn with_slot(mut self, slot: impl Into<String>, colour: Colour) -> Self {
        self.slots.push((slot.into(), colour));
        self
    }

    /// Append a slot derived from an existing one by shifting its lightness.
    pub fn with_shade(self, slot: impl Into<String>, from: &str, percent: f32) -> Self {
        let base = self.colour(from).unwrap_or(Colour::BLACK);
        self.with_slot(slot, base.shifted(percent))
    }

    /// Look up a slot colour by name.
    pub fn colour(&self, slot: &str) -> Option<Colour> {
        self.slots
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Flatten into an indexed palette.
    pub fn to_indexed(&self) -> Result<IndexedPalette> {
        IndexedPalette::new(self.slots.iter().map(|(_, c)| *c).collect())
    }
}
