//! Pixel templates.
//!
//! A template is a literal grid of palette indices written as text rows.
//! Each character is a hex digit addressing a slot of a [`TemplatePalette`];
//! `.` is shorthand for index 0 (transparent).

use image::RgbaImage;

use crate::error::{FactoryError, Result};

use super::TemplatePalette;

/// A fixed-size grid of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelTemplate {
    /// Template name, used in error messages and generated scripts.
    pub name: String,

    /// Index grid (row-major: indices[y][x]).
    indices: Vec<Vec<u8>>,
}

impl PixelTemplate {
    /// Parse a template from text rows.
    ///
    /// Every row must have the same length and contain only hex digits or `.`.
    pub fn parse(name: impl Into<String>, rows: &[&str]) -> Result<Self> {
        let name = name.into();
        let mut indices = Vec::with_capacity(rows.len());
        let mut width = None;

        for (y, row) in rows.iter().enumerate() {
            let parsed = row
                .chars()
                .enumerate()
                .map(|(x, c)| parse_index(c).ok_or_else(|| FactoryError::Parse {
                    message: format!(
                        "Template '{}' has invalid character '{}' at row {}, column {}",
                        name, c, y, x
                    ),
                    help: Some("Use hex digits 0-f for palette slots and '.' for transparent".to_string()),
                }))
                .collect::<Result<Vec<u8>>>()?;

            match width {
                None => width = Some(parsed.len()),
                Some(w) if w != parsed.len() => {
                    return Err(FactoryError::Parse {
                        message: format!(
                            "Template '{}' row {} is {} pixels wide, expected {}",
                            name,
                            y,
                            parsed.len(),
                            w
                        ),
                        help: Some("Every template row must have the same length".to_string()),
                    });
                }
                Some(_) => {}
            }
            indices.push(parsed);
        }

        Ok(Self { name, indices })
    }

    /// Build a template directly from an index grid.
    pub fn from_indices(name: impl Into<String>, indices: Vec<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            indices,
        }
    }

    /// Get the width in pixels.
    pub fn width(&self) -> usize {
        self.indices.first().map_or(0, |row| row.len())
    }

    /// Get the height in pixels.
    pub fn height(&self) -> usize {
        self.indices.len()
    }

    /// Get the index at a position.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.indices.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.indices
    }

    /// Rows encoded back to the literal text form (`0` for transparent).
    pub fn text_rows(&self) -> Vec<String> {
        self.indices
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&i| std::char::from_digit(i as u32, 16).unwrap_or('0'))
                    .collect()
            })
            .collect()
    }

    /// Check that every index addresses a slot defined in the palette.
    pub fn check_against(&self, palette: &TemplatePalette) -> Result<()> {
        for (y, row) in self.indices.iter().enumerate() {
            for (x, &index) in row.iter().enumerate() {
                if index as usize >= palette.len() {
                    return Err(FactoryError::Build {
                        message: format!(
                            "Template '{}' uses slot {} at ({}, {}) but palette '{}' defines {} slots",
                            self.name,
                            index,
                            x,
                            y,
                            palette.name,
                            palette.len()
                        ),
                        help: None,
                    });
                }
            }
        }
        Ok(())
    }

    /// Copy of this template moved down by `dy` rows, keeping its height.
    ///
    /// Rows pushed off the bottom are dropped; new top rows are transparent.
    pub fn shifted_down(&self, name: impl Into<String>, dy: usize) -> Self {
        let width = self.width();
        let height = self.height();
        let mut indices = vec![vec![0; width]; dy.min(height)];
        indices.extend(self.indices.iter().take(height.saturating_sub(dy)).cloned());
        Self::from_indices(name, indices)
    }

    /// Stack templates vertically. All parts must share one width.
    pub fn stack(name: impl Into<String>, parts: &[&PixelTemplate]) -> Result<Self> {
        let name = name.into();
        let width = parts.first().map_or(0, |p| p.width());
        let mut indices = Vec::new();
        for part in parts {
            if part.width() != width {
                return Err(FactoryError::Build {
                    message: format!(
                        "Cannot stack '{}' ({} wide) into '{}' ({} wide)",
                        part.name,
                        part.width(),
                        name,
                        width
                    ),
                    help: None,
                });
            }
            indices.extend(part.indices.iter().cloned());
        }
        Ok(Self::from_indices(name, indices))
    }

    /// Render to an RGBA image using the palette's slot colours.
    pub fn render(&self, palette: &TemplatePalette) -> Result<RgbaImage> {
        self.check_against(palette)?;
        let indexed = palette.to_indexed()?;

        let mut img = RgbaImage::new(self.width() as u32, self.height() as u32);
        for (y, row) in self.indices.iter().enumerate() {
            for (x, &index) in row.iter().enumerate() {
                if let Some(colour) = indexed.get(index as usize) {
                    img.put_pixel(x as u32, y as u32, colour.into());
                }
            }
        }
        Ok(img)
    }
}

fn parse_index(c: char) -> Option<u8> {
    match c {
        '.' => Some(0),
        _ => c.to_digit(16).map(|d| d as u8),
    }
}
