//! Supported tasks and their typed parameters.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FactoryError, Result};
use crate::templates::{CharacterPreset, TILE_SIZE};
use crate::types::MAX_PALETTE_SIZE;

/// Largest sprite side Aseprite accepts, in pixels.
pub const MAX_SPRITE_SIZE: u32 = 65535;

/// Task names accepted in the `task` field.
pub const SUPPORTED_TASKS: &[&str] = &[
    "sprite_placeholder",
    "tileset_placeholder",
    "character_sprite",
    "slice_tileset",
    "process_sprite",
];

/// A validated task with its resolved parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    SpritePlaceholder,
    TilesetPlaceholder(TilesetParams),
    CharacterSprite(CharacterParams),
    SliceTileset(SliceParams),
    ProcessSprite(ProcessParams),
}

impl Task {
    /// Resolve a task name and its raw parameters.
    pub fn from_parts(name: &str, params: &Map<String, Value>) -> Result<Self> {
        let task = match name {
            "sprite_placeholder" => Task::SpritePlaceholder,
            "tileset_placeholder" => Task::TilesetPlaceholder(parse_params(name, params)?),
            "character_sprite" => Task::CharacterSprite(parse_params(name, params)?),
            "slice_tileset" => Task::SliceTileset(parse_params(name, params)?),
            "process_sprite" => Task::ProcessSprite(parse_params(name, params)?),
            other => {
                return Err(FactoryError::Job {
                    message: format!("unknown task '{}'", other),
                    help: Some(format!("task must be one of: {}", SUPPORTED_TASKS.join(", "))),
                });
            }
        };
        task.check()?;
        Ok(task)
    }

    /// The task's name as written in job specs.
    pub fn name(&self) -> &'static str {
        match self {
            Task::SpritePlaceholder => "sprite_placeholder",
            Task::TilesetPlaceholder(_) => "tileset_placeholder",
            Task::CharacterSprite(_) => "character_sprite",
            Task::SliceTileset(_) => "slice_tileset",
            Task::ProcessSprite(_) => "process_sprite",
        }
    }

    fn check(&self) -> Result<()> {
        match self {
            Task::SpritePlaceholder => Ok(()),
            Task::TilesetPlaceholder(p) => {
                require_positive("columns", p.columns)?;
                require_positive("rows", p.rows)?;
                require_sprite_side("columns", p.columns, TILE_SIZE)?;
                require_sprite_side("rows", p.rows, TILE_SIZE)
            }
            Task::CharacterSprite(p) => CharacterPreset::from_name(&p.preset).map(|_| ()),
            Task::SliceTileset(p) => {
                require_input(&p.input_file)?;
                require_positive("tile_width", p.tile_width)?;
                require_positive("tile_height", p.tile_height)?;
                require_palette_size(p.palette_size)
            }
            Task::ProcessSprite(p) => {
                require_input(&p.input_file)?;
                require_positive("target_width", p.target_width)?;
                require_positive("target_height", p.target_height)?;
                require_sprite_side("target_width", p.target_width, 1)?;
                require_sprite_side("target_height", p.target_height, 1)?;
                require_palette_size(p.palette_size)
            }
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parameters for `tileset_placeholder`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesetParams {
    pub columns: u32,
    pub rows: u32,
}

impl Default for TilesetParams {
    fn default() -> Self {
        Self { columns: 8, rows: 8 }
    }
}

/// Parameters for `character_sprite`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterParams {
    pub preset: String,
}

impl Default for CharacterParams {
    fn default() -> Self {
        Self {
            preset: "knight".to_string(),
        }
    }
}

/// Parameters for `slice_tileset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceParams {
    pub input_file: Option<PathBuf>,
    pub tile_width: u32,
    pub tile_height: u32,
    pub palette_size: u32,
    pub remove_dupes: bool,
}

impl Default for SliceParams {
    fn default() -> Self {
        Self {
            input_file: None,
            tile_width: 16,
            tile_height: 16,
            palette_size: 32,
            remove_dupes: true,
        }
    }
}

/// Parameters for `process_sprite`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessParams {
    pub input_file: Option<PathBuf>,
    pub target_width: u32,
    pub target_height: u32,
    pub palette_size: u32,
    pub gen_walkcycle: bool,
}

impl Default for ProcessParams {
    fn default() -> Self {
        Self {
            input_file: None,
            target_width: 32,
            target_height: 32,
            palette_size: 16,
            gen_walkcycle: false,
        }
    }
}

fn parse_params<T>(task: &str, params: &Map<String, Value>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(Value::Object(params.clone())).map_err(|e| FactoryError::Job {
        message: format!("invalid params for {}: {}", task, e),
        help: None,
    })
}

fn require_positive(field: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(FactoryError::job(format!("params.{} must be greater than zero", field)));
    }
    Ok(())
}

/// `value * scale` pixels must fit in one sprite side.
fn require_sprite_side(field: &str, value: u32, scale: u32) -> Result<()> {
    match value.checked_mul(scale) {
        Some(side) if side <= MAX_SPRITE_SIZE => Ok(()),
        _ => Err(FactoryError::Job {
            message: format!(
                "params.{} is too large: {} x {} px exceeds {} px",
                field, value, scale, MAX_SPRITE_SIZE
            ),
            help: Some(format!("Keep params.{} at or below {}", field, MAX_SPRITE_SIZE / scale)),
        }),
    }
}

fn require_input(input: &Option<PathBuf>) -> Result<()> {
    match input {
        Some(path) if !path.as_os_str().is_empty() => Ok(()),
        _ => Err(FactoryError::Job {
            message: "params.input_file is required".to_string(),
            help: Some("Point input_file at the source PNG".to_string()),
        }),
    }
}

fn require_palette_size(size: u32) -> Result<()> {
    if !(2..=MAX_PALETTE_SIZE as u32).contains(&size) {
        return Err(FactoryError::job(format!(
            "params.palette_size must be between 2 and {}, got {}",
            MAX_PALETTE_SIZE, size
        )));
    }
    Ok(())
}
