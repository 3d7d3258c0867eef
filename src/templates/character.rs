//! Humanoid character templates and preset palettes.
//!
//! Slot layout shared by every character palette:
//! 1 outline, 2 skin, 3 primary, 4 secondary, 5 hair, 6 accent,
//! 7 shade, 8 highlight, 9 eye.

use std::fmt;

use crate::error::{FactoryError, Result};
use crate::types::{Animation, Colour, PixelTemplate, TemplatePalette};

const BODY: &[&str] = &[
    ".....111111.....",
    "....15555551....",
    "....15222251....",
    "....12922921....",
    "....12222221....",
    ".....112211.....",
    "....13333331....",
    "...1383333731...",
    "...2133663312...",
    "....13333331....",
    "....14444441....",
    "....13377331....",
];

const LEGS_STAND: &[&str] = &[
    "....14411441....",
    "....14411441....",
    "....14411441....",
    "....111..111....",
];

const LEGS_STRIDE_A: &[&str] = &[
    "....14411441....",
    "...144111441....",
    "..1441...1441...",
    "..111.....111...",
];

const LEGS_PASS: &[&str] = &[
    ".....144441.....",
    ".....144441.....",
    ".....144441.....",
    ".....111111.....",
];

const LEGS_STRIDE_B: &[&str] = &[
    "....14411441....",
    "....144111441...",
    "...1441...1441..",
    "...111.....111..",
];

/// Milliseconds per idle frame.
pub const IDLE_FRAME_MS: u32 = 500;

/// Milliseconds per walk frame.
pub const WALK_FRAME_MS: u32 = 120;

/// Named character colour schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterPreset {
    Knight,
    Mage,
    Rogue,
    Villager,
}

impl CharacterPreset {
    pub const ALL: [CharacterPreset; 4] = [
        CharacterPreset::Knight,
        CharacterPreset::Mage,
        CharacterPreset::Rogue,
        CharacterPreset::Villager,
    ];

    /// Look up a preset by name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| FactoryError::Job {
                message: format!("unknown character preset '{}'", name),
                help: Some(format!(
                    "preset must be one of: {}",
                    Self::ALL.map(|p| p.name()).join(", ")
                )),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterPreset::Knight => "knight",
            CharacterPreset::Mage => "mage",
            CharacterPreset::Rogue => "rogue",
            CharacterPreset::Villager => "villager",
        }
    }

    /// The preset's slot palette.
    pub fn palette(self) -> TemplatePalette {
        let (primary, secondary, hair, accent) = match self {
            CharacterPreset::Knight => (
                Colour::rgb(0x8B, 0x9B, 0xB4),
                Colour::rgb(0x5D, 0x27, 0x5D),
                Colour::rgb(0x73, 0x46, 0x4C),
                Colour::rgb(0xFF, 0xCD, 0x75),
            ),
            CharacterPreset::Mage => (
                Colour::rgb(0x3B, 0x5D, 0xC9),
                Colour::rgb(0x29, 0x36, 0x6F),
                Colour::rgb(0xEE, 0xEE, 0xEE),
                Colour::rgb(0xB1, 0x3E, 0x53),
            ),
            CharacterPreset::Rogue => (
                Colour::rgb(0x25, 0x71, 0x79),
                Colour::rgb(0x33, 0x3C, 0x57),
                Colour::rgb(0x1A, 0x1C, 0x2C),
                Colour::rgb(0xA7, 0xF0, 0x70),
            ),
            CharacterPreset::Villager => (
                Colour::rgb(0x38, 0xB7, 0x64),
                Colour::rgb(0x73, 0x46, 0x4C),
                Colour::rgb(0xEF, 0x7D, 0x57),
                Colour::rgb(0xF4, 0xF4, 0xF4),
            ),
        };
        humanoid_palette(self.name(), primary, secondary, hair, accent)
    }
}

impl fmt::Display for CharacterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Palette for the untextured placeholder sprite.
pub fn placeholder_palette() -> TemplatePalette {
    humanoid_palette(
        "placeholder",
        Colour::rgb(0xFF, 0x00, 0xFF),
        Colour::rgb(0x80, 0x00, 0x80),
        Colour::rgb(0x40, 0x40, 0x40),
        Colour::rgb(0x00, 0xFF, 0xFF),
    )
}

fn humanoid_palette(
    name: &str,
    primary: Colour,
    secondary: Colour,
    hair: Colour,
    accent: Colour,
) -> TemplatePalette {
    TemplatePalette::new(name)
        .with_slot("outline", Colour::rgb(0x1A, 0x1C, 0x2C))
        .with_slot("skin", Colour::rgb(0xF4, 0xC7, 0x9A))
        .with_slot("primary", primary)
        .with_slot("secondary", secondary)
        .with_slot("hair", hair)
        .with_slot("accent", accent)
        .with_shade("shade", "primary", -30.0)
        .with_shade("highlight", "primary", 30.0)
        .with_slot("eye", Colour::rgb(0x1A, 0x1C, 0x2C))
}

fn part(name: &str, rows: &[&str]) -> Result<PixelTemplate> {
    PixelTemplate::parse(name, rows)
}

/// The standing frame: body over standing legs.
pub fn standing_frame() -> Result<PixelTemplate> {
    let body = part("body", BODY)?;
    let legs = part("legs-stand", LEGS_STAND)?;
    PixelTemplate::stack("stand", &[&body, &legs])
}

/// Four walk frames: stride, pass, opposite stride, stand.
pub fn walk_frames() -> Result<Vec<PixelTemplate>> {
    let body = part("body", BODY)?;
    let poses = [
        ("walk-1", LEGS_STRIDE_A),
        ("walk-2", LEGS_PASS),
        ("walk-3", LEGS_STRIDE_B),
        ("walk-4", LEGS_STAND),
    ];
    poses
        .iter()
        .map(|(name, rows)| {
            let legs = part(name, rows)?;
            PixelTemplate::stack(*name, &[&body, &legs])
        })
        .collect()
}

/// Idle (2 frames, the second with the body bobbed down) then walk (4 frames).
pub fn character_animation() -> Result<Animation> {
    let body = part("body", BODY)?;
    let legs = part("legs-stand", LEGS_STAND)?;
    let bob = body.shifted_down("body-bob", 1);

    let mut anim = Animation::new();
    anim.push_sequence(
        "idle",
        vec![
            PixelTemplate::stack("idle-1", &[&body, &legs])?,
            PixelTemplate::stack("idle-2", &[&bob, &legs])?,
        ],
        IDLE_FRAME_MS,
    )?;
    anim.push_sequence("walk", walk_frames()?, WALK_FRAME_MS)?;
    anim.check()?;
    Ok(anim)
}

/// One standing idle frame then the four walk frames.
pub fn placeholder_animation() -> Result<Animation> {
    let mut anim = Animation::new();
    anim.push_sequence("idle", vec![standing_frame()?], IDLE_FRAME_MS)?;
    anim.push_sequence("walk", walk_frames()?, WALK_FRAME_MS)?;
    anim.check()?;
    Ok(anim)
}
