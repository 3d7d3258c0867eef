//! asefactory - Aseprite batch job runner
//!
//! Validates JSON job specs, generates a Lua script per job, runs Aseprite
//! in batch mode with per-job script parameters and collects the artifacts
//! (meta.json, logs.txt and the editor's outputs) in a per-job directory.
//! Tileset slicing runs natively on the editor's palette-reduced output.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod job;
pub mod output;
pub mod paths;
pub mod plan;
pub mod runner;
pub mod script;
pub mod templates;
pub mod tileset;
pub mod types;

pub use config::FactoryConfig;
pub use editor::{locate, EditorPaths, Invocation};
pub use error::{FactoryError, Result};
pub use job::{JobSpec, Task};
pub use paths::{NativePath, PathMode, PathTranslator, WslPath};
pub use plan::JobPlan;
pub use runner::{run_job, JobOutcome};
pub use tileset::{slice, SliceOptions, Tileset};
pub use types::{Animation, Colour, IndexedPalette, PixelTemplate, TemplatePalette};
