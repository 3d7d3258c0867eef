//! Generated Aseprite scripts.
//!
//! Each task is turned into a self-contained Lua program. Data (palettes,
//! template rows, tags) is embedded as literals; per-run values such as
//! the output directory arrive through `--script-param` and are read from
//! `app.params`. The body runs under `xpcall` so any failure prints a
//! traceback and is re-raised, making the editor exit non-zero.

mod edit;
mod lua;
mod sprite;
mod tileset;

pub use edit::process_frame_count;
pub use lua::{quote, seconds, LuaWriter};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FactoryError, Result};
use crate::job::{JobSpec, Task};
use crate::templates::{self, CharacterPreset};

/// A generated script ready to be written into the job directory.
#[derive(Debug, Clone)]
pub struct Script {
    /// File name inside the job directory, e.g. `character_sprite.lua`.
    pub file_name: String,
    pub source: String,
}

impl Script {
    /// Write the script into `dir`, returning its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.source).map_err(|e| FactoryError::Io {
            path: path.clone(),
            message: format!("Failed to write script: {}", e),
        })?;
        Ok(path)
    }
}

/// Generate the script for a validated job.
pub fn for_job(job: &JobSpec) -> Result<Script> {
    let mut w = LuaWriter::new();
    prelude(&mut w, job);

    match &job.task {
        Task::SpritePlaceholder => {
            let anim = templates::placeholder_animation()?;
            sprite::write(&mut w, &templates::placeholder_palette(), &anim)?;
        }
        Task::CharacterSprite(params) => {
            let preset = CharacterPreset::from_name(&params.preset)?;
            let anim = templates::character_animation()?;
            sprite::write(&mut w, &preset.palette(), &anim)?;
        }
        Task::TilesetPlaceholder(params) => {
            tileset::write(&mut w, params.columns, params.rows)?;
        }
        Task::SliceTileset(_) => edit::write_quantize(&mut w),
        Task::ProcessSprite(_) => edit::write_process(&mut w),
    }

    epilogue(&mut w);

    Ok(Script {
        file_name: format!("{}.lua", job.task.name()),
        source: w.finish(),
    })
}

/// Header comment and helpers shared by every script.
fn prelude(w: &mut LuaWriter, job: &JobSpec) {
    w.line(&format!(
        "-- Generated by asefactory: {} for job {}. Do not edit.",
        job.task.name(),
        job.job_id
    ));
    w.blank();

    w.open("local function param(name, default)")
        .line("local value = app.params[name]")
        .open("if value == nil or value == \"\" then")
        .open("if default ~= nil then")
        .line("return default")
        .close("end")
        .line("error(\"missing script param: \" .. name)")
        .close("end")
        .line("return value")
        .close("end");
    w.blank();

    w.open("local function output_path(suffix)")
        .line("return app.fs.joinPath(param(\"output_dir\"), param(\"output_basename\") .. suffix)")
        .close("end");
    w.blank();

    w.open("local function draw_rows(img, rows, ox, oy)")
        .open("for y, row in ipairs(rows) do")
        .open("for x = 1, #row do")
        .line("local index = tonumber(row:sub(x, x), 16)")
        .open("if index > 0 then")
        .line("img:drawPixel(ox + x - 1, oy + y - 1, index)")
        .close("end")
        .close("end")
        .close("end")
        .close("end");
    w.blank();

    w.open("local function apply_palette(spr, colours)")
        .line("local pal = Palette(#colours)")
        .open("for i, c in ipairs(colours) do")
        .line("pal:setColor(i - 1, Color { r = c[1], g = c[2], b = c[3], a = c[4] })")
        .close("end")
        .line("spr:setPalette(pal)")
        .close("end");
    w.blank();
}

/// Run `main` under a traceback handler and re-raise failures.
fn epilogue(w: &mut LuaWriter) {
    w.blank();
    w.line("local ok, err = xpcall(main, debug.traceback)")
        .open("if not ok then")
        .line("print(err)")
        .line("error(err, 0)")
        .close("end");
}
