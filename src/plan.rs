//! Turning a validated job into everything needed to run it.
//!
//! A plan holds the generated script, the ordered `--script-param` pairs
//! and the meta.json payload. Nothing is written or launched here.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::{FactoryError, Result};
use crate::job::{JobSpec, Task};
use crate::paths::PathTranslator;
use crate::script::{self, process_frame_count, Script};
use crate::templates::{self, TileKind, TILE_SIZE};
use crate::types::Animation;

/// Everything needed to run one job.
#[derive(Debug, Clone)]
pub struct JobPlan {
    pub job_dir: PathBuf,
    pub script: Script,
    /// Script parameters in the order they are passed.
    pub params: Vec<(String, String)>,
    pub meta: Value,
}

impl JobPlan {
    /// Plan a job whose artifacts go to `job_dir`.
    ///
    /// Input files are checked on the runner's side so a missing source is
    /// reported before the editor starts.
    pub fn new(job: &JobSpec, job_dir: &Path, translator: &dyn PathTranslator) -> Result<Self> {
        let job_dir = absolute(job_dir)?;
        let script = script::for_job(job)?;

        let mut params = vec![
            ("output_dir".to_string(), translator.to_target(&job_dir)?),
            ("output_basename".to_string(), job.output_basename.clone()),
        ];

        let mut meta = Map::new();
        meta.insert("job".to_string(), job.to_json());

        match &job.task {
            Task::SpritePlaceholder => {
                animation_meta(&mut meta, &templates::placeholder_animation()?);
            }
            Task::CharacterSprite(p) => {
                meta.insert("preset".to_string(), json!(p.preset));
                animation_meta(&mut meta, &templates::character_animation()?);
            }
            Task::TilesetPlaceholder(p) => {
                let side = |tiles: u32| {
                    tiles.checked_mul(TILE_SIZE).ok_or_else(|| {
                        FactoryError::job(format!("tileset of {} tiles per side is too large", tiles))
                    })
                };
                meta.insert(
                    "tileset_size".to_string(),
                    json!([side(p.columns)?, side(p.rows)?]),
                );
                meta.insert("tile_size".to_string(), json!([TILE_SIZE, TILE_SIZE]));
                meta.insert("grid".to_string(), json!([p.columns, p.rows]));
                let kinds: Vec<&str> = TileKind::ALL.iter().map(|k| k.name()).collect();
                meta.insert("tiles".to_string(), json!(kinds));
            }
            Task::SliceTileset(p) => {
                let input = checked_input(p.input_file.as_deref())?;
                params.push(("input_file".to_string(), translator.to_target(&input)?));
                params.push(("palette_size".to_string(), p.palette_size.to_string()));
                params.push(("tile_width".to_string(), p.tile_width.to_string()));
                params.push(("tile_height".to_string(), p.tile_height.to_string()));

                meta.insert("tile_size".to_string(), json!([p.tile_width, p.tile_height]));
                meta.insert("palette_size".to_string(), json!(p.palette_size));
                meta.insert("remove_dupes".to_string(), json!(p.remove_dupes));
            }
            Task::ProcessSprite(p) => {
                let input = checked_input(p.input_file.as_deref())?;
                params.push(("input_file".to_string(), translator.to_target(&input)?));
                params.push(("palette_size".to_string(), p.palette_size.to_string()));
                params.push(("target_width".to_string(), p.target_width.to_string()));
                params.push(("target_height".to_string(), p.target_height.to_string()));
                params.push(("gen_walkcycle".to_string(), p.gen_walkcycle.to_string()));

                meta.insert("target_size".to_string(), json!([p.target_width, p.target_height]));
                meta.insert("palette_size".to_string(), json!(p.palette_size));
                meta.insert("gen_walkcycle".to_string(), json!(p.gen_walkcycle));
                meta.insert(
                    "frame_count".to_string(),
                    json!(process_frame_count(p.gen_walkcycle)),
                );
            }
        }

        Ok(Self {
            job_dir,
            script,
            params,
            meta: Value::Object(meta),
        })
    }

    /// Write meta.json: two-space indent, sorted keys, trailing newline.
    pub fn write_meta(&self) -> Result<PathBuf> {
        let path = self.job_dir.join("meta.json");
        let mut text = serde_json::to_string_pretty(&self.meta).map_err(|e| FactoryError::Build {
            message: format!("Failed to serialize meta.json: {}", e),
            help: None,
        })?;
        text.push('\n');
        fs::write(&path, text).map_err(|e| FactoryError::Io {
            path: path.clone(),
            message: format!("Failed to write meta.json: {}", e),
        })?;
        Ok(path)
    }

    /// Look up a planned script parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn animation_meta(meta: &mut Map<String, Value>, anim: &Animation) {
    meta.insert("frame_count".to_string(), json!(anim.frame_count()));
    let tags: Map<String, Value> = anim
        .tags()
        .iter()
        .map(|t| (t.name.clone(), json!({ "from": t.from, "to": t.to })))
        .collect();
    meta.insert("tags".to_string(), Value::Object(tags));
}

fn checked_input(input: Option<&Path>) -> Result<PathBuf> {
    let input = input.ok_or_else(|| FactoryError::job("params.input_file is required"))?;
    let input = absolute(input)?;
    if !input.is_file() {
        return Err(FactoryError::Job {
            message: format!("input_file not found: {}", input.display()),
            help: Some("input_file is resolved relative to the working directory".to_string()),
        });
    }
    Ok(input)
}

/// Anchor a relative path at the working directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::NativePath;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn plan(value: Value, dir: &Path) -> Result<JobPlan> {
        let job = JobSpec::validate(&value)?;
        JobPlan::new(&job, dir, &NativePath)
    }

    #[test]
    fn test_sprite_placeholder_meta() {
        let dir = tempdir().unwrap();
        let plan = plan(
            json!({"job_id": "p1", "task": "sprite_placeholder", "output_basename": "blob"}),
            dir.path(),
        )
        .unwrap();

        assert_eq!(plan.meta["frame_count"], json!(5));
        assert_eq!(plan.meta["tags"]["idle"], json!({"from": 1, "to": 1}));
        assert_eq!(plan.meta["tags"]["walk"], json!({"from": 2, "to": 5}));
        assert_eq!(plan.meta["job"]["job_id"], json!("p1"));
    }

    #[test]
    fn test_character_meta() {
        let dir = tempdir().unwrap();
        let plan = plan(
            json!({"job_id": "c", "task": "character_sprite", "output_basename": "hero", "params": {"preset": "rogue"}}),
            dir.path(),
        )
        .unwrap();

        assert_eq!(plan.meta["preset"], json!("rogue"));
        assert_eq!(plan.meta["frame_count"], json!(6));
        assert_eq!(plan.meta["tags"]["idle"], json!({"from": 1, "to": 2}));
        assert_eq!(plan.meta["tags"]["walk"], json!({"from": 3, "to": 6}));
    }

    #[test]
    fn test_tileset_meta_scales_with_grid() {
        let dir = tempdir().unwrap();
        let plan = plan(
            json!({"job_id": "t", "task": "tileset_placeholder", "output_basename": "ts", "params": {"columns": 4, "rows": 2}}),
            dir.path(),
        )
        .unwrap();

        assert_eq!(plan.meta["tileset_size"], json!([64, 32]));
        assert_eq!(plan.meta["tile_size"], json!([16, 16]));
        assert_eq!(plan.meta["tiles"], json!(["grass", "stone", "wall", "dirt"]));
    }

    #[test]
    fn test_oversized_tileset_rejected_before_planning() {
        let dir = tempdir().unwrap();
        let err = plan(
            json!({"job_id": "big", "task": "tileset_placeholder", "output_basename": "ts",
                   "params": {"columns": 300_000_000, "rows": 1}}),
            dir.path(),
        )
        .unwrap_err();
        assert!(matches!(err, FactoryError::Job { .. }));
    }

    #[test]
    fn test_output_params_come_first() {
        let dir = tempdir().unwrap();
        let plan = plan(
            json!({"job_id": "t", "task": "tileset_placeholder", "output_basename": "ts"}),
            dir.path(),
        )
        .unwrap();

        assert_eq!(plan.params[0].0, "output_dir");
        assert_eq!(plan.params[0].1, dir.path().display().to_string());
        assert_eq!(plan.params[1], ("output_basename".to_string(), "ts".to_string()));
        assert_eq!(plan.params.len(), 2);
    }

    #[test]
    fn test_missing_input_file_rejected_before_launch() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        let err = plan(
            json!({"job_id": "s", "task": "slice_tileset", "output_basename": "ts", "params": {"input_file": missing}}),
            dir.path(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("input_file not found"));
    }

    #[test]
    fn test_process_params() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.png");
        fs::write(&input, b"png").unwrap();

        let plan = plan(
            json!({"job_id": "p", "task": "process_sprite", "output_basename": "out",
                   "params": {"input_file": input, "gen_walkcycle": true, "target_width": 24}}),
            dir.path(),
        )
        .unwrap();

        assert_eq!(plan.param("input_file"), Some(input.display().to_string().as_str()));
        assert_eq!(plan.param("gen_walkcycle"), Some("true"));
        assert_eq!(plan.param("target_width"), Some("24"));
        assert_eq!(plan.param("target_height"), Some("32"));
        assert_eq!(plan.param("palette_size"), Some("16"));
        assert_eq!(plan.meta["frame_count"], json!(4));
        assert_eq!(plan.meta["target_size"], json!([24, 32]));
    }

    #[test]
    fn test_write_meta_sorted_with_newline() {
        let dir = tempdir().unwrap();
        let plan = plan(
            json!({"job_id": "p1", "task": "sprite_placeholder", "output_basename": "blob"}),
            dir.path(),
        )
        .unwrap();

        let path = plan.write_meta().unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.ends_with("}\n"));
        let frame = text.find("\"frame_count\"").unwrap();
        let job = text.find("\"job\"").unwrap();
        let tags = text.find("\"tags\"").unwrap();
        assert!(frame < job && job < tags);
        assert!(text.contains("\n  \"frame_count\": 5,"));
    }
}
