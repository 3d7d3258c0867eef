//! Running a job end to end.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FactoryConfig;
use crate::editor::{locate, Invocation};
use crate::error::{FactoryError, Result};
use crate::job::{JobSpec, Task};
use crate::output::{display_path, plural, Printer};
use crate::plan::JobPlan;
use crate::tileset::{self, SliceOptions};
use crate::types::MAX_PALETTE_SIZE;

/// File name of the captured editor output inside the job directory.
pub const LOG_FILENAME: &str = "logs.txt";

/// What a run left behind.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job_dir: PathBuf,
    pub meta: PathBuf,
    pub script: PathBuf,
    /// Absent for dry runs.
    pub log: Option<PathBuf>,
    /// Files written by the runner itself after the editor finished.
    pub outputs: Vec<PathBuf>,
}

/// Load, validate and run the job spec at `spec_path`.
pub fn run_job(
    spec_path: &Path,
    config: &FactoryConfig,
    printer: &Printer,
    dry_run: bool,
) -> Result<JobOutcome> {
    let job = JobSpec::load(spec_path)?;
    printer.status(
        "Loaded",
        &format!("{} ({})", job.job_id, printer.cyan(job.task.name())),
    );
    run(&job, config, printer, dry_run)
}

/// Run an already validated job.
///
/// The job directory, meta.json and the script are written before the
/// editor is looked up, so a failed lookup still leaves them for
/// inspection.
pub fn run(job: &JobSpec, config: &FactoryConfig, printer: &Printer, dry_run: bool) -> Result<JobOutcome> {
    let translator = config.paths.translator();
    let job_dir = config.job_dir(&job.job_id);
    fs::create_dir_all(&job_dir).map_err(|e| FactoryError::Io {
        path: job_dir.clone(),
        message: format!("Failed to create job directory: {}", e),
    })?;

    let plan = JobPlan::new(job, &job_dir, translator.as_ref())?;
    let meta = plan.write_meta()?;
    let script = plan.script.write_to(&plan.job_dir)?;
    printer.status("Generated", &display_path(&script));

    if dry_run {
        printer.info("Skipped", "editor launch (dry run)");
        return Ok(JobOutcome {
            job_dir: plan.job_dir,
            meta,
            script,
            log: None,
            outputs: Vec::new(),
        });
    }

    let editor = locate(config, translator.as_ref())?;
    printer.info("Editor", &editor.target);
    let invocation = Invocation::new(
        &editor.native,
        translator.to_target(&script)?,
        plan.params.clone(),
    )?;

    printer.status("Running", &printer.dim(&invocation.command_line()));
    let log_path = plan.job_dir.join(LOG_FILENAME);
    let result = invocation.run(&log_path);
    if let Err(FactoryError::Editor { code, .. }) = &result {
        printer.error("Failed", &format!("{} (exit code {})", job.job_id, code));
    }
    let outcome = result?;

    let outputs = match &job.task {
        Task::SliceTileset(p) => {
            let options = SliceOptions {
                tile_width: p.tile_width,
                tile_height: p.tile_height,
                remove_dupes: p.remove_dupes,
                palette_size: MAX_PALETTE_SIZE,
            };
            slice_quantized(&plan.job_dir, &job.output_basename, &options, printer)?
        }
        _ => Vec::new(),
    };

    printer.success("Finished", &format!("{} in {}", job.job_id, display_path(&plan.job_dir)));

    Ok(JobOutcome {
        job_dir: plan.job_dir,
        meta,
        script,
        log: Some(outcome.log),
        outputs,
    })
}

/// Slice the editor's `<basename>_quantized.png` into the final tileset.
fn slice_quantized(
    job_dir: &Path,
    basename: &str,
    options: &SliceOptions,
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    let quantized = job_dir.join(format!("{}_quantized.png", basename));
    if !quantized.is_file() {
        return Err(FactoryError::Build {
            message: format!("Aseprite did not produce {}", display_path(&quantized)),
            help: Some(format!("Check {} in the job directory", LOG_FILENAME)),
        });
    }

    let img = image::open(&quantized)
        .map_err(|e| FactoryError::Io {
            path: quantized.clone(),
            message: format!("Failed to load image: {}", e),
        })?
        .to_rgba8();

    let tileset = tileset::slice(&img, options)?;
    printer.info(
        "Sliced",
        &format!(
            "{} into {}",
            plural(tileset.grid.cell_count(), "cell", "cells"),
            plural(tileset.unique_count(), "unique tile", "unique tiles")
        ),
    );

    let files = tileset.write(job_dir, basename)?;
    Ok(vec![files.image, files.map, files.json])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathMode;
    use serde_json::json;
    use tempfile::tempdir;

    fn config(artifacts: &Path) -> FactoryConfig {
        FactoryConfig {
            artifacts_dir: artifacts.to_path_buf(),
            paths: PathMode::Native,
            editor: Some("/nonexistent/aseprite".to_string()),
            ..FactoryConfig::default()
        }
    }

    fn job(value: serde_json::Value) -> JobSpec {
        JobSpec::validate(&value).unwrap()
    }

    #[test]
    fn test_dry_run_writes_meta_and_script() {
        let dir = tempdir().unwrap();
        let job = job(json!({"job_id": "dry", "task": "tileset_placeholder", "output_basename": "ts"}));

        let outcome = run(&job, &config(dir.path()), &Printer::new(), true).unwrap();
        assert_eq!(outcome.job_dir, dir.path().join("dry"));
        assert!(outcome.meta.is_file());
        assert_eq!(outcome.script, dir.path().join("dry").join("tileset_placeholder.lua"));
        assert!(outcome.log.is_none());
    }

    #[test]
    fn test_missing_editor_still_leaves_meta() {
        let dir = tempdir().unwrap();
        let job = job(json!({"job_id": "noed", "task": "sprite_placeholder", "output_basename": "s"}));

        let err = run(&job, &config(dir.path()), &Printer::new(), false).unwrap_err();
        assert!(matches!(err, FactoryError::Config { .. }));
        assert!(dir.path().join("noed").join("meta.json").is_file());
        assert!(!dir.path().join("noed").join(LOG_FILENAME).exists());
    }

    #[test]
    fn test_run_job_missing_spec() {
        let dir = tempdir().unwrap();
        let result = run_job(
            &dir.path().join("missing.json"),
            &config(dir.path()),
            &Printer::new(),
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_slice_without_quantized_output() {
        let dir = tempdir().unwrap();
        let result = slice_quantized(dir.path(), "ts", &SliceOptions::default(), &Printer::new());
        assert!(matches!(result, Err(FactoryError::Build { .. })));
    }

    #[cfg(unix)]
    mod fake_editor {
        use super::*;
        use image::{Rgba, RgbaImage};
        use std::os::unix::fs::PermissionsExt;

        const COPY_INPUT: &str = r#"
for arg in "$@"; do
  case "$arg" in
    output_dir=*) out="${arg#output_dir=}" ;;
    output_basename=*) base="${arg#output_basename=}" ;;
    input_file=*) input="${arg#input_file=}" ;;
  esac
done
cp "$input" "$out/${base}_quantized.png"
"#;

        fn install(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("aseprite");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn config_with(artifacts: &Path, editor: &Path) -> FactoryConfig {
            FactoryConfig {
                editor: Some(editor.display().to_string()),
                ..config(artifacts)
            }
        }

        #[test]
        fn test_successful_run_writes_log() {
            let dir = tempdir().unwrap();
            let editor = install(dir.path(), "echo done");
            let job = job(json!({"job_id": "ok", "task": "character_sprite", "output_basename": "hero"}));

            let outcome = run(&job, &config_with(&dir.path().join("out"), &editor), &Printer::new(), false)
                .unwrap();

            let log = fs::read_to_string(outcome.log.unwrap()).unwrap();
            assert!(log.contains("--script-param output_basename=hero --script"));
            assert!(log.contains("--- stdout ---\ndone"));
            assert!(outcome.outputs.is_empty());
        }

        #[test]
        fn test_failed_run_reports_exit_code() {
            let dir = tempdir().unwrap();
            let editor = install(dir.path(), "echo 'lua error' >&2\nexit 2");
            let job = job(json!({"job_id": "bad", "task": "sprite_placeholder", "output_basename": "s"}));

            let err = run(&job, &config_with(&dir.path().join("out"), &editor), &Printer::new(), false)
                .unwrap_err();
            match err {
                FactoryError::Editor { code, log } => {
                    assert_eq!(code, 2);
                    assert!(fs::read_to_string(log).unwrap().contains("lua error"));
                }
                other => panic!("expected editor failure, got {:?}", other),
            }
        }

        #[test]
        fn test_slice_job_end_to_end() {
            let dir = tempdir().unwrap();
            let editor = install(dir.path(), COPY_INPUT);

            // four 16x16 quadrants, top-left and bottom-right identical
            let input = dir.path().join("source.png");
            let mut img = RgbaImage::from_pixel(32, 32, Rgba([40, 120, 40, 255]));
            for y in 0..16 {
                for x in 16..32 {
                    img.put_pixel(x, y, Rgba([90, 90, 90, 255]));
                }
            }
            for y in 16..32 {
                for x in 0..16 {
                    img.put_pixel(x, y, Rgba([120, 80, 40, 255]));
                }
            }
            img.save(&input).unwrap();

            let job = job(json!({
                "job_id": "slice1",
                "task": "slice_tileset",
                "output_basename": "dungeon",
                "params": {"input_file": input}
            }));

            let artifacts = dir.path().join("out");
            let outcome = run(&job, &config_with(&artifacts, &editor), &Printer::new(), false).unwrap();

            let job_dir = artifacts.join("slice1");
            assert_eq!(
                outcome.outputs,
                vec![
                    job_dir.join("dungeon.png"),
                    job_dir.join("dungeon_map.txt"),
                    job_dir.join("dungeon_tiles.json"),
                ]
            );
            assert_eq!(fs::read_to_string(job_dir.join("dungeon_map.txt")).unwrap(), "0,1\n2,0\n");

            let sheet = image::open(job_dir.join("dungeon.png")).unwrap();
            assert_eq!((sheet.width(), sheet.height()), (32, 32));

            let meta: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(job_dir.join("dungeon_tiles.json")).unwrap()).unwrap();
            assert_eq!(meta["unique_tiles"], json!(3));
        }
    }
}
