//! Validate command: check job specs without running them.

use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::error::{FactoryError, Result};
use crate::job::JobSpec;
use crate::output::{display_path, plural, Printer};

/// Validate job specs without running them
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Job spec files, or directories searched for *.json
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Result of validating one file.
#[derive(Debug)]
pub struct Checked {
    pub path: PathBuf,
    pub result: Result<JobSpec>,
}

/// Expand directories into the JSON files beneath them, sorted by path.
pub fn collect_specs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_json(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Validate every file, collecting results rather than stopping at the first failure.
pub fn check_all(paths: &[PathBuf]) -> Vec<Checked> {
    collect_specs(paths)
        .into_iter()
        .map(|path| {
            let result = JobSpec::load(&path);
            Checked { path, result }
        })
        .collect()
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let checked = check_all(&args.paths);
    let mut failures = 0;

    for item in &checked {
        let display = display_path(&item.path);
        match &item.result {
            Ok(job) => printer.status(
                "Valid",
                &format!("{} {}", display, printer.dim(&format!("({}: {})", job.job_id, job.task))),
            ),
            Err(e) => {
                failures += 1;
                printer.error("Invalid", &format!("{}: {}", display, e));
            }
        }
    }

    if failures > 0 {
        return Err(FactoryError::Job {
            message: format!(
                "{} of {} failed validation",
                plural(failures, "job spec", "job specs"),
                checked.len()
            ),
            help: None,
        });
    }

    printer.success("Finished", &format!("{} valid", plural(checked.len(), "job spec", "job specs")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_specs_walks_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("nested").join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_specs(&[dir.path().to_path_buf()]);
        assert_eq!(
            files,
            vec![dir.path().join("b.json"), dir.path().join("nested").join("a.json")]
        );
    }

    #[test]
    fn test_check_all_reports_each_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("good.json"),
            r#"{"job_id": "ok", "task": "sprite_placeholder", "output_basename": "s"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("bad.json"),
            r#"{"job_id": "bad id", "task": "sprite_placeholder", "output_basename": "s"}"#,
        )
        .unwrap();

        let checked = check_all(&[dir.path().to_path_buf()]);
        assert_eq!(checked.len(), 2);
        assert!(checked[0].result.is_err());
        assert!(checked[1].result.is_ok());
    }

    #[test]
    fn test_run_fails_on_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let args = ValidateArgs { paths: vec![path] };
        assert!(run(args, &Printer::with_color(false)).is_err());
    }
}
