//! Running Aseprite in batch mode.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{FactoryError, Result};

/// Script parameters every generated script reads.
pub const REQUIRED_PARAMS: &[&str] = &["output_dir", "output_basename"];

/// A prepared batch-mode command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    script: String,
    params: Vec<(String, String)>,
}

/// A successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub code: i32,
    pub log: PathBuf,
}

impl Invocation {
    /// Prepare an invocation.
    ///
    /// `script` is already in the editor's path convention. Fails if a
    /// required script parameter is missing or empty, so nothing is launched
    /// without an output location.
    pub fn new(
        program: impl Into<PathBuf>,
        script: impl Into<String>,
        params: Vec<(String, String)>,
    ) -> Result<Self> {
        for required in REQUIRED_PARAMS {
            let present = params
                .iter()
                .any(|(key, value)| key == required && !value.is_empty());
            if !present {
                return Err(FactoryError::Job {
                    message: format!("missing script parameter '{}'", required),
                    help: Some("Every job needs an output location before the editor runs".to_string()),
                });
            }
        }

        Ok(Self {
            program: program.into(),
            script: script.into(),
            params,
        })
    }

    /// Arguments after the program: `-b`, each `--script-param`, then `--script`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-b".to_string()];
        for (key, value) in &self.params {
            args.push("--script-param".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push("--script".to_string());
        args.push(self.script.clone());
        args
    }

    /// The command as one printable line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args())
            .map(|a| if a.contains(' ') { format!("\"{}\"", a) } else { a })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion, writing captured output to `log_path`.
    ///
    /// Success is decided by exit status alone. The log is written whether
    /// or not the editor succeeds.
    pub fn run(&self, log_path: &Path) -> Result<RunOutcome> {
        let output = Command::new(&self.program)
            .args(self.args())
            .output()
            .map_err(|e| FactoryError::Io {
                path: self.program.clone(),
                message: format!("Failed to launch Aseprite: {}", e),
            })?;

        let code = output.status.code().unwrap_or(-1);
        let log = format!(
            "Command:\n{}\n\n--- stdout ---\n{}\n--- stderr ---\n{}\n--- exit status: {} ---\n",
            self.command_line(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
            code
        );
        fs::write(log_path, log).map_err(|e| FactoryError::Io {
            path: log_path.to_path_buf(),
            message: format!("Failed to write log: {}", e),
        })?;

        if !output.status.success() {
            return Err(FactoryError::Editor {
                code,
                log: log_path.to_path_buf(),
            });
        }

        Ok(RunOutcome {
            code,
            log: log_path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_output_dir_rejected() {
        let err = Invocation::new("aseprite", "job.lua", params(&[("output_basename", "hero")]))
            .unwrap_err();
        assert!(err.to_string().contains("output_dir"));
    }

    #[test]
    fn test_empty_output_basename_rejected() {
        let result = Invocation::new(
            "aseprite",
            "job.lua",
            params(&[("output_dir", "/tmp"), ("output_basename", "")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_args_order() {
        let inv = Invocation::new(
            "aseprite",
            "C:\\jobs\\a.lua",
            params(&[("output_dir", "C:\\out"), ("output_basename", "hero")]),
        )
        .unwrap();

        assert_eq!(
            inv.args(),
            vec![
                "-b",
                "--script-param",
                "output_dir=C:\\out",
                "--script-param",
                "output_basename=hero",
                "--script",
                "C:\\jobs\\a.lua",
            ]
        );
    }

    #[test]
    fn test_command_line_quotes_spaces() {
        let inv = Invocation::new(
            "/mnt/c/Program Files/Aseprite/aseprite.exe",
            "a.lua",
            params(&[("output_dir", "out dir"), ("output_basename", "x")]),
        )
        .unwrap();
        let line = inv.command_line();
        assert!(line.starts_with("\"/mnt/c/Program Files/Aseprite/aseprite.exe\" -b"));
        assert!(line.contains("\"output_dir=out dir\""));
    }

    #[test]
    fn test_launch_failure() {
        let dir = tempdir().unwrap();
        let inv = Invocation::new(
            "/nonexistent/aseprite",
            "a.lua",
            params(&[("output_dir", "o"), ("output_basename", "b")]),
        )
        .unwrap();
        assert!(inv.run(&dir.path().join("logs.txt")).is_err());
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn fake_editor(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-aseprite");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_success_captures_output() {
            let dir = tempdir().unwrap();
            let exe = fake_editor(dir.path(), "echo \"args: $*\"\necho oops >&2\nexit 0");
            let inv = Invocation::new(
                &exe,
                "job.lua",
                params(&[("output_dir", "o"), ("output_basename", "b")]),
            )
            .unwrap();

            let log_path = dir.path().join("logs.txt");
            let outcome = inv.run(&log_path).unwrap();
            assert_eq!(outcome.code, 0);

            let log = fs::read_to_string(&log_path).unwrap();
            assert!(log.starts_with("Command:\n"));
            assert!(log.contains("args: -b --script-param output_dir=o --script-param output_basename=b --script job.lua"));
            assert!(log.contains("--- stderr ---\noops"));
        }

        #[test]
        fn test_nonzero_exit_is_failure_with_log() {
            let dir = tempdir().unwrap();
            let exe = fake_editor(dir.path(), "echo 'script error' >&2\nexit 3");
            let inv = Invocation::new(
                &exe,
                "job.lua",
                params(&[("output_dir", "o"), ("output_basename", "b")]),
            )
            .unwrap();

            let log_path = dir.path().join("logs.txt");
            match inv.run(&log_path) {
                Err(FactoryError::Editor { code, log }) => {
                    assert_eq!(code, 3);
                    assert_eq!(log, log_path);
                }
                other => panic!("expected editor failure, got {:?}", other),
            }
            assert!(fs::read_to_string(&log_path).unwrap().contains("script error"));
        }
    }
}
