//! Path translation between the runner's OS and the editor's OS.
//!
//! When the runner lives inside WSL and Aseprite is a Windows executable,
//! every path handed to the editor must be converted with `wslpath`.
//! When both run on the same OS, paths pass through unchanged.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{FactoryError, Result};

/// Converts paths between the runner's convention and the editor's.
pub trait PathTranslator {
    /// Runner path to a path the editor understands.
    fn to_target(&self, path: &Path) -> Result<String>;

    /// Editor-style path to a runner path.
    fn to_native(&self, path: &str) -> Result<PathBuf>;
}

/// Which translator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// `wsl` when running under WSL, `native` otherwise.
    #[default]
    Auto,
    Wsl,
    Native,
}

impl PathMode {
    /// Resolve `Auto` against the current environment.
    pub fn resolve(self) -> PathMode {
        match self {
            PathMode::Auto if running_under_wsl() => PathMode::Wsl,
            PathMode::Auto => PathMode::Native,
            other => other,
        }
    }

    /// Build the translator for this mode.
    pub fn translator(self) -> Box<dyn PathTranslator> {
        match self.resolve() {
            PathMode::Wsl => Box::new(WslPath::new()),
            _ => Box::new(NativePath),
        }
    }
}

fn running_under_wsl() -> bool {
    std::env::var_os("WSL_DISTRO_NAME").is_some() || std::env::var_os("WSL_INTEROP").is_some()
}

/// Identity translation for when runner and editor share an OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePath;

impl PathTranslator for NativePath {
    fn to_target(&self, path: &Path) -> Result<String> {
        Ok(path.display().to_string())
    }

    fn to_native(&self, path: &str) -> Result<PathBuf> {
        Ok(PathBuf::from(path))
    }
}

/// Translation through the `wslpath` utility.
#[derive(Debug, Clone)]
pub struct WslPath {
    program: PathBuf,
}

impl WslPath {
    pub fn new() -> Self {
        Self::with_program("wslpath")
    }

    /// Use a specific `wslpath` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, flag: &str, path: &str) -> Result<String> {
        let output = Command::new(&self.program)
            .arg(flag)
            .arg(path)
            .output()
            .map_err(|e| FactoryError::PathTranslation {
                message: format!("could not run {}: {}", self.program.display(), e),
                help: Some("Ensure the runner is executing inside WSL, or set `paths: native`".to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FactoryError::PathTranslation {
                message: format!("wslpath {} {} failed: {}", flag, path, stderr.trim()),
                help: None,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for WslPath {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTranslator for WslPath {
    fn to_target(&self, path: &Path) -> Result<String> {
        self.run("-w", &path.to_string_lossy())
    }

    fn to_native(&self, path: &str) -> Result<PathBuf> {
        self.run("-u", path).map(PathBuf::from)
    }
}
