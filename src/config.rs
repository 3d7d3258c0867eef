//! Runner configuration (factory.yaml).
//!
//! The project file is optional. Values resolve in order: built-in
//! defaults, then `factory.yaml`, then environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FactoryError, Result};
use crate::paths::PathMode;

/// Default project file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "factory.yaml";

/// Environment variable naming the editor executable.
pub const EDITOR_ENV: &str = "ASEPRITE_EXE";

/// Environment variable overriding the artifacts root.
pub const ARTIFACTS_ENV: &str = "FACTORY_ARTIFACTS_DIR";

/// Conventional install locations tried when no executable is configured.
pub const DEFAULT_EDITOR_CANDIDATES: &[&str] = &[
    "C:\\Program Files\\Aseprite\\aseprite.exe",
    "C:\\Program Files (x86)\\Aseprite\\aseprite.exe",
    "C:\\Program Files (x86)\\Steam\\steamapps\\common\\Aseprite\\Aseprite.exe",
    "/usr/bin/aseprite",
    "/usr/local/bin/aseprite",
    "/Applications/Aseprite.app/Contents/MacOS/aseprite",
];

/// Runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Root under which each job gets an `<job_id>/` directory.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Editor executable, in either path convention.
    pub editor: Option<String>,

    /// Path translation mode.
    pub paths: PathMode,

    /// Install locations tried when `editor` is unset.
    #[serde(default = "default_candidates")]
    pub editor_candidates: Vec<String>,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_candidates() -> Vec<String> {
    DEFAULT_EDITOR_CANDIDATES.iter().map(|s| s.to_string()).collect()
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: default_artifacts_dir(),
            editor: None,
            paths: PathMode::Auto,
            editor_candidates: default_candidates(),
        }
    }
}

impl FactoryConfig {
    /// Load configuration from a factory.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FactoryError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| FactoryError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist; otherwise `factory.yaml` in the working
    /// directory is used when present. Environment overrides apply last.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILENAME);
                if default_path.exists() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(config.with_overrides(
            std::env::var(EDITOR_ENV).ok(),
            std::env::var_os(ARTIFACTS_ENV).map(PathBuf::from),
        ))
    }

    /// Apply environment-style overrides. Empty values are ignored.
    pub fn with_overrides(mut self, editor: Option<String>, artifacts_dir: Option<PathBuf>) -> Self {
        if let Some(editor) = editor.filter(|e| !e.trim().is_empty()) {
            self.editor = Some(editor);
        }
        if let Some(dir) = artifacts_dir.filter(|d| !d.as_os_str().is_empty()) {
            self.artifacts_dir = dir;
        }
        self
    }

    /// Artifacts directory for one job.
    pub fn job_dir(&self, job_id: &str) -> PathBuf {
        self.artifacts_dir.join(job_id)
    }
}
