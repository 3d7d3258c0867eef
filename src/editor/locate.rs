//! Finding the Aseprite executable.

use std::path::PathBuf;

use crate::config::{FactoryConfig, EDITOR_ENV};
use crate::error::{FactoryError, Result};
use crate::paths::PathTranslator;

/// The editor executable in both path conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorPaths {
    /// Path the runner executes.
    pub native: PathBuf,
    /// The same executable as the editor's OS names it.
    pub target: String,
}

/// Resolve the editor executable.
///
/// A configured path (`ASEPRITE_EXE` or `editor:` in factory.yaml) must
/// exist; it may be written in either convention. Without one, each
/// conventional install location is tried in order and the first that
/// exists wins. Candidates that cannot be translated are skipped.
pub fn locate(config: &FactoryConfig, translator: &dyn PathTranslator) -> Result<EditorPaths> {
    if let Some(configured) = &config.editor {
        let paths = resolve(configured, translator)?;
        if !paths.native.exists() {
            return Err(FactoryError::Config {
                message: format!("{} not found at {}", EDITOR_ENV, configured),
                help: Some("Point ASEPRITE_EXE at aseprite.exe, in Windows or WSL form".to_string()),
            });
        }
        return Ok(paths);
    }

    for candidate in &config.editor_candidates {
        let Ok(paths) = resolve(candidate, translator) else {
            continue;
        };
        if paths.native.exists() {
            return Ok(paths);
        }
    }

    Err(FactoryError::Config {
        message: "Aseprite executable not found".to_string(),
        help: Some(format!(
            "Set {} to the Windows path (e.g. C:\\Program Files\\Aseprite\\aseprite.exe) or a native path",
            EDITOR_ENV
        )),
    })
}

fn resolve(path: &str, translator: &dyn PathTranslator) -> Result<EditorPaths> {
    if path.starts_with('/') {
        let native = PathBuf::from(path);
        let target = translator.to_target(&native)?;
        Ok(EditorPaths { native, target })
    } else {
        let native = translator.to_native(path)?;
        Ok(EditorPaths {
            native,
            target: path.to_string(),
        })
    }
}
