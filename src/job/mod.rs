//! Job specs: loading and validation.
//!
//! A job spec is a JSON object:
//!
//! ```json
//! {
//!   "job_id": "hero_01",
//!   "task": "character_sprite",
//!   "output_basename": "hero",
//!   "params": { "preset": "rogue" }
//! }
//! ```

mod task;

pub use task::{
    CharacterParams, ProcessParams, SliceParams, Task, TilesetParams, MAX_SPRITE_SIZE,
    SUPPORTED_TASKS,
};

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{FactoryError, Result};

/// A validated job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    pub job_id: String,
    pub task: Task,
    pub output_basename: String,
    /// Parameters exactly as given, echoed into meta.json.
    pub params: Map<String, Value>,
}

impl JobSpec {
    /// Read and validate a job spec file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FactoryError::Io {
                path: path.to_path_buf(),
                message: format!("Job spec not found at {}", path.display()),
            });
        }

        let source = fs::read_to_string(path).map_err(|e| FactoryError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read job spec: {}", e),
        })?;

        Self::parse(&source)
    }

    /// Parse and validate a job spec from JSON text.
    pub fn parse(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source).map_err(|e| FactoryError::Parse {
            message: format!("Job spec is not valid JSON: {}", e),
            help: None,
        })?;
        Self::validate(&value)
    }

    /// Validate a parsed job document.
    pub fn validate(value: &Value) -> Result<Self> {
        let job = value
            .as_object()
            .ok_or_else(|| FactoryError::job("job spec must be a JSON object"))?;

        let job_id = required_string(job, "job_id")?;
        if !is_valid_job_id(&job_id) {
            return Err(FactoryError::Job {
                message: format!("job_id '{}' contains invalid characters", job_id),
                help: Some("Use only letters, numbers, underscore, or dash".to_string()),
            });
        }

        let task_name = required_string(job, "task")?;

        let output_basename = required_string(job, "output_basename")?;
        if !is_bare_filename(&output_basename) {
            return Err(FactoryError::Job {
                message: format!("output_basename '{}' must not contain directories", output_basename),
                help: Some("Give a file basename such as \"hero\"; outputs land in the job directory".to_string()),
            });
        }

        let params = match job.get("params") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(FactoryError::job("params must be a JSON object")),
        };

        let task = Task::from_parts(&task_name, &params)?;

        Ok(Self {
            job_id,
            task,
            output_basename,
            params,
        })
    }

    /// The job echoed back for meta.json.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "job_id": self.job_id,
            "task": self.task.name(),
            "output_basename": self.output_basename,
            "params": self.params,
        })
    }
}

fn required_string(job: &Map<String, Value>, field: &str) -> Result<String> {
    match job.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | None | Some(Value::Null) => Err(FactoryError::Job {
            message: format!("missing required field '{}'", field),
            help: Some(format!("Add a non-empty \"{}\" string to the job spec", field)),
        }),
        Some(_) => Err(FactoryError::job(format!("'{}' must be a string", field))),
    }
}

fn is_valid_job_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn is_bare_filename(name: &str) -> bool {
    name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_minimal_job() {
        let job = JobSpec::parse(
            r#"{"job_id": "demo-1", "task": "sprite_placeholder", "output_basename": "hero"}"#,
        )
        .unwrap();
        assert_eq!(job.job_id, "demo-1");
        assert_eq!(job.task, Task::SpritePlaceholder);
        assert!(job.params.is_empty());
    }

    #[test]
    fn test_missing_output_basename() {
        let err = JobSpec::validate(&json!({"job_id": "a", "task": "sprite_placeholder"})).unwrap_err();
        assert!(err.to_string().contains("output_basename"));
    }

    #[test]
    fn test_missing_task() {
        let err = JobSpec::validate(&json!({"job_id": "a", "output_basename": "b"})).unwrap_err();
        assert!(err.to_string().contains("'task'"));
    }

    #[test]
    fn test_empty_job_id() {
        let err = JobSpec::validate(&json!({"job_id": "", "task": "sprite_placeholder", "output_basename": "b"}))
            .unwrap_err();
        assert!(err.to_string().contains("job_id"));
    }

    #[test]
    fn test_job_id_charset() {
        for bad in ["../escape", "has space", "semi;colon"] {
            let value = json!({"job_id": bad, "task": "sprite_placeholder", "output_basename": "b"});
            assert!(JobSpec::validate(&value).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_basename_with_directory() {
        for bad in ["dir/file", "..", "a\\b"] {
            let value = json!({"job_id": "a", "task": "sprite_placeholder", "output_basename": bad});
            assert!(JobSpec::validate(&value).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_non_object() {
        assert!(JobSpec::validate(&json!([1, 2])).is_err());
        assert!(JobSpec::parse("not json").is_err());
    }

    #[test]
    fn test_params_must_be_object() {
        let value = json!({"job_id": "a", "task": "sprite_placeholder", "output_basename": "b", "params": [1]});
        assert!(JobSpec::validate(&value).is_err());
    }

    #[test]
    fn test_to_json_echoes_params() {
        let value = json!({
            "job_id": "tiles",
            "task": "tileset_placeholder",
            "output_basename": "ground",
            "params": {"columns": 4}
        });
        let job = JobSpec::validate(&value).unwrap();
        assert_eq!(job.to_json(), value);
        assert_eq!(
            job.task,
            Task::TilesetPlaceholder(TilesetParams { columns: 4, rows: 8 })
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(JobSpec::load(Path::new("/nonexistent/job.json")).is_err());
    }
}
