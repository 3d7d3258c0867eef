use miette::Diagnostic;
use thiserror::Error;

/// Main error type for asefactory operations
#[derive(Error, Diagnostic, Debug)]
pub enum FactoryError {
    #[error("IO error: {0}")]
    #[diagnostic(code(asefactory::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(asefactory::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(asefactory::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid job spec: {message}")]
    #[diagnostic(code(asefactory::job))]
    Job {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(asefactory::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Path translation failed: {message}")]
    #[diagnostic(code(asefactory::paths))]
    PathTranslation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Aseprite exited with code {code}; see {} for details", .log.display())]
    #[diagnostic(code(asefactory::editor))]
    Editor { code: i32, log: std::path::PathBuf },

    #[error("Build error: {message}")]
    #[diagnostic(code(asefactory::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl FactoryError {
    /// Shorthand for a job-spec error without help text.
    pub fn job(message: impl Into<String>) -> Self {
        FactoryError::Job {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FactoryError>;
