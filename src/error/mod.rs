//! Error handling for the survey analysis.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

pub mod util;

/// Specialized error type for survey loading, cleaning and rendering
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// Error opening or reading a file
    #[error("IO error{}: {source}", path_suffix(.path.as_ref()))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Error raised by an Arrow kernel or the CSV reader
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error writing the JSON summary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A requested column does not exist in the dataset
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A requested column has no question text in the schema file
    #[error("No question text for column '{column}'")]
    QuestionNotFound { column: String },

    /// Two arrays that must line up do not
    #[error("Length mismatch: expected {expected} rows, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A column does not have the type an operation needs
    #[error("Column '{column}' has type {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else, usually carrying `anyhow` context
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn path_suffix(path: Option<&PathBuf>) -> String {
    path.map(|p| format!(" ({})", p.display())).unwrap_or_default()
}

impl From<io::Error> for SurveyError {
    fn from(source: io::Error) -> Self {
        Self::Io { path: None, source }
    }
}

impl SurveyError {
    /// IO error tied to a specific path
    pub fn io_at(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Column lookup failure
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }
}

/// Result type for survey operations
pub type Result<T> = std::result::Result<T, SurveyError>;
