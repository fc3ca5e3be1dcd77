use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can end a conversion run. None of them are recoverable.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Invalid or incomplete command-line arguments
    #[error("{0}")]
    Usage(String),

    /// No parser or writer exists for the requested format
    #[error("the {kind} module for format '{name}' has not yet been developed")]
    UnsupportedFormat { kind: &'static str, name: String },

    /// A trackpoint is missing a required field or carries an unreadable value
    #[error("{}", malformed_message(.point, .reason))]
    MalformedInput { point: Option<usize>, reason: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    pub fn usage(message: impl Into<String>) -> Self {
        ConvertError::Usage(message.into())
    }

    pub fn malformed_at(point: usize, reason: impl Into<String>) -> Self {
        ConvertError::MalformedInput {
            point: Some(point),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status reported by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::Usage(_) => 2,
            ConvertError::UnsupportedFormat { .. } => 3,
            ConvertError::MalformedInput { .. } => 4,
            ConvertError::Io { .. } | ConvertError::Csv(_) | ConvertError::Json(_) => 1,
        }
    }
}

fn malformed_message(point: &Option<usize>, reason: &str) -> String {
    match point {
        Some(index) => format!("malformed input at point {}: {}", index, reason),
        None => format!("malformed input: {}", reason),
    }
}
