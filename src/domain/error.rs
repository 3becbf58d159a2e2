use std::path::PathBuf;

use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

/// Every way an export run can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("forge returned HTTP {status} for {url}")]
    Http { status: u16, url: String },
    #[error("invalid JSON payload from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("timestamp '{value}' does not match YYYY-MM-DDTHH:MM:SSZ")]
    Format {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("issue record is missing field '{field}'")]
    MissingField { field: String },
    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
