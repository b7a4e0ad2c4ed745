use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid {field} filter: '{value}'")]
    InvalidFilter { field: &'static str, value: String },

    #[error("Invalid customer record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Cannot parse {path}: {source}")]
    Serialization {
        path:   String,
        source: serde_json::Error,
    },

    #[error("Cannot read {path}: {source}")]
    Io {
        path:   String,
        source: std::io::Error,
    },
}

impl DashError {
    /// Recoverable conditions the presentation layer shows as feedback.
    /// Everything else is a load-time failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidFilter { .. })
    }
}

pub type DashResult<T> = Result<T, DashError>;
