use thiserror::Error;

/// Error type for factor construction and grouped aggregation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Shape mismatch: expected {expected} measurements, found {actual}")]
    InputShape { expected: usize, actual: usize },

    #[error("Invalid method '{name}': supported methods are {supported}")]
    InvalidMethod { name: String, supported: String },

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Input is not a flat sequence: {0}")]
    NotFlat(String),

    #[error("Invalid level assignment: {0}")]
    InvalidLevel(String),

    #[error("Division error: {0}")]
    Division(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

// Alias kept for callers that prefer a crate-qualified name
pub type FtoolsError = Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
