use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required key: {0}")]
    MissingKey(String),

    #[error("malformed value for key {key:?}: {reason} (got {value:?})")]
    Malformed { key: String, value: String, reason: String },

    #[error("invalid enum value for key {key:?}: {value:?} is not one of {allowed:?}")]
    InvalidEnum { key: String, value: String, allowed: &'static [&'static str] },

    #[error("{0}: malformed settings line {1:?} (expected \"key = value\")")]
    ParseLine(usize, String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
