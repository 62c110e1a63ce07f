use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match host count {expected}")]
    HostCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("unknown router kind: {0}")]
    UnknownRouter(String),

    #[error("unknown movement model: {0}")]
    UnknownMovementModel(String),

    #[error("group references unknown interface: {0}")]
    UnknownInterface(String),

    #[error("scenario configuration error: {0}")]
    ScenarioConfig(#[from] dtn_config::ConfigError),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

pub type SimResult<T> = Result<T, SimError>;
