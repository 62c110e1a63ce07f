use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventsError {
    #[error("event trace parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EventsResult<T> = Result<T, EventsError>;
