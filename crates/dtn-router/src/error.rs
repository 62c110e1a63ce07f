use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("router configuration error: {0}")]
    Config(String),
}

pub type RouterResult<T> = Result<T, RouterError>;
