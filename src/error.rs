use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("input error: {0}")]
    Input(String),
    #[error("GitHub API error: {0}")]
    Api(String),
    #[error("failed to decode GitHub response: {0}")]
    Decode(String),
}

pub type AppResult<T> = Result<T, AppError>;
