use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
