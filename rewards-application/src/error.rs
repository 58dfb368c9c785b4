use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("store access failed: {0}")]
    StoreAccess(#[from] anyhow::Error),
}
