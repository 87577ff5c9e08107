use thiserror::Error;

use crate::providers::ProviderError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Upstream provider unavailable: {0}")]
    Upstream(#[from] ProviderError),

    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                CatalogError::NotFound("row not found".to_string())
            }
            other => CatalogError::Storage(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
