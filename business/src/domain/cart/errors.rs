use crate::domain::cart::guest_store::StoreError;
use crate::domain::errors::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.invalid_quantity")]
    InvalidQuantity,
    #[error("cart.line_not_found")]
    LineNotFound,
    #[error("product.not_found")]
    ProductNotFound,
    #[error("cart.storage_unavailable")]
    Storage(#[from] StoreError),
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl CartError {
    /// Maps a gateway miss to the cart's own not-found error.
    pub fn from_repository(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => CartError::LineNotFound,
            other => CartError::Repository(other),
        }
    }
}
