#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order.empty_cart")]
    EmptyCart,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
