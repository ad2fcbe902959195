#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment.reference_too_short")]
    ReferenceTooShort,
    #[error("payment.unknown_method")]
    UnknownMethod,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
