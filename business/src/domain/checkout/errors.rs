use super::address::AddressField;
use super::flow::CheckoutStep;
use crate::domain::cart::errors::CartError;
use crate::domain::order::errors::OrderError;
use crate::domain::payment::errors::PaymentError;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("checkout.missing_required_fields")]
    MissingRequiredFields(Vec<AddressField>),
    #[error("checkout.email_required")]
    EmailRequired,
    #[error("checkout.empty_cart")]
    EmptyCart,
    #[error("checkout.invalid_transition")]
    InvalidTransition {
        from: CheckoutStep,
        to: CheckoutStep,
    },
    #[error("checkout.cod_confirmation_not_open")]
    CodConfirmationNotOpen,
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Cart(#[from] CartError),
}

impl CheckoutError {
    /// Text shown to the customer for validation failures.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            CheckoutError::MissingRequiredFields(_) => Some("Please fill all required fields"),
            CheckoutError::EmailRequired => Some("Please enter your email address"),
            CheckoutError::EmptyCart => Some("Your cart is empty"),
            CheckoutError::Payment(PaymentError::ReferenceTooShort) => {
                Some("Please enter a valid UTR/transaction number")
            }
            _ => None,
        }
    }
}
