use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::checkout::errors::CheckoutError;
use business::domain::payment::errors::PaymentError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};

impl IntoErrorResponse for PaymentError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            PaymentError::ReferenceTooShort => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "payment.reference_too_short",
            ),
            PaymentError::UnknownMethod => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "payment.unknown_method",
            ),
            PaymentError::Repository(err) => err.into_error_response(),
        }
    }
}

impl IntoErrorResponse for CheckoutError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let user_message = self.user_message().map(str::to_string);
        let (status, mut json) = match self {
            CheckoutError::MissingRequiredFields(fields) => {
                let (status, mut json) = error_response(
                    StatusCode::BAD_REQUEST,
                    "ValidationError",
                    "checkout.missing_required_fields",
                );
                json.0.fields = Some(fields.iter().map(|f| f.to_string()).collect());
                (status, json)
            }
            CheckoutError::EmailRequired => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "checkout.email_required",
            ),
            CheckoutError::EmptyCart => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "checkout.empty_cart",
            ),
            CheckoutError::InvalidTransition { from, to } => {
                tracing::debug!("Rejected checkout transition {from} -> {to}");
                error_response(
                    StatusCode::CONFLICT,
                    "InvalidTransition",
                    "checkout.invalid_transition",
                )
            }
            CheckoutError::CodConfirmationNotOpen => error_response(
                StatusCode::CONFLICT,
                "InvalidTransition",
                "checkout.cod_confirmation_not_open",
            ),
            CheckoutError::Payment(err) => err.into_error_response(),
            CheckoutError::Order(err) => err.into_error_response(),
            CheckoutError::Cart(err) => err.into_error_response(),
        };
        json.0.user_message = user_message;
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::checkout::address::AddressField;
    use business::domain::checkout::flow::CheckoutStep;
    use business::domain::errors::RepositoryError;
    use business::domain::order::errors::OrderError;

    #[test]
    fn should_list_missing_fields_with_customer_message() {
        let err = CheckoutError::MissingRequiredFields(vec![AddressField::Phone]);

        let (status, json) = err.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.fields, Some(vec!["phone".to_string()]));
        assert_eq!(
            json.0.user_message.as_deref(),
            Some("Please fill all required fields")
        );
    }

    #[test]
    fn should_map_invalid_transition_to_conflict() {
        let err = CheckoutError::InvalidTransition {
            from: CheckoutStep::Address,
            to: CheckoutStep::Payment,
        };

        let (status, json) = err.into_error_response();

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json.0.message, "checkout.invalid_transition");
    }

    #[test]
    fn should_map_short_reference_to_bad_request() {
        let (status, json) =
            CheckoutError::Payment(PaymentError::ReferenceTooShort).into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json.0.user_message.as_deref(),
            Some("Please enter a valid UTR/transaction number")
        );
    }

    #[test]
    fn should_map_submission_timeout_to_gateway_timeout() {
        let err = CheckoutError::Order(OrderError::Repository(RepositoryError::Timeout));

        let (status, _) = err.into_error_response();

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }
}
