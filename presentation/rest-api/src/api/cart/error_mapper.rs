use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;
use business::domain::cart::guest_store::StoreError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            CartError::InvalidQuantity => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "cart.invalid_quantity",
            ),
            CartError::LineNotFound => {
                error_response(StatusCode::NOT_FOUND, "NotFound", "cart.line_not_found")
            }
            CartError::ProductNotFound => {
                error_response(StatusCode::NOT_FOUND, "NotFound", "product.not_found")
            }
            CartError::Storage(err) => {
                let message = match err {
                    StoreError::QuotaExceeded => "store.quota_exceeded",
                    StoreError::Unavailable => "store.unavailable",
                };
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "StorageError", message)
            }
            CartError::Repository(err) => err.into_error_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::RepositoryError;

    #[test]
    fn should_map_missing_line_to_not_found() {
        let (status, json) = CartError::LineNotFound.into_error_response();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json.0.message, "cart.line_not_found");
    }

    #[test]
    fn should_map_unknown_product_to_not_found() {
        let (status, json) = CartError::ProductNotFound.into_error_response();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json.0.message, "product.not_found");
    }

    #[test]
    fn should_map_gateway_timeout() {
        let (status, _) = CartError::Repository(RepositoryError::Timeout).into_error_response();

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }
}
