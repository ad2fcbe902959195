use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::order::errors::OrderError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};

impl IntoErrorResponse for OrderError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            OrderError::EmptyCart => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "order.empty_cart",
            ),
            OrderError::Repository(err) => err.into_error_response(),
        }
    }
}
