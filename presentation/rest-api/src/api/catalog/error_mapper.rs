use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::product::errors::ProductError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};

impl IntoErrorResponse for ProductError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            ProductError::NotFound => {
                error_response(StatusCode::NOT_FOUND, "NotFound", "product.not_found")
            }
            ProductError::Repository(err) => err.into_error_response(),
        }
    }
}
