use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

use business::domain::errors::RepositoryError;

#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
    /// Text to show the customer, when there is one
    #[oai(skip_serializing_if_is_none)]
    pub user_message: Option<String>,
    /// Form fields that failed validation
    #[oai(skip_serializing_if_is_none)]
    pub fields: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            user_message: None,
            fields: None,
        }
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}

impl IntoErrorResponse for (StatusCode, Json<ErrorResponse>) {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        self
    }
}

pub fn error_response(status: StatusCode, name: &str, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse::new(name, message)))
}

pub fn invalid_id(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::BAD_REQUEST, "ValidationError", message)
}

impl IntoErrorResponse for RepositoryError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            RepositoryError::Timeout => error_response(
                StatusCode::GATEWAY_TIMEOUT,
                "Timeout",
                "repository.timeout",
            ),
            RepositoryError::NotFound => {
                error_response(StatusCode::NOT_FOUND, "NotFound", "repository.not_found")
            }
            _ => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_timeout_to_gateway_timeout() {
        let (status, json) = RepositoryError::Timeout.into_error_response();

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(json.0.message, "repository.timeout");
    }

    #[test]
    fn should_hide_database_details() {
        let (status, json) = RepositoryError::DatabaseError.into_error_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.0.name, "InternalError");
        assert_eq!(json.0.message, "repository.persistence");
    }
}
