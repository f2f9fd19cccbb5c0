// src/api/error_handling.rs
//
// Error Handling for Route Handlers
//
// ARCHITECTURE:
// - Maps internal errors to HTTP status codes
// - Provides a consistent error envelope for clients
// - Never exposes internal implementation details
// - Logs server-side errors for debugging

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper that lets handlers bubble service errors up with `?` while
/// axum turns them into responses.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            // The caller sent something malformed or invalid
            AppError::Domain(_) | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }

            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),

            // Everything else is on us; clients get a generic message and
            // the details go to the log
            other => {
                log::error!("request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_domain_and_validation_errors_map_to_bad_request() {
        let domain = ApiError(AppError::Domain(DomainError::BlankName)).into_response();
        assert_eq!(domain.status(), StatusCode::BAD_REQUEST);

        let validation = ApiError(AppError::validation("count must be positive")).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError(AppError::not_found("film with id = 9 not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_errors_map_to_500() {
        let response = ApiError(AppError::Store("lock poisoned".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
