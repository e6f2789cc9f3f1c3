//! Lumacast — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lumacast_core::error::ShowError;
use serde::Serialize;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `ShowError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub ShowError);

impl From<ShowError> for ApiError {
    fn from(err: ShowError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            ShowError::ShowNotFound => (StatusCode::NOT_FOUND, "show_not_found"),
            ShowError::PreferencesMissing => (StatusCode::BAD_REQUEST, "preferences_missing"),
            ShowError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ShowError::ConcurrencyConflict { .. } => {
                (StatusCode::CONFLICT, "concurrency_conflict")
            }
            ShowError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: ShowError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_show_not_found_maps_to_404() {
        assert_eq!(status_of(ShowError::ShowNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_preferences_missing_maps_to_400() {
        assert_eq!(
            status_of(ShowError::PreferencesMissing),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(ShowError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_concurrency_conflict_maps_to_409() {
        assert_eq!(
            status_of(ShowError::ConcurrencyConflict {
                subdomain: "demo".into(),
                expected: 3,
            }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(ShowError::Infrastructure("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
