//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reconciliation::{ConfigSetupError, WebhookRejection};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// A required request header is absent or unusable.
    MissingHeader(&'static str),
    /// The webhook could not be processed.
    Rejected(WebhookRejection),
    /// Channel configuration could not be created.
    ConfigSetup(ConfigSetupError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingHeader(name) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required header: {name}"),
            ),
            ApiError::Rejected(rejection) => rejection_to_response(rejection),
            ApiError::ConfigSetup(err) => config_setup_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn rejection_to_response(rejection: WebhookRejection) -> (StatusCode, String) {
    match &rejection {
        WebhookRejection::AppIsNotConfigured => (StatusCode::BAD_REQUEST, rejection.to_string()),
        WebhookRejection::MalformedRequest(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, rejection.to_string())
        }
        WebhookRejection::BrokenApp(_) => {
            tracing::error!(error = %rejection, "webhook processing failed");
            (StatusCode::INTERNAL_SERVER_ERROR, rejection.to_string())
        }
    }
}

fn config_setup_error_to_response(err: ConfigSetupError) -> (StatusCode, String) {
    match &err {
        ConfigSetupError::Invalid { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ConfigSetupError::CredentialsRejected(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        ConfigSetupError::SaveFailed(_) => {
            tracing::error!(error = %err, "failed to store channel configuration");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<WebhookRejection> for ApiError {
    fn from(err: WebhookRejection) -> Self {
        ApiError::Rejected(err)
    }
}

impl From<ConfigSetupError> for ApiError {
    fn from(err: ConfigSetupError) -> Self {
        ApiError::ConfigSetup(err)
    }
}
