use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use onduty_core::error::OndutyError;

/// HTTP wrapper for `OndutyError`.
#[derive(Debug)]
pub struct ApiError(pub OndutyError);

impl From<OndutyError> for ApiError {
    fn from(e: OndutyError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            OndutyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            OndutyError::Unauthorized => StatusCode::UNAUTHORIZED,
            OndutyError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            OndutyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
