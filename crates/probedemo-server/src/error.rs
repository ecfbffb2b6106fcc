//! HTTP mapping for `ProbeError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use probedemo_core::error::{ClientCode, ProbeError};

/// Newtype so handlers can return `Result<_, HttpError>` and use `?`.
#[derive(Debug)]
pub struct HttpError(pub ProbeError);

impl From<ProbeError> for HttpError {
    fn from(e: ProbeError) -> Self {
        Self(e)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        if !self.0.is_request_failure() {
            tracing::error!(error = %self.0, "request failed outside simulated paths");
        }
        let status = match code {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Interrupted | ClientCode::SimulatedFailure | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
