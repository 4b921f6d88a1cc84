use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::dispatcher::ApiResponse;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure taxonomy for a single dispatched request.
///
/// Every variant is turned into an [`ApiResponse`] at the dispatcher boundary,
/// so nothing escapes the request handler as a panic or a transport error.
#[derive(Debug)]
pub enum ApiError {
    /// No route matches the method and path
    RouteNotFound,
    /// Request body missing, not JSON, or lacking the required string fields
    MalformedInput(String),
    /// Key-value store call failed
    Store(anyhow::Error),
    /// Response body could not be serialized
    Serialization(serde_json::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            // Client input faults stay on the 500 path to match the deployed contract.
            ApiError::MalformedInput(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(_) | ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Text for the `error` field, or `None` for a route miss, which answers
    /// with the gateway's `message` body instead
    fn failure_message(&self) -> Option<String> {
        match self {
            ApiError::RouteNotFound => None,
            ApiError::MalformedInput(msg) => Some(format!("Invalid request body: {}", msg)),
            ApiError::Store(err) => Some(format!("Store error: {:#}", err)),
            ApiError::Serialization(err) => Some(format!("Serialization error: {}", err)),
        }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        let status = err.status_code();
        let body = match err.failure_message() {
            None => serde_json::json!({ "message": "Not Found" }),
            Some(error_message) => {
                tracing::error!("Request failed with {}: {}", status, error_message);
                serde_json::json!({ "error": error_message })
            }
        };

        ApiResponse::new(status, body.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiResponse::from(self).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Store(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err)
    }
}
