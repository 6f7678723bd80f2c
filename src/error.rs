// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

pub const API_KEY_REQUIRED: &str = "API key required (x-api-key header)";
pub const INVALID_API_KEY: &str = "Invalid API key";
pub const BODY_REQUIRED: &str = "Invalid request: Request body is required with vendor and page parameters";
pub const MALFORMED_JSON: &str = "Invalid request: Request body contains malformed JSON.";
pub const VENDOR_REQUIRED: &str = "Invalid request: vendor parameter is required";
pub const PAGE_REQUIRED: &str = "Invalid request: page parameter is required and must be a number";
pub const DATABASE_QUERY_FAILED: &str = "Failed to retrieve products due to a database query error.";
pub const UNEXPECTED_SEARCH_ERROR: &str = "An unexpected error occurred while processing the search request.";

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Server errors carry a fixed public message; whatever caused them is logged
/// where they are constructed and never reaches the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(&'static str),

    // 401 Unauthorized
    Unauthorized(&'static str),

    // 500 Internal Server Error
    DatabaseQuery,
    Unexpected,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::DatabaseQuery | ApiError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::DatabaseQuery => DATABASE_QUERY_FAILED,
            ApiError::Unexpected => UNEXPECTED_SEARCH_ERROR,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn missing_api_key() -> Self {
        ApiError::Unauthorized(API_KEY_REQUIRED)
    }

    pub fn invalid_api_key() -> Self {
        ApiError::Unauthorized(INVALID_API_KEY)
    }

    pub fn body_required() -> Self {
        ApiError::BadRequest(BODY_REQUIRED)
    }

    pub fn malformed_json() -> Self {
        ApiError::BadRequest(MALFORMED_JSON)
    }

    pub fn vendor_required() -> Self {
        ApiError::BadRequest(VENDOR_REQUIRED)
    }

    pub fn page_required() -> Self {
        ApiError::BadRequest(PAGE_REQUIRED)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
