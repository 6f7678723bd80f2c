use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::ApiKeyInfo;
use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Verified caller, available to handlers as a request extension
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub key_id: Uuid,
    pub name: Option<String>,
}

/// Rejects requests without a valid `x-api-key` before the handler runs.
/// The verifier's rejection reason is logged and never returned.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = extract_api_key(request.headers())?;

    let info = state.verifier.verify(&api_key).await.map_err(|e| {
        error!("API key verification failed: {}", e);
        ApiError::Unexpected
    })?;

    match info {
        ApiKeyInfo::Valid { key_id, name } => {
            request.extensions_mut().insert(ApiClient { key_id, name });
            Ok(next.run(request).await)
        }
        ApiKeyInfo::Invalid { reason } => {
            warn!("Invalid API key attempt: {}", reason);
            Err(ApiError::invalid_api_key())
        }
    }
}

/// An empty header counts as missing
fn extract_api_key(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = match headers.get(API_KEY_HEADER) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ApiError::missing_api_key()),
    };

    match value.to_str() {
        Ok(key) => Ok(key.to_string()),
        Err(_) => {
            warn!("Invalid API key attempt: header is not visible ASCII");
            Err(ApiError::invalid_api_key())
        }
    }
}
