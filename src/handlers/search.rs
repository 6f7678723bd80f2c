// handlers/search.rs - POST /api/products/search

use axum::{body::Body, extract::{Extension, State}, Json};
use serde_json::Value;
use tracing::{error, info};

use crate::app::AppState;
use crate::database::{DatabaseError, ProductQuery};
use crate::error::ApiError;
use crate::middleware::ApiClient;
use crate::types::{PageNumber, PaginationMeta, SearchRequest, SearchResponse, PAGE_SIZE};

/**
 * POST /api/products/search - Page through products by vendor
 *
 * Requires the `x-api-key` header (checked by `api_key_middleware`).
 *
 * Expected Input:
 * ```json
 * { "vendor": "acme", "page": 1 }
 * ```
 *
 * Expected Output (Success):
 * ```json
 * {
 *   "products": [ { "vendor": "Acme Corp", "updated_at": "...", ... } ],
 *   "meta": { "totalItems": 3, "totalPages": 1, "currentPage": 1, "pageSize": 10 }
 * }
 * ```
 *
 * Pages below 1 are clamped to 1, not rejected.
 */
pub async fn search_post(
    State(state): State<AppState>,
    Extension(client): Extension<ApiClient>,
    body: Body,
) -> Result<Json<SearchResponse>, ApiError> {
    let bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| {
            error!("Error processing product search request: {}", e);
            ApiError::Unexpected
        })?;

    let request = parse_search_request(&bytes)?;

    info!(
        "Fetching products with filter: vendor={}, page: {}, limit: {} (key {})",
        request.vendor,
        request.page.value(),
        PAGE_SIZE,
        client.key_id
    );

    let query = ProductQuery::vendor_search(&request.vendor, request.page);
    let page = state.store.search(&query).await.map_err(store_error)?;

    Ok(Json(SearchResponse {
        products: page.rows,
        meta: PaginationMeta::new(page.count.unwrap_or(0), request.page),
    }))
}

/// Only a zero-length body counts as empty; whitespace is malformed JSON.
pub fn parse_search_request(bytes: &[u8]) -> Result<SearchRequest, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::body_required());
    }

    let body: Value = serde_json::from_slice(bytes).map_err(|e| {
        error!("Failed to parse request JSON: {}", e);
        ApiError::malformed_json()
    })?;

    validate_search_request(&body)
}

/// Fields other than `vendor` and `page` are ignored.
pub fn validate_search_request(body: &Value) -> Result<SearchRequest, ApiError> {
    let vendor = body
        .get("vendor")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|vendor| !vendor.is_empty())
        .ok_or_else(ApiError::vendor_required)?;

    let page = body
        .get("page")
        .and_then(Value::as_f64)
        .ok_or_else(ApiError::page_required)?;

    Ok(SearchRequest {
        vendor: vendor.to_string(),
        page: PageNumber::clamped(page),
    })
}

fn store_error(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::Sqlx(_) | DatabaseError::QueryError(_) | DatabaseError::InvalidRow(_) => {
            error!("Product query error: {}", err);
            ApiError::DatabaseQuery
        }
        other => {
            error!("Error processing product search request: {}", other);
            ApiError::Unexpected
        }
    }
}
