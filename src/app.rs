use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::SecurityConfig;
use crate::database::{ApiKeyVerifier, ProductStore};
use crate::handlers;
use crate::middleware::{api_key_middleware, request_logging_middleware, API_KEY_HEADER};

/// Shared, immutable handles to the request collaborators.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn ApiKeyVerifier>,
    pub store: Arc<dyn ProductStore>,
    pub max_body_bytes: usize,
    pub request_logging: bool,
}

impl AppState {
    pub fn new(verifier: Arc<dyn ApiKeyVerifier>, store: Arc<dyn ProductStore>) -> Self {
        Self {
            verifier,
            store,
            max_body_bytes: 1024 * 1024,
            request_logging: true,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        // API key protected
        .merge(api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/products/search", post(handlers::search::search_post))
        .route_layer(middleware::from_fn_with_state(state.clone(), api_key_middleware))
        .layer(middleware::from_fn_with_state(state, request_logging_middleware))
}

/// `None` when CORS is disabled. An empty origin list allows any origin.
pub fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)]),
    )
}
