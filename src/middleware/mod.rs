pub mod api_key;
pub mod logging;

pub use api_key::{api_key_middleware, ApiClient, API_KEY_HEADER};
pub use logging::request_logging_middleware;
