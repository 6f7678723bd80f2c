// handlers/mod.rs - HTTP endpoints
//
// Public:    GET /, GET /health
// Protected: POST /api/products/search (x-api-key required, see middleware::api_key)

pub mod health;
pub mod search;
