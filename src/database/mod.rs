pub mod api_keys;
pub mod manager;
pub mod products;
pub mod query_builder;

pub use api_keys::{hash_api_key, ApiKeyInfo, ApiKeyVerifier, PgApiKeyVerifier};
pub use manager::{DatabaseError, DatabaseManager};
pub use products::{CountMode, PgProductStore, ProductOrder, ProductPage, ProductQuery, ProductStore, RowRange};
