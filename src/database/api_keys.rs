use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::query_builder;
use crate::filter::Filter;

/// Outcome of checking a presented API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyInfo {
    Valid { key_id: Uuid, name: Option<String> },
    /// The reason is for server logs only
    Invalid { reason: String },
}

impl ApiKeyInfo {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ApiKeyInfo::Invalid { reason: reason.into() }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ApiKeyInfo::Valid { .. })
    }
}

#[async_trait]
pub trait ApiKeyVerifier: Send + Sync {
    async fn verify(&self, api_key: &str) -> Result<ApiKeyInfo, DatabaseError>;
}

/// Keys are stored as lowercase hex SHA-256 digests, never in clear.
pub fn hash_api_key(api_key: &str) -> String {
    format!("{:x}", Sha256::digest(api_key.as_bytes()))
}

/// Looks keys up in a table shaped like
/// `(id uuid, name text, key_hash text, is_active bool, expires_at timestamptz)`.
pub struct PgApiKeyVerifier {
    pool: PgPool,
    table_name: String,
}

impl PgApiKeyVerifier {
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
        }
    }

    fn evaluate(
        key_id: Uuid,
        name: Option<String>,
        is_active: bool,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> ApiKeyInfo {
        if !is_active {
            return ApiKeyInfo::invalid("API key is inactive");
        }
        if matches!(expires_at, Some(expiry) if expiry <= now) {
            return ApiKeyInfo::invalid("API key has expired");
        }
        ApiKeyInfo::Valid { key_id, name }
    }
}

#[async_trait]
impl ApiKeyVerifier for PgApiKeyVerifier {
    async fn verify(&self, api_key: &str) -> Result<ApiKeyInfo, DatabaseError> {
        let mut filter = Filter::new(&self.table_name)?;
        filter
            .select(vec![
                "id".to_string(),
                "name".to_string(),
                "is_active".to_string(),
                "expires_at".to_string(),
            ])?
            .where_eq("key_hash", hash_api_key(api_key).into())?
            .limit(1, None)?;

        let sql = filter.to_sql()?;
        let Some(row) = query_builder::fetch_optional(&self.pool, &sql).await? else {
            return Ok(ApiKeyInfo::invalid("API key not found"));
        };

        Ok(Self::evaluate(
            row.try_get("id")?,
            row.try_get("name")?,
            row.try_get("is_active")?,
            row.try_get("expires_at")?,
            Utc::now(),
        ))
    }
}
