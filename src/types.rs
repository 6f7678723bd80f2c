//! Request, response and row types shared by handlers and stores.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Rows per page. Not client-configurable.
pub const PAGE_SIZE: i64 = 10;

/// A product row as returned by the store. The handler never looks inside it;
/// the accessors exist for stores that filter and order in process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(pub Map<String, Value>);

impl Product {
    pub fn vendor(&self) -> Option<&str> {
        self.0.get("vendor").and_then(Value::as_str)
    }

    /// Accepts RFC 3339 timestamps as well as Postgres `timestamp` values without an offset.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.get("updated_at")?.as_str()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

impl TryFrom<Value> for Product {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Product(map)),
            other => Err(other),
        }
    }
}

/// Requested page after clamping to at least 1.
///
/// JSON numbers may be fractional, so the page is kept as `f64` and written
/// back as an integer whenever it has no fractional part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageNumber(f64);

impl PageNumber {
    pub fn clamped(requested: f64) -> Self {
        Self(requested.max(1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Index of the first row on this page. Fractional offsets round down.
    pub fn offset(self, page_size: i64) -> i64 {
        ((self.0 - 1.0) * page_size as f64).floor() as i64
    }
}

impl Serialize for PageNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0 < i64::MAX as f64 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// Validated body of a search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Already trimmed, never empty
    pub vendor: String,
    pub page: PageNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: PageNumber,
    pub page_size: i64,
}

impl PaginationMeta {
    pub fn new(total_items: i64, current_page: PageNumber) -> Self {
        let total_items = total_items.max(0);
        Self {
            total_items,
            total_pages: (total_items + PAGE_SIZE - 1) / PAGE_SIZE,
            current_page,
            page_size: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
    pub meta: PaginationMeta,
}
