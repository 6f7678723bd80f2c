use serde_json::Value;
use sqlx::{postgres::{PgArguments, PgPool, PgRow}, Row};

use crate::database::manager::DatabaseError;
use crate::filter::SqlResult;

type PgQuery<'q> = sqlx::query::Query<'q, sqlx::Postgres, PgArguments>;

/// Prepares a rendered statement with its parameters bound in order.
pub fn prepare(sql_result: &SqlResult) -> PgQuery<'_> {
    let mut q = sqlx::query(&sql_result.query);
    for p in sql_result.params.iter() {
        q = bind_param_query(q, p);
    }
    q
}

pub async fn fetch_all(pool: &PgPool, sql_result: &SqlResult) -> Result<Vec<PgRow>, DatabaseError> {
    Ok(prepare(sql_result).fetch_all(pool).await?)
}

pub async fn fetch_optional(pool: &PgPool, sql_result: &SqlResult) -> Result<Option<PgRow>, DatabaseError> {
    Ok(prepare(sql_result).fetch_optional(pool).await?)
}

/// Runs a statement rendered by `Filter::to_count_sql`.
pub async fn fetch_count(pool: &PgPool, sql_result: &SqlResult) -> Result<i64, DatabaseError> {
    let row = prepare(sql_result).fetch_one(pool).await?;
    let count: i64 = row.try_get("count")?;
    Ok(count)
}

fn bind_param_query<'q>(q: PgQuery<'q>, v: &'q Value) -> PgQuery<'q> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                // Postgres has no unsigned 64-bit type
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()), // JSONB
    }
}
