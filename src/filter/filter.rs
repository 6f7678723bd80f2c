use serde_json::Value;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterOp, FilterOrderInfo, FilterWhereInfo, SelectClause, SortDirection, SqlResult};

const ROW_ALIAS: &str = "t";

/// Builds parameterized SELECT and COUNT statements against a single table.
pub struct Filter {
    table_name: String,
    select: SelectClause,
    conditions: Vec<FilterWhereInfo>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        Self::validate_table_name(&table_name)?;
        Ok(Self {
            table_name,
            select: SelectClause::All,
            conditions: vec![],
            order_data: vec![],
            limit: None,
            offset: None,
        })
    }

    pub fn select(&mut self, columns: Vec<String>) -> Result<&mut Self, FilterError> {
        for column in &columns {
            Self::validate_column(column)?;
        }
        self.select = SelectClause::Columns(columns);
        Ok(self)
    }

    pub fn select_row_json(&mut self) -> &mut Self {
        self.select = SelectClause::RowJson;
        self
    }

    pub fn where_eq(&mut self, column: &str, value: Value) -> Result<&mut Self, FilterError> {
        self.push_condition(column, FilterOp::Eq, value)
    }

    pub fn where_ilike(&mut self, column: &str, pattern: impl Into<String>) -> Result<&mut Self, FilterError> {
        self.push_condition(column, FilterOp::ILike, Value::String(pattern.into()))
    }

    pub fn order(&mut self, column: &str, sort: SortDirection) -> Result<&mut Self, FilterError> {
        Self::validate_column(column)?;
        self.order_data.push(FilterOrderInfo { column: column.to_string(), sort });
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64, offset: Option<i64>) -> Result<&mut Self, FilterError> {
        if limit < 0 { return Err(FilterError::InvalidRange("Limit must be non-negative".to_string())); }
        if let Some(off) = offset { if off < 0 { return Err(FilterError::InvalidRange("Offset must be non-negative".to_string())); } }
        self.limit = Some(limit);
        self.offset = offset;
        Ok(self)
    }

    /// Inclusive row window, `from..=to`, zero-based.
    pub fn range(&mut self, from: i64, to: i64) -> Result<&mut Self, FilterError> {
        if to < from {
            return Err(FilterError::InvalidRange(format!("Range end {} precedes start {}", to, from)));
        }
        self.limit(to - from + 1, Some(from))
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql()?;
        let query = [
            format!("SELECT {}", self.build_select_clause()),
            self.build_from_clause(),
            Self::build_where_clause(&where_result.query),
            FilterOrder::generate(&self.order_data),
            self.build_limit_clause(),
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");

        Ok(SqlResult { query, params: where_result.params })
    }

    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        let (query, params) = FilterWhere::generate(&self.conditions, 0)?;
        Ok(SqlResult { query, params })
    }

    /// Counts every row matching the conditions, ignoring order and window.
    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql()?;
        let query = [
            format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table_name),
            Self::build_where_clause(&where_result.query),
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");
        Ok(SqlResult { query, params: where_result.params })
    }

    fn push_condition(&mut self, column: &str, operator: FilterOp, data: Value) -> Result<&mut Self, FilterError> {
        Self::validate_column(column)?;
        self.conditions.push(FilterWhereInfo { column: column.to_string(), operator, data });
        Ok(self)
    }

    fn is_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || c == '_')
    }

    fn validate_table_name(name: &str) -> Result<(), FilterError> {
        if name.is_empty() { return Err(FilterError::InvalidTableName("Table name cannot be empty".to_string())); }
        if !Self::is_identifier(name) {
            return Err(FilterError::InvalidTableName(format!("Invalid table name format: {}", name)));
        }
        Ok(())
    }

    fn validate_column(column: &str) -> Result<(), FilterError> {
        if column.is_empty() { return Err(FilterError::InvalidColumn("Column name cannot be empty".to_string())); }
        if !Self::is_identifier(column) {
            return Err(FilterError::InvalidColumn(format!("Invalid column name format: {}", column)));
        }
        Ok(())
    }

    fn build_select_clause(&self) -> String {
        match &self.select {
            SelectClause::All => "*".to_string(),
            SelectClause::Columns(columns) if columns.is_empty() => "*".to_string(),
            SelectClause::Columns(columns) => columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", "),
            SelectClause::RowJson => format!("to_jsonb(\"{}\") AS row", ROW_ALIAS),
        }
    }

    fn build_from_clause(&self) -> String {
        match self.select {
            SelectClause::RowJson => format!("FROM \"{}\" AS \"{}\"", self.table_name, ROW_ALIAS),
            _ => format!("FROM \"{}\"", self.table_name),
        }
    }

    fn build_where_clause(conditions: &str) -> String {
        if conditions.is_empty() { String::new() } else { format!("WHERE {}", conditions) }
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            _ => String::new(),
        }
    }
}
