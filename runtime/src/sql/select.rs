//! SELECT builder driven by query modifiers

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;

use super::dialect::{SqlDialect, is_valid_identifier, quote_qualified};
use super::{Backend, SqliteDialect};
use crate::query::{FilterValue, QueryError, QueryTarget, SortDirection};

/// Bind filter values and the row window in placeholder order
macro_rules! bind_params {
    ($query:expr, $select:expr, $with_window:expr) => {{
        let mut query = $query;
        for value in &$select.params {
            query = match value {
                FilterValue::Text(v) => query.bind(v.clone()),
                FilterValue::Integer(v) => query.bind(*v),
                FilterValue::Float(v) => query.bind(*v),
                FilterValue::Boolean(v) => query.bind(*v),
                FilterValue::Timestamp(v) => query.bind(*v),
            };
        }
        if $with_window {
            if let Some((limit, offset)) = $select.window {
                query = query.bind(limit).bind(offset);
            }
        }
        query
    }};
}

/// IN condition: column and number of bound values
#[derive(Debug, Clone, PartialEq, Eq)]
struct InCondition {
    column: String,
    count: usize,
}

/// SELECT over a single table.
///
/// Filter values are collected in condition order and always bound as
/// parameters; column names must be plain identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    table: String,
    columns: Vec<String>,
    conditions: Vec<InCondition>,
    orderings: Vec<(String, SortDirection)>,
    window: Option<(i64, i64)>,
    params: Vec<FilterValue>,
}

impl SelectQuery {
    pub fn new(table: &str) -> Result<Self, QueryError> {
        Ok(Self {
            table: checked_identifier(table)?,
            columns: Vec::new(),
            conditions: Vec::new(),
            orderings: Vec::new(),
            window: None,
            params: Vec::new(),
        })
    }

    /// Restrict the selected columns (default `*`)
    pub fn columns(mut self, columns: &[&str]) -> Result<Self, QueryError> {
        self.columns = columns
            .iter()
            .map(|c| checked_identifier(c))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Bound filter values in placeholder order
    pub fn params(&self) -> &[FilterValue] {
        &self.params
    }

    /// Render the full SELECT for `backend`
    pub fn to_sql(&self, backend: Backend) -> String {
        self.render(backend.dialect())
    }

    /// Render the full SELECT
    pub fn render(&self, dialect: &dyn SqlDialect) -> String {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| quote_qualified(dialect, c))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!(
            "SELECT {} FROM {}",
            columns,
            quote_qualified(dialect, &self.table)
        );
        sql.push_str(&self.where_clause(dialect));

        if !self.orderings.is_empty() {
            let order: Vec<String> = self
                .orderings
                .iter()
                .map(|(col, dir)| format!("{} {}", quote_qualified(dialect, col), dir.as_sql()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        if self.window.is_some() {
            let next = self.params.len() + 1;
            sql.push(' ');
            sql.push_str(&dialect.limit_offset(next, next + 1));
        }

        sql
    }

    /// Render `SELECT COUNT(*)` with the same conditions, ignoring order and window
    pub fn render_count(&self, dialect: &dyn SqlDialect) -> String {
        format!(
            "SELECT COUNT(*) FROM {}{}",
            quote_qualified(dialect, &self.table),
            self.where_clause(dialect)
        )
    }

    fn where_clause(&self, dialect: &dyn SqlDialect) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }

        let mut next = 1;
        let clauses: Vec<String> = self
            .conditions
            .iter()
            .map(|cond| {
                let clause = dialect.in_list(&quote_qualified(dialect, &cond.column), next, cond.count);
                next += cond.count;
                clause
            })
            .collect();
        format!(" WHERE {}", clauses.join(" AND "))
    }

    /// Execute against SQLite
    pub async fn fetch_all<T>(&self, pool: &SqlitePool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = self.render(&SqliteDialect);
        let query = bind_params!(sqlx::query_as::<_, T>(&sql), self, true);
        query.fetch_all(pool).await
    }

    /// Count matching rows in SQLite, ignoring order and window
    pub async fn count(&self, pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let sql = self.render_count(&SqliteDialect);
        let query = bind_params!(sqlx::query_scalar::<_, i64>(&sql), self, false);
        query.fetch_one(pool).await
    }
}

fn checked_identifier(ident: &str) -> Result<String, QueryError> {
    if is_valid_identifier(ident) {
        Ok(ident.to_string())
    } else {
        Err(QueryError::InvalidColumn(ident.to_string()))
    }
}

impl QueryTarget for SelectQuery {
    fn where_in(&mut self, column: &str, values: &[FilterValue]) -> Result<(), QueryError> {
        let column = checked_identifier(column)?;
        if values.is_empty() {
            return Err(QueryError::EmptyInList { column });
        }
        self.conditions.push(InCondition {
            column,
            count: values.len(),
        });
        self.params.extend_from_slice(values);
        Ok(())
    }

    fn order_by(&mut self, column: &str, direction: SortDirection) -> Result<(), QueryError> {
        self.orderings.push((checked_identifier(column)?, direction));
        Ok(())
    }

    fn limit_offset(&mut self, limit: u64, offset: u64) -> Result<(), QueryError> {
        match (i64::try_from(limit), i64::try_from(offset)) {
            (Ok(l), Ok(o)) => {
                self.window = Some((l, o));
                Ok(())
            }
            _ => Err(QueryError::WindowOutOfRange { limit, offset }),
        }
    }
}
