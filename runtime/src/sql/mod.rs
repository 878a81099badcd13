//! SQL rendering and execution of query modifiers
//!
//! [`SelectQuery`] is the [`QueryTarget`](crate::query::QueryTarget) used by
//! the demo server. It renders SQL for SQLite or PostgreSQL and executes
//! against a sqlx SQLite pool.

mod dialect;
mod postgres_dialect;
mod select;
mod sqlite_dialect;

pub use dialect::{SqlDialect, is_valid_identifier, quote_qualified};
pub use postgres_dialect::PostgresDialect;
pub use select::SelectQuery;
pub use sqlite_dialect::SqliteDialect;

/// Database backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Sqlite => &SqliteDialect,
            Backend::Postgres => &PostgresDialect,
        }
    }

    /// Get the backend name
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
