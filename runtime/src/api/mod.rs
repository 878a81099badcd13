//! Demo HTTP API
//!
//! A single JSON:API collection backed by SQLite, wired through the query
//! and validation layers.

pub mod articles;
mod error;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::query::PagingConfig;

pub use error::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub paging: PagingConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
