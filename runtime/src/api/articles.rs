//! Article collection endpoint
//!
//! `GET /articles` accepts `filter[title|author|rating|published]`,
//! `sort` over the same fields and `page[number]` / `page[size]`.
//! `POST /articles` takes a JSON:API resource document.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use validator::Validate;

use super::AppState;
use super::error::ApiError;
use crate::query::{
    CollectionQuery, FieldMapping, FieldType, QueryParams, TypedSanitizer, parse_collection,
};
use crate::sql::SelectQuery;
use crate::validation::{ValidatedBody, validate_iso8601};

pub const ARTICLE_TYPE: &str = "articles";

const ARTICLE_TABLE: &str = "articles";

const ARTICLE_COLUMNS: &[&str] = &[
    "id",
    "title",
    "author_name",
    "rating",
    "published",
    "published_at",
];

/// JSON:API field name to column
const ARTICLE_FIELDS: &[(&str, &str)] = &[
    ("title", "title"),
    ("author", "author_name"),
    ("rating", "rating"),
    ("published", "published"),
];

pub fn article_mapping() -> FieldMapping {
    FieldMapping::from_pairs(ARTICLE_FIELDS)
}

pub fn article_sanitizer() -> TypedSanitizer {
    TypedSanitizer::new()
        .field("rating", FieldType::Integer)
        .field("published", FieldType::Boolean)
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub author_name: String,
    pub rating: i64,
    pub published: bool,
    pub published_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleAttributes {
    pub title: String,
    pub author: String,
    pub rating: i64,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: ArticleAttributes,
}

impl From<ArticleRow> for ArticleResource {
    fn from(row: ArticleRow) -> Self {
        Self {
            kind: ARTICLE_TYPE,
            id: row.id.to_string(),
            attributes: ArticleAttributes {
                title: row.title,
                author: row.author_name,
                rating: row.rating,
                published: row.published,
                published_at: row.published_at,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionMeta {
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<crate::query::Page>,
}

#[derive(Debug, Serialize)]
pub struct ArticleCollection {
    pub data: Vec<ArticleResource>,
    pub meta: CollectionMeta,
}

#[derive(Debug, Serialize)]
pub struct ArticleDocument {
    pub data: ArticleResource,
}

/// `data.attributes` of a create request
#[derive(Debug, Deserialize, Validate)]
pub struct NewArticleAttributes {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(range(min = 0, max = 5, message = "Rating must be between 0 and 5"))]
    pub rating: i64,
    #[serde(default)]
    pub published: bool,
    #[validate(custom(function = "validate_iso8601"))]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewArticleData {
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(nested)]
    pub attributes: NewArticleAttributes,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewArticleDocument {
    #[validate(nested)]
    pub data: NewArticleData,
}

/// List articles
pub async fn list_articles(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<ArticleCollection>, ApiError> {
    let CollectionQuery { modifier, page } = parse_collection(
        &params,
        &article_mapping(),
        &article_sanitizer(),
        &state.paging,
    )?;

    let query = SelectQuery::new(ARTICLE_TABLE)
        .and_then(|q| q.columns(ARTICLE_COLUMNS))
        .and_then(|q| modifier.apply(q))
        .map_err(ApiError::from_query)?;

    let total = query.count(&state.pool).await.map_err(ApiError::from_sqlite)?;
    let rows: Vec<ArticleRow> = query
        .fetch_all(&state.pool)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(ArticleCollection {
        data: rows.into_iter().map(ArticleResource::from).collect(),
        meta: CollectionMeta { total, page },
    }))
}

/// Create an article
pub async fn create_article(
    State(state): State<AppState>,
    ValidatedBody(document): ValidatedBody<NewArticleDocument>,
) -> Result<(StatusCode, Json<ArticleDocument>), ApiError> {
    if document.data.kind != ARTICLE_TYPE {
        return Err(ApiError::type_mismatch(ARTICLE_TYPE, document.data.kind));
    }

    let attrs = document.data.attributes;
    let row = insert_article(&state.pool, &attrs)
        .await
        .map_err(ApiError::from_sqlite)?;
    tracing::debug!(id = row.id, "Article created");

    Ok((
        StatusCode::CREATED,
        Json(ArticleDocument {
            data: ArticleResource::from(row),
        }),
    ))
}

async fn insert_article(
    pool: &SqlitePool,
    attrs: &NewArticleAttributes,
) -> Result<ArticleRow, sqlx::Error> {
    sqlx::query_as::<_, ArticleRow>(
        r#"
        INSERT INTO articles (title, author_name, rating, published, published_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, title, author_name, rating, published, published_at
        "#,
    )
    .bind(&attrs.title)
    .bind(&attrs.author)
    .bind(attrs.rating)
    .bind(attrs.published)
    .bind(&attrs.published_at)
    .fetch_one(pool)
    .await
}

/// Create the articles table
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author_name TEXT NOT NULL,
            rating INTEGER NOT NULL DEFAULT 0,
            published INTEGER NOT NULL DEFAULT 0,
            published_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert sample rows into an empty table
pub async fn seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let samples = [
        ("Parsing query strings", "ann", 4, true),
        ("Sorting with tie-breakers", "bob", 5, true),
        ("Paging without surprises", "ann", 3, false),
    ];
    for (title, author, rating, published) in samples {
        sqlx::query(
            "INSERT INTO articles (title, author_name, rating, published) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(author)
        .bind(rating)
        .bind(published)
        .execute(pool)
        .await?;
    }
    tracing::debug!(count = samples.len(), "Seeded articles");
    Ok(())
}
