//! JSON:API collection queries and validation error documents
//!
//! - [`query`] turns `filter`, `sort` and `page` parameters into composable
//!   query modifiers
//! - [`sql`] renders those modifiers as parameterized SQL
//! - [`validation`] translates `validator` failures into JSON:API error
//!   documents
//! - [`api`] is a small demo service wiring the layers together

pub mod api;
mod app;
pub mod core;
pub mod query;
pub mod sql;
pub mod validation;
