//! # squill-core
//!
//! SQL statement rendering for a lightweight SQLite access layer.
//!
//! This crate is pure text: it knows how to describe a table shape and a
//! SELECT statement and render both to deterministic, injection-safe SQL.
//! It never touches a database; execution and schema reconciliation live in
//! `squill-sqlite`.
//!
//! ## Building a query
//!
//! ```rust
//! use squill_core::query::{QueryBuilder, Where};
//!
//! let query = QueryBuilder::from("users")
//!     .select(&["id", "name"])
//!     .filter(Where::new().clause("age", ">", 18).and().like("name", "A%"))
//!     .order_by("name")
//!     .limit("10");
//!
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT id,name FROM users WHERE  age > 18 AND name LIKE 'A%' ORDER BY name LIMIT 10"
//! );
//! ```
//!
//! ## Declaring a table
//!
//! ```rust
//! use squill_core::schema::{Column, Index, Table};
//!
//! let table = Table::new("users")
//!     .column(Column::increments("id"))
//!     .text("name")
//!     .column(Column::integer("age").nullable())
//!     .index(Index::new("idx_users_name").unique(&["name"]));
//!
//! assert!(table.to_sql().starts_with("CREATE TABLE IF NOT EXISTS users ("));
//! ```
//!
//! All values pass through [`value::SqlValue::to_literal`], which escapes
//! embedded quotes by doubling them, so user input stays inside its literal.

pub mod error;
pub mod query;
pub mod schema;
pub mod value;

pub use error::BuildError;
pub use query::{JoinKind, QueryBuilder, Where};
pub use schema::{Column, Constraint, ForeignKeyAction, Index, SqlType, Table};
pub use value::{SqlValue, ToSqlValue};
