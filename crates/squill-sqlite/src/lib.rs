//! # squill-sqlite
//!
//! SQLite execution layer for the `squill` statement builders.
//!
//! [`SqliteDatabase`] wraps an `sqlx` pool and executes SQL rendered by
//! `squill-core`; [`SchemaReconciler`] applies declared [`Table`]
//! (`squill_core::schema::Table`) shapes to a live database, additively.
//!
//! ```rust,no_run
//! use squill_core::schema::{Column, Index, Table};
//! use squill_core::value::ToSqlValue;
//! use squill_sqlite::{SchemaReconciler, SqliteDatabase};
//!
//! # async fn demo() -> squill_sqlite::Result<()> {
//! let db = SqliteDatabase::open("app.db").await?.log_sql(true);
//!
//! let users = Table::new("users")
//!     .increments("id")
//!     .text("name")
//!     .column(Column::integer("age").nullable())
//!     .index(Index::new("idx_users_name").unique(&["name"]));
//! SchemaReconciler::new(&db).migrate(&users).await?;
//!
//! let id = db.insert("users", &[("name", "ann".to_sql_value())]).await?;
//! # let _ = id;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod reconcile;
pub mod status;

pub use database::{ConflictAlgorithm, SqliteDatabase};
pub use error::{DbError, Result};
pub use reconcile::{Reconciliation, SchemaReconciler};
pub use status::CreateOrUpdateStatus;
