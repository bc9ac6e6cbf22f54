//! SQLite database gateway.
//!
//! [`SqliteDatabase`] owns the pool and funnels all statement execution
//! through three narrow operations: execute (affected-row count), query
//! (rows), and insert-returning-id. Row-level DML helpers and the
//! two-phase upsert are built on top of those.

use std::path::Path;

use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteQueryResult,
    SqliteRow,
};
use sqlx::Sqlite;
use tracing::{debug, warn};

use squill_core::query::{QueryBuilder, Where};
use squill_core::value::SqlValue;

use crate::error::{DbError, Result};
use crate::status::CreateOrUpdateStatus;

/// Conflict resolution algorithm for INSERT statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAlgorithm {
    /// Roll back the current transaction on conflict.
    Rollback,
    /// Abort the statement on conflict (SQLite's default).
    Abort,
    /// Fail the statement but keep prior changes.
    Fail,
    /// Skip the conflicting row silently.
    Ignore,
    /// Delete the conflicting row and insert the new one.
    Replace,
}

impl ConflictAlgorithm {
    /// Returns the `OR <action>` SQL fragment.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Rollback => "OR ROLLBACK",
            Self::Abort => "OR ABORT",
            Self::Fail => "OR FAIL",
            Self::Ignore => "OR IGNORE",
            Self::Replace => "OR REPLACE",
        }
    }
}

/// A handle to one logical SQLite database.
///
/// The default constructors use a single-connection pool, so statement
/// execution against one logical database is serialized; pool creation is
/// the guarded, once-only initialization. `log_sql` is explicit
/// construction-time configuration; there is no global debug toggle.
pub struct SqliteDatabase {
    pool: SqlitePool,
    log_sql: bool,
}

impl SqliteDatabase {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            log_sql: false,
        }
    }

    /// Enables per-statement SQL logging through `tracing`.
    #[must_use]
    pub fn log_sql(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    /// Opens (creating if missing) a database file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Opens an in-memory database.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn trace(&self, sql: &str) {
        if self.log_sql {
            debug!(sql = %sql, "Executing SQL");
        }
    }

    async fn run_with(&self, sql: &str, params: &[SqlValue]) -> Result<SqliteQueryResult> {
        self.trace(sql);
        let result = bind_params(sqlx::query(sql), params)
            .execute(&self.pool)
            .await?;
        Ok(result)
    }

    /// Executes a statement and returns the affected-row count.
    pub async fn execute(&self, sql: &str) -> Result<u64> {
        Ok(self.run_with(sql, &[]).await?.rows_affected())
    }

    /// Executes a query and returns all rows.
    pub async fn query(&self, sql: &str) -> Result<Vec<SqliteRow>> {
        self.query_with(sql, &[]).await
    }

    /// Executes a query with bound parameters and returns all rows.
    pub async fn query_with(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<SqliteRow>> {
        self.trace(sql);
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Executes an INSERT and returns the generated row id.
    ///
    /// Returns `-1` when no row was inserted (e.g. an ignored conflict).
    pub async fn insert_returning_id(&self, sql: &str, params: &[SqlValue]) -> Result<i64> {
        let result = self.run_with(sql, params).await?;
        if result.rows_affected() > 0 {
            Ok(result.last_insert_rowid())
        } else {
            Ok(-1)
        }
    }

    /// Inserts a row from column/value pairs and returns the generated id.
    pub async fn insert(&self, table: &str, values: &[(&str, SqlValue)]) -> Result<i64> {
        self.insert_inner(table, values, None).await
    }

    /// Inserts a row with an explicit conflict algorithm.
    pub async fn insert_with_conflict(
        &self,
        table: &str,
        values: &[(&str, SqlValue)],
        algorithm: ConflictAlgorithm,
    ) -> Result<i64> {
        self.insert_inner(table, values, Some(algorithm)).await
    }

    async fn insert_inner(
        &self,
        table: &str,
        values: &[(&str, SqlValue)],
        algorithm: Option<ConflictAlgorithm>,
    ) -> Result<i64> {
        if values.is_empty() {
            return Err(DbError::Configuration(format!(
                "insert into '{table}' with no values"
            )));
        }
        let mut sql = String::from("INSERT ");
        if let Some(algorithm) = algorithm {
            sql.push_str(algorithm.as_sql());
            sql.push(' ');
        }
        sql.push_str("INTO ");
        sql.push_str(table);
        sql.push_str(" (");
        let columns: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
        sql.push_str(&columns.join(", "));
        sql.push_str(") VALUES (");
        sql.push_str(&vec!["?"; values.len()].join(", "));
        sql.push(')');

        let params: Vec<SqlValue> = values.iter().map(|(_, v)| v.clone()).collect();
        self.insert_returning_id(&sql, &params).await
    }

    /// Updates rows matching the predicate and returns the affected count.
    ///
    /// An empty predicate updates every row.
    pub async fn update(
        &self,
        table: &str,
        values: &[(&str, SqlValue)],
        where_clause: &Where,
    ) -> Result<u64> {
        if values.is_empty() {
            return Err(DbError::Configuration(format!(
                "update of '{table}' with no values"
            )));
        }
        let assignments: Vec<String> = values.iter().map(|(c, _)| format!("{c} = ?")).collect();
        let mut sql = String::from("UPDATE ");
        sql.push_str(table);
        sql.push_str(" SET ");
        sql.push_str(&assignments.join(", "));
        if !where_clause.is_empty() {
            sql.push_str(" WHERE");
            sql.push_str(where_clause.to_sql());
        }
        let params: Vec<SqlValue> = values.iter().map(|(_, v)| v.clone()).collect();
        Ok(self.run_with(&sql, &params).await?.rows_affected())
    }

    /// Deletes rows matching the predicate and returns the affected count.
    ///
    /// `None` deletes every row.
    pub async fn delete(&self, table: &str, where_clause: Option<&Where>) -> Result<u64> {
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(table);
        if let Some(w) = where_clause {
            if !w.is_empty() {
                sql.push_str(" WHERE");
                sql.push_str(w.to_sql());
            }
        }
        self.execute(&sql).await
    }

    /// Two-phase optimistic upsert: UPDATE first, INSERT OR IGNORE second.
    ///
    /// Execution errors on either phase are translated into "no effect"
    /// rather than surfaced; the outcome reports which phase, if any,
    /// succeeded. Concurrent callers racing on the same logical key can
    /// both miss the UPDATE and both attempt the INSERT; the table's unique
    /// constraint plus OR IGNORE prevents duplicate rows, and the losing
    /// caller is indistinguishable from "row already existed".
    pub async fn upsert(
        &self,
        table: &str,
        values: &[(&str, SqlValue)],
        where_clause: &Where,
    ) -> CreateOrUpdateStatus {
        match self.update(table, values, where_clause).await {
            Ok(rows) if rows > 0 => {
                return CreateOrUpdateStatus::updated(rows as i64);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(table = %table, error = %e, "Upsert UPDATE phase failed, treating as no effect");
            }
        }
        match self
            .insert_with_conflict(table, values, ConflictAlgorithm::Ignore)
            .await
        {
            Ok(id) if id >= 0 => CreateOrUpdateStatus::created(id),
            Ok(_) => CreateOrUpdateStatus::no_effect(),
            Err(e) => {
                warn!(table = %table, error = %e, "Upsert INSERT phase failed, treating as no effect");
                CreateOrUpdateStatus::no_effect()
            }
        }
    }

    /// Starts a query builder for the given table.
    #[must_use]
    pub fn table(&self, name: &str) -> QueryBuilder {
        QueryBuilder::from(name)
    }

    /// Renders and executes a SELECT built with [`QueryBuilder`].
    pub async fn fetch(&self, query: &QueryBuilder) -> Result<Vec<SqliteRow>> {
        self.query(&query.to_sql()).await
    }

    /// Reads `PRAGMA user_version`.
    pub async fn user_version(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("PRAGMA user_version")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Sets `PRAGMA user_version`.
    pub async fn set_user_version(&self, version: i64) -> Result<()> {
        self.execute(&format!("PRAGMA user_version = {version}"))
            .await?;
        Ok(())
    }

    /// Begins a transaction.
    ///
    /// Transactions are coarse-grained and not reentrant; do not nest.
    pub async fn begin(&self) -> Result<sqlx::Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }
}

/// Binds rendered values as statement parameters, in order.
fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in params {
        query = match value {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::Real(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.as_str()),
            SqlValue::Blob(b) => query.bind(b.as_slice()),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;
    use squill_core::value::ToSqlValue;

    async fn test_db() -> SqliteDatabase {
        SqliteDatabase::open_in_memory()
            .await
            .expect("Failed to open in-memory database")
    }

    async fn users_table(db: &SqliteDatabase) {
        db.execute(
            "CREATE TABLE users (\
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL UNIQUE, \
             age INTEGER)",
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn execute_returns_affected_rows() {
        let db = test_db().await;
        users_table(&db).await;
        let rows = db
            .execute("INSERT INTO users (name, age) VALUES ('ann', 30)")
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn insert_returns_generated_id() {
        let db = test_db().await;
        users_table(&db).await;
        let id = db
            .insert("users", &[("name", "bob".to_sql_value()), ("age", 20.to_sql_value())])
            .await
            .unwrap();
        assert_eq!(id, 1);
        let id = db
            .insert("users", &[("name", "cid".to_sql_value())])
            .await
            .unwrap();
        assert_eq!(id, 2);
    }

    #[tokio::test]
    async fn ignored_conflict_returns_sentinel() {
        let db = test_db().await;
        users_table(&db).await;
        db.insert("users", &[("name", "ann".to_sql_value())])
            .await
            .unwrap();
        let id = db
            .insert_with_conflict(
                "users",
                &[("name", "ann".to_sql_value())],
                ConflictAlgorithm::Ignore,
            )
            .await
            .unwrap();
        assert_eq!(id, -1);
    }

    #[tokio::test]
    async fn replace_conflict_overwrites() {
        let db = test_db().await;
        users_table(&db).await;
        db.insert("users", &[("name", "ann".to_sql_value()), ("age", 30.to_sql_value())])
            .await
            .unwrap();
        db.insert_with_conflict(
            "users",
            &[("name", "ann".to_sql_value()), ("age", 31.to_sql_value())],
            ConflictAlgorithm::Replace,
        )
        .await
        .unwrap();
        let rows = db.query("SELECT age FROM users WHERE name = 'ann'").await.unwrap();
        assert_eq!(rows.len(), 1);
        let age: i64 = rows[0].try_get("age").unwrap();
        assert_eq!(age, 31);
    }

    #[tokio::test]
    async fn update_affects_matching_rows() {
        let db = test_db().await;
        users_table(&db).await;
        db.insert("users", &[("name", "ann".to_sql_value()), ("age", 30.to_sql_value())])
            .await
            .unwrap();
        db.insert("users", &[("name", "bob".to_sql_value()), ("age", 30.to_sql_value())])
            .await
            .unwrap();
        let rows = db
            .update(
                "users",
                &[("age", 31.to_sql_value())],
                &Where::new().clause("age", "=", 30_i64),
            )
            .await
            .unwrap();
        assert_eq!(rows, 2);
    }

    #[tokio::test]
    async fn delete_with_and_without_predicate() {
        let db = test_db().await;
        users_table(&db).await;
        db.insert("users", &[("name", "ann".to_sql_value())]).await.unwrap();
        db.insert("users", &[("name", "bob".to_sql_value())]).await.unwrap();
        let rows = db
            .delete("users", Some(&Where::new().clause("name", "=", "ann")))
            .await
            .unwrap();
        assert_eq!(rows, 1);
        let rows = db.delete("users", None).await.unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn empty_values_are_configuration_errors() {
        let db = test_db().await;
        users_table(&db).await;
        assert!(matches!(
            db.insert("users", &[]).await,
            Err(DbError::Configuration(_))
        ));
        assert!(matches!(
            db.update("users", &[], &Where::new()).await,
            Err(DbError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let db = test_db().await;
        users_table(&db).await;

        let by_name = || Where::new().clause("name", "=", "bob");

        let status = db
            .upsert(
                "users",
                &[("name", "bob".to_sql_value()), ("age", 20.to_sql_value())],
                &by_name(),
            )
            .await;
        assert!(status.created && !status.updated);
        assert!(status.insert_id >= 0);

        let status = db
            .upsert(
                "users",
                &[("name", "bob".to_sql_value()), ("age", 21.to_sql_value())],
                &by_name(),
            )
            .await;
        assert!(status.updated && !status.created);
        assert_eq!(status.rows_changed, 1);

        let rows = db.query("SELECT age FROM users WHERE name = 'bob'").await.unwrap();
        let age: i64 = rows[0].try_get("age").unwrap();
        assert_eq!(age, 21);
    }

    #[tokio::test]
    async fn upsert_reports_no_effect_when_both_phases_miss() {
        let db = test_db().await;
        users_table(&db).await;
        db.insert("users", &[("name", "ann".to_sql_value())]).await.unwrap();

        // Predicate matches nothing, and the insert collides on the unique
        // name and is ignored.
        let status = db
            .upsert(
                "users",
                &[("name", "ann".to_sql_value())],
                &Where::new().clause("id", "=", 999_i64),
            )
            .await;
        assert!(!status.created && !status.updated);
        assert_eq!(status.insert_id, -1);
        assert_eq!(status.rows_changed, -1);
    }

    #[tokio::test]
    async fn fetch_runs_a_query_builder() {
        let db = test_db().await;
        users_table(&db).await;
        db.insert("users", &[("name", "ann".to_sql_value()), ("age", 30.to_sql_value())])
            .await
            .unwrap();
        db.insert("users", &[("name", "bob".to_sql_value()), ("age", 40.to_sql_value())])
            .await
            .unwrap();

        let query = db
            .table("users")
            .select(&["name"])
            .filter(Where::new().clause("age", ">", 35_i64));
        let rows = db.fetch(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        let name: String = rows[0].try_get("name").unwrap();
        assert_eq!(name, "bob");
    }

    #[tokio::test]
    async fn query_with_binds_parameters() {
        let db = test_db().await;
        users_table(&db).await;
        db.insert("users", &[("name", "o'brien".to_sql_value())]).await.unwrap();
        let rows = db
            .query_with(
                "SELECT id FROM users WHERE name = ?",
                &[SqlValue::Text(String::from("o'brien"))],
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn user_version_round_trips() {
        let db = test_db().await;
        assert_eq!(db.user_version().await.unwrap(), 0);
        db.set_user_version(3).await.unwrap();
        assert_eq!(db.user_version().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn open_creates_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = SqliteDatabase::open(&path).await.unwrap();
        db.execute("CREATE TABLE t (x INTEGER)").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn transaction_rolls_back_on_drop() {
        let db = test_db().await;
        users_table(&db).await;
        {
            let mut tx = db.begin().await.unwrap();
            sqlx::query("INSERT INTO users (name) VALUES ('tmp')")
                .execute(&mut *tx)
                .await
                .unwrap();
            // Dropped without commit.
        }
        let rows = db.query("SELECT * FROM users").await.unwrap();
        assert!(rows.is_empty());
    }
}
