//! Additive schema reconciliation.
//!
//! [`SchemaReconciler`] compares a declared [`Table`] against what the
//! database actually holds and applies the difference: create the table if
//! it is absent, otherwise add the declared columns the physical table
//! lacks. Reconciliation is strictly additive; physical columns that are no
//! longer declared are left untouched, and column type or constraint
//! changes are never applied.

use sqlx::Row;
use tracing::info;

use squill_core::schema::{Column, Table};
use squill_core::value::{escape_literal, SqlValue};

use crate::database::SqliteDatabase;
use crate::error::Result;

/// Reconciles declared table shapes against a live database.
pub struct SchemaReconciler<'a> {
    db: &'a SqliteDatabase,
}

/// What a reconciliation run actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The table was created from scratch.
    pub created: bool,
    /// Names of columns added to an existing table, in declaration order.
    pub added_columns: Vec<String>,
    /// Number of CREATE INDEX statements executed. Each statement carries
    /// IF NOT EXISTS, so this counts attempts, not new indexes.
    pub indexes_created: usize,
}

impl<'a> SchemaReconciler<'a> {
    /// Creates a reconciler over the given database.
    #[must_use]
    pub fn new(db: &'a SqliteDatabase) -> Self {
        Self { db }
    }

    /// Checks the catalog for a table with the given name.
    pub async fn has_table(&self, name: &str) -> Result<bool> {
        let rows = self
            .db
            .query_with(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = ? AND name = ?",
                &[
                    SqlValue::Text(String::from("table")),
                    SqlValue::Text(String::from(name)),
                ],
            )
            .await?;
        let count: i64 = rows[0].try_get(0).map_err(sqlx::Error::from)?;
        Ok(count > 0)
    }

    /// Lists the physical column names of a table, in catalog order.
    pub async fn physical_columns(&self, table: &str) -> Result<Vec<String>> {
        let sql = format!("PRAGMA table_info({})", escape_literal(table));
        let rows = self.db.query(&sql).await?;
        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.try_get("name").map_err(sqlx::Error::from)?;
            columns.push(name);
        }
        Ok(columns)
    }

    /// Brings the database in line with one declared table.
    ///
    /// Added columns carry their full rendered definition, so a declared
    /// NOT NULL column without a default cannot be added to a non-empty
    /// table; SQLite rejects the ALTER and the error is propagated.
    pub async fn migrate(&self, table: &Table) -> Result<Reconciliation> {
        let mut report = Reconciliation {
            created: false,
            added_columns: Vec::new(),
            indexes_created: 0,
        };
        if self.has_table(&table.name).await? {
            let existing = self.physical_columns(&table.name).await?;
            for column in missing_columns(table, &existing) {
                let sql = format!(
                    "ALTER TABLE {} ADD COLUMN {}",
                    table.name,
                    column.to_sql()
                );
                info!(table = %table.name, column = %column.name, "Adding missing column");
                self.db.execute(&sql).await?;
                report.added_columns.push(column.name.clone());
            }
        } else {
            info!(table = %table.name, "Creating table");
            self.db.execute(&table.to_sql()).await?;
            report.created = true;
        }
        for index in &table.indexes {
            let sql = index.to_sql()?;
            self.db.execute(&sql).await?;
            report.indexes_created += 1;
        }
        Ok(report)
    }

    /// Reconciles several tables in order.
    pub async fn migrate_all(&self, tables: &[Table]) -> Result<Vec<Reconciliation>> {
        let mut reports = Vec::with_capacity(tables.len());
        for table in tables {
            reports.push(self.migrate(table).await?);
        }
        Ok(reports)
    }
}

/// Declared columns absent from the physical column list.
///
/// Comparison is case-insensitive, matching SQLite's own treatment of
/// identifiers.
fn missing_columns<'t>(table: &'t Table, existing: &[String]) -> Vec<&'t Column> {
    table
        .columns
        .iter()
        .filter(|column| {
            !existing
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&column.name))
        })
        .collect()
}
