//! Index definitions.

use crate::error::{BuildError, Result};
use crate::value::escape_literal;

/// Schema definition for an index.
///
/// Renders `CREATE [UNIQUE] INDEX IF NOT EXISTS '<name>' ON '<table>'
/// ('<col>', ...)`. The owning table name is filled in when the index is
/// attached to a [`Table`](crate::schema::Table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Index name. Identity within a table (case-insensitive).
    pub name: String,
    /// Owning table name.
    pub table: String,
    /// Whether this is a UNIQUE index.
    pub unique: bool,
    /// Indexed column names, in order.
    pub columns: Vec<String>,
}

impl Index {
    /// Creates a new index with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: String::new(),
            unique: false,
            columns: Vec::new(),
        }
    }

    /// Adds indexed columns.
    #[must_use]
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns.extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Marks the index UNIQUE over the given columns.
    #[must_use]
    pub fn unique(mut self, columns: &[&str]) -> Self {
        self.unique = true;
        self.columns(columns)
    }

    /// Renders the CREATE INDEX statement.
    ///
    /// # Errors
    ///
    /// [`BuildError::IndexWithoutColumns`] when no columns were added.
    pub fn to_sql(&self) -> Result<String> {
        if self.columns.is_empty() {
            return Err(BuildError::IndexWithoutColumns(self.name.clone()));
        }
        let mut sql = String::from("CREATE ");
        if self.unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX IF NOT EXISTS ");
        sql.push_str(&escape_literal(&self.name));
        sql.push_str(" ON ");
        sql.push_str(&escape_literal(&self.table));
        sql.push_str(" (");
        let cols: Vec<String> = self.columns.iter().map(|c| escape_literal(c)).collect();
        sql.push_str(&cols.join(", "));
        sql.push(')');
        Ok(sql)
    }
}
