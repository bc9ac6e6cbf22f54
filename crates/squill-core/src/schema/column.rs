//! Column definitions.

use crate::value::SqlValue;

/// SQL data types supported by the schema DSL.
///
/// SQLite's storage classes; driver-specific widths collapse onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// Integer (64-bit in SQLite).
    Integer,
    /// Floating point.
    Real,
    /// Text/string.
    Text,
    /// Binary large object.
    Blob,
}

impl SqlType {
    /// Returns the SQL type name.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
        }
    }
}

/// Schema definition for a single column.
///
/// Built fluently, frozen once the owning table is handed to the reconciler.
///
/// ```
/// use squill_core::schema::Column;
///
/// let col = Column::text("name").default_value("unknown");
/// assert_eq!(col.to_sql(), "name TEXT NOT NULL DEFAULT 'unknown'");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name. Identity for reconciliation (case-insensitive).
    pub name: String,
    /// SQL data type.
    pub sql_type: SqlType,
    /// Whether this column is the primary key.
    pub primary_key: bool,
    /// Whether this column auto-increments. Only meaningful with
    /// `primary_key` on an INTEGER column.
    pub auto_increment: bool,
    /// Whether the column allows NULL values. Defaults to false.
    pub nullable: bool,
    /// Default value literal, if any.
    pub default: Option<SqlValue>,
}

impl Column {
    /// Creates a new column with the given name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            primary_key: false,
            auto_increment: false,
            nullable: false,
            default: None,
        }
    }

    /// INTEGER column.
    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::Integer)
    }

    /// REAL column.
    #[must_use]
    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::Real)
    }

    /// TEXT column.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::Text)
    }

    /// BLOB column.
    #[must_use]
    pub fn blob(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::Blob)
    }

    /// Auto-incrementing INTEGER primary key.
    #[must_use]
    pub fn increments(name: impl Into<String>) -> Self {
        Self::integer(name).primary_key().auto_increment()
    }

    /// Marks the column as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Allows NULL values.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl crate::value::ToSqlValue) -> Self {
        self.default = Some(value.to_sql_value());
        self
    }

    /// Renders the column definition.
    ///
    /// Clause order is fixed (`NAME TYPE [PRIMARY KEY] [AUTOINCREMENT]
    /// NULL|NOT NULL [DEFAULT ...]`); some dialects are order-sensitive.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        sql.push_str(&self.name);
        sql.push(' ');
        sql.push_str(self.sql_type.as_sql());
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.auto_increment {
            sql.push_str(" AUTOINCREMENT");
        }
        sql.push_str(if self.nullable { " NULL" } else { " NOT NULL" });
        if let Some(ref default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_literal());
        }
        sql
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}
