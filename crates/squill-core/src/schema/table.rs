//! Table definitions.

use super::column::{Column, SqlType};
use super::constraint::Constraint;
use super::index::Index;

/// The declared shape of a table.
///
/// Columns, constraints, and indexes render in the order they were added.
/// Columns and indexes are keyed by case-insensitive name: re-adding a name
/// replaces the earlier definition in place, so the declared shape can never
/// carry two disagreeing definitions of the identity the reconciler diffs on.
///
/// ```
/// use squill_core::schema::{Column, Table};
///
/// let table = Table::new("users")
///     .column(Column::increments("id"))
///     .text("name");
/// assert_eq!(
///     table.to_sql(),
///     "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, name TEXT NOT NULL)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Column definitions, in addition order.
    pub columns: Vec<Column>,
    /// Constraint definitions, in addition order.
    pub constraints: Vec<Constraint>,
    /// Index definitions, in addition order.
    pub indexes: Vec<Index>,
}

impl Table {
    /// Creates a new empty table definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds a column, replacing any existing column with the same name.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        if let Some(existing) = self
            .columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(&column.name))
        {
            *existing = column;
        } else {
            self.columns.push(column);
        }
        self
    }

    /// Adds an INTEGER column.
    #[must_use]
    pub fn integer(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, SqlType::Integer))
    }

    /// Adds a REAL column.
    #[must_use]
    pub fn real(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, SqlType::Real))
    }

    /// Adds a TEXT column.
    #[must_use]
    pub fn text(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, SqlType::Text))
    }

    /// Adds a BLOB column.
    #[must_use]
    pub fn blob(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, SqlType::Blob))
    }

    /// Adds an auto-incrementing INTEGER primary key.
    #[must_use]
    pub fn increments(self, name: impl Into<String>) -> Self {
        self.column(Column::increments(name))
    }

    /// Adds a table-level constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a single-column foreign key.
    #[must_use]
    pub fn foreign(
        self,
        column: &str,
        references_table: &str,
        references_column: &str,
    ) -> Self {
        self.constraint(
            Constraint::new()
                .foreign(&[column])
                .references(&[references_column])
                .on(references_table),
        )
    }

    /// Attaches an index, binding it to this table's name.
    ///
    /// An index with the same name replaces the earlier one.
    #[must_use]
    pub fn index(mut self, mut index: Index) -> Self {
        index.table = self.name.clone();
        if let Some(existing) = self
            .indexes
            .iter_mut()
            .find(|i| i.name.eq_ignore_ascii_case(&index.name))
        {
            *existing = index;
        } else {
            self.indexes.push(index);
        }
        self
    }

    /// Looks up a column by case-insensitive name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Renders the CREATE TABLE statement.
    ///
    /// Column definitions come first in addition order, then constraint
    /// definitions in addition order, comma-separated. Constraints with
    /// unmet preconditions are omitted.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut defs: Vec<String> = self.columns.iter().map(Column::to_sql).collect();
        defs.extend(self.constraints.iter().filter_map(Constraint::to_sql));
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, defs.join(", "))
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}
