//! Foreign key constraints.

/// Referential action for ON DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForeignKeyAction {
    /// No action (error if the referenced row is deleted).
    #[default]
    NoAction,
    /// Restrict, checked immediately.
    Restrict,
    /// Cascade the delete to referencing rows.
    Cascade,
    /// Set the foreign key column to NULL.
    SetNull,
    /// Set the foreign key column to its default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of this action.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A table-level FOREIGN KEY constraint.
///
/// Renders `FOREIGN KEY (<cols>) REFERENCES <table>(<cols>) [ON DELETE ...]`.
/// The FOREIGN KEY fragment requires at least one local column; the
/// REFERENCES fragment requires a referenced table and at least one
/// referenced column. Fragments with unmet preconditions are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Constraint {
    /// Local column names.
    pub columns: Vec<String>,
    /// Referenced column names.
    pub references: Vec<String>,
    /// Referenced table name.
    pub table: Option<String>,
    /// Action on delete, if any.
    pub on_delete: Option<ForeignKeyAction>,
}

impl Constraint {
    /// Creates an empty constraint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds local columns.
    #[must_use]
    pub fn foreign(mut self, columns: &[&str]) -> Self {
        self.columns.extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Adds referenced columns.
    #[must_use]
    pub fn references(mut self, columns: &[&str]) -> Self {
        self.references
            .extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Sets the referenced table.
    #[must_use]
    pub fn on(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets ON DELETE CASCADE.
    #[must_use]
    pub fn on_delete_cascade(self) -> Self {
        self.on_delete(ForeignKeyAction::Cascade)
    }

    /// Renders the constraint, or `None` when there is nothing to emit.
    #[must_use]
    pub fn to_sql(&self) -> Option<String> {
        if self.columns.is_empty() {
            return None;
        }
        let mut sql = String::from("FOREIGN KEY (");
        sql.push_str(&self.columns.join(", "));
        sql.push(')');
        if let Some(ref table) = self.table {
            if !self.references.is_empty() {
                sql.push_str(" REFERENCES ");
                sql.push_str(table);
                sql.push('(');
                sql.push_str(&self.references.join(", "));
                sql.push(')');
            }
        }
        if let Some(action) = self.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        Some(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_constraint_renders() {
        let c = Constraint::new()
            .foreign(&["user_id"])
            .references(&["id"])
            .on("users")
            .on_delete_cascade();
        assert_eq!(
            c.to_sql().unwrap(),
            "FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE"
        );
    }

    #[test]
    fn references_omitted_without_table() {
        let c = Constraint::new().foreign(&["user_id"]).references(&["id"]);
        assert_eq!(c.to_sql().unwrap(), "FOREIGN KEY (user_id)");
    }

    #[test]
    fn empty_constraint_renders_nothing() {
        assert_eq!(Constraint::new().to_sql(), None);
        // References without local columns emit no fragment at all.
        let c = Constraint::new().references(&["id"]).on("users");
        assert_eq!(c.to_sql(), None);
    }

    #[test]
    fn composite_keys() {
        let c = Constraint::new()
            .foreign(&["a", "b"])
            .references(&["x", "y"])
            .on("t");
        assert_eq!(
            c.to_sql().unwrap(),
            "FOREIGN KEY (a, b) REFERENCES t(x, y)"
        );
    }
}
