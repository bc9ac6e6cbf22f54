//! WHERE predicate accumulator.

use crate::value::ToSqlValue;

use super::select::QueryBuilder;

/// An append-only textual WHERE predicate.
///
/// Clauses accumulate in call order; [`and`](Self::and) and
/// [`or`](Self::or) emit their connective only once at least one clause has
/// been written, so the first predicate never carries a leading connective.
/// Each clause is written with a leading space; the rendered text is spliced
/// after the `WHERE ` keyword as-is.
///
/// ```
/// use squill_core::query::Where;
///
/// let w = Where::new().clause("age", ">", 18).and().like("name", "A%");
/// assert_eq!(w.to_sql(), " age > 18 AND name LIKE 'A%'");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Where {
    sql: String,
    clauses: usize,
}

impl Where {
    /// Creates an empty predicate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no text has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Appends `AND` if at least one clause has been written.
    #[must_use]
    pub fn and(mut self) -> Self {
        if self.clauses > 0 {
            self.sql.push_str(" AND");
        }
        self
    }

    /// Appends `OR` if at least one clause has been written.
    #[must_use]
    pub fn or(mut self) -> Self {
        if self.clauses > 0 {
            self.sql.push_str(" OR");
        }
        self
    }

    /// Appends a bare `NOT`, negating the clause written next.
    #[must_use]
    pub fn not(mut self) -> Self {
        self.sql.push_str(" NOT");
        self
    }

    /// Appends `<column> <op> <literal>`.
    #[must_use]
    pub fn clause(mut self, column: &str, op: &str, value: impl ToSqlValue) -> Self {
        self.sql.push(' ');
        self.sql.push_str(column.trim());
        self.sql.push(' ');
        self.sql.push_str(op.trim());
        self.sql.push(' ');
        self.sql.push_str(&value.to_sql_value().to_literal());
        self.clauses += 1;
        self
    }

    /// Appends `<column> LIKE <literal>`.
    #[must_use]
    pub fn like(self, column: &str, value: impl ToSqlValue) -> Self {
        self.clause(column, "LIKE", value)
    }

    /// Appends `<column> BETWEEN <low> AND <high>`.
    #[must_use]
    pub fn between(mut self, column: &str, low: impl ToSqlValue, high: impl ToSqlValue) -> Self {
        self.sql.push(' ');
        self.sql.push_str(column);
        self.sql.push_str(" BETWEEN ");
        self.sql.push_str(&low.to_sql_value().to_literal());
        self.sql.push_str(" AND ");
        self.sql.push_str(&high.to_sql_value().to_literal());
        self.clauses += 1;
        self
    }

    /// Appends `<column> IN (<literal>, ...)`.
    #[must_use]
    pub fn in_values<T: ToSqlValue>(mut self, column: &str, values: Vec<T>) -> Self {
        self.sql.push(' ');
        self.sql.push_str(column);
        self.sql.push_str(" IN (");
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.sql.push_str(&value.to_sql_value().to_literal());
        }
        self.sql.push(')');
        self.clauses += 1;
        self
    }

    /// Appends `<column> IN (<subquery>)`.
    #[must_use]
    pub fn in_select(mut self, column: &str, subquery: &QueryBuilder) -> Self {
        self.sql.push(' ');
        self.sql.push_str(column);
        self.sql.push_str(" IN (");
        self.sql.push_str(&subquery.to_sql());
        self.sql.push(')');
        self.clauses += 1;
        self
    }

    /// Appends `EXISTS (<subquery>)`.
    #[must_use]
    pub fn exists(mut self, subquery: &QueryBuilder) -> Self {
        self.sql.push_str(" EXISTS (");
        self.sql.push_str(&subquery.to_sql());
        self.sql.push(')');
        self.clauses += 1;
        self
    }

    /// Appends raw predicate text verbatim.
    ///
    /// The text is not escaped; never pass user input through here.
    #[must_use]
    pub fn raw(mut self, text: &str) -> Self {
        self.sql.push_str(text);
        self
    }

    /// Returns the accumulated predicate text.
    #[must_use]
    pub fn to_sql(&self) -> &str {
        &self.sql
    }
}

impl std::fmt::Display for Where {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
