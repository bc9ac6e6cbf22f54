//! SELECT statement builder.

use super::where_clause::Where;

/// JOIN flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// LEFT JOIN.
    Left,
    /// INNER JOIN.
    Inner,
}

impl JoinKind {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Inner => "INNER",
        }
    }
}

/// An in-memory SELECT statement.
///
/// Clauses accumulate through consuming builder calls and render in SQL
/// grammar order. Unset clauses are omitted entirely. The builder is pure
/// text; execution belongs to the driver layer.
///
/// ```
/// use squill_core::query::{QueryBuilder, Where};
///
/// let query = QueryBuilder::from("user")
///     .filter(Where::new().clause("age", ">", 18));
/// assert_eq!(query.to_sql(), "SELECT * FROM user WHERE  age > 18");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    distinct: bool,
    columns: Vec<String>,
    table: String,
    from_sub: Option<Box<QueryBuilder>>,
    joins: Vec<String>,
    where_clause: Option<Where>,
    group_by: Option<String>,
    having: Option<String>,
    order_by: Option<String>,
    limit: Option<String>,
}

impl QueryBuilder {
    /// Creates a builder selecting from the given table.
    #[must_use]
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Creates a builder selecting from a sub-select, rendered as
    /// `(<subquery>) AS <alias>`.
    #[must_use]
    pub fn from_subquery(alias: impl Into<String>, subquery: QueryBuilder) -> Self {
        Self {
            table: alias.into(),
            from_sub: Some(Box::new(subquery)),
            ..Self::default()
        }
    }

    /// Forces the query to return distinct rows.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Sets the selected columns. Absent columns select `*`.
    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| String::from(*c)).collect();
        self
    }

    /// Appends a JOIN clause.
    ///
    /// Repeating an identical join is a no-op; joins keep addition order.
    #[must_use]
    pub fn join(mut self, table: &str, condition: &str, kind: Option<JoinKind>) -> Self {
        let mut clause = String::new();
        if let Some(kind) = kind {
            clause.push_str(kind.as_sql());
            clause.push(' ');
        }
        clause.push_str("JOIN ");
        clause.push_str(table.trim());
        clause.push_str(" ON ");
        clause.push_str(condition.trim());
        if !self.joins.contains(&clause) {
            self.joins.push(clause);
        }
        self
    }

    /// Appends a LEFT JOIN clause.
    #[must_use]
    pub fn left_join(self, table: &str, condition: &str) -> Self {
        self.join(table, condition, Some(JoinKind::Left))
    }

    /// Appends an INNER JOIN clause.
    #[must_use]
    pub fn inner_join(self, table: &str, condition: &str) -> Self {
        self.join(table, condition, Some(JoinKind::Inner))
    }

    /// Sets the WHERE predicate.
    #[must_use]
    pub fn filter(mut self, where_clause: Where) -> Self {
        self.where_clause = Some(where_clause);
        self
    }

    /// Sets the GROUP BY expression.
    #[must_use]
    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.group_by = Some(expr.into());
        self
    }

    /// Sets the HAVING expression.
    #[must_use]
    pub fn having(mut self, expr: impl Into<String>) -> Self {
        self.having = Some(expr.into());
        self
    }

    /// Sets the ORDER BY expression.
    #[must_use]
    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.order_by = Some(expr.into());
        self
    }

    /// Sets the LIMIT fragment.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Renders the statement.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(","));
        }
        sql.push_str(" FROM ");
        if let Some(ref sub) = self.from_sub {
            sql.push('(');
            sql.push_str(&sub.to_sql());
            sql.push_str(") AS ");
        }
        sql.push_str(&self.table);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }
        let where_text = self.where_clause.as_ref().map(Where::to_sql);
        append_clause(&mut sql, " WHERE ", where_text);
        append_clause(&mut sql, " GROUP BY ", self.group_by.as_deref());
        append_clause(&mut sql, " HAVING ", self.having.as_deref());
        append_clause(&mut sql, " ORDER BY ", self.order_by.as_deref());
        append_clause(&mut sql, " LIMIT ", self.limit.as_deref());
        sql
    }
}

impl std::fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Appends `<keyword><clause>` when the clause is present and non-empty.
///
/// Unset and empty clauses are treated uniformly as absent.
fn append_clause(sql: &mut String, keyword: &str, clause: Option<&str>) {
    if let Some(clause) = clause {
        if !clause.is_empty() {
            sql.push_str(keyword);
            sql.push_str(clause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_columns_selects_star() {
        assert_eq!(QueryBuilder::from("user").to_sql(), "SELECT * FROM user");
    }

    #[test]
    fn distinct_renders_after_select() {
        assert_eq!(
            QueryBuilder::from("user").distinct().to_sql(),
            "SELECT DISTINCT * FROM user"
        );
    }

    #[test]
    fn explicit_columns() {
        assert_eq!(
            QueryBuilder::from("user").select(&["id", "name"]).to_sql(),
            "SELECT id,name FROM user"
        );
    }

    #[test]
    fn where_renders_with_single_keyword() {
        let sql = QueryBuilder::from("user")
            .filter(Where::new().clause("age", ">", 18_i64))
            .to_sql();
        assert_eq!(sql, "SELECT * FROM user WHERE  age > 18");
        assert_eq!(sql.matches("WHERE").count(), 1);
    }

    #[test]
    fn empty_where_is_omitted() {
        let sql = QueryBuilder::from("user").filter(Where::new()).to_sql();
        assert_eq!(sql, "SELECT * FROM user");
    }

    #[test]
    fn joins_keep_order_and_suppress_duplicates() {
        let sql = QueryBuilder::from("t1")
            .left_join("t2", "t1.id = t2.t1_id")
            .inner_join("t3", "t2.id = t3.t2_id")
            .left_join("t2", "t1.id = t2.t1_id")
            .to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM t1 LEFT JOIN t2 ON t1.id = t2.t1_id \
             INNER JOIN t3 ON t2.id = t3.t2_id"
        );
    }

    #[test]
    fn untyped_join_has_no_prefix() {
        let sql = QueryBuilder::from("a").join("b", "a.id = b.a_id", None).to_sql();
        assert_eq!(sql, "SELECT * FROM a JOIN b ON a.id = b.a_id");
    }

    #[test]
    fn subquery_from_renders_alias() {
        let inner = QueryBuilder::from("orders").select(&["user_id"]);
        let sql = QueryBuilder::from_subquery("o", inner).to_sql();
        assert_eq!(sql, "SELECT * FROM (SELECT user_id FROM orders) AS o");
    }

    #[test]
    fn clause_order_is_fixed() {
        let sql = QueryBuilder::from("orders")
            .select(&["status", "COUNT(*)"])
            .filter(Where::new().clause("total", ">", 0_i64))
            .group_by("status")
            .having("COUNT(*) > 1")
            .order_by("status DESC")
            .limit("10")
            .to_sql();
        assert_eq!(
            sql,
            "SELECT status,COUNT(*) FROM orders WHERE  total > 0 \
             GROUP BY status HAVING COUNT(*) > 1 ORDER BY status DESC LIMIT 10"
        );
    }

    #[test]
    fn nested_subqueries_compose() {
        let innermost = QueryBuilder::from("events").select(&["id"]);
        let inner = QueryBuilder::from_subquery("e", innermost).select(&["id"]);
        let sql = QueryBuilder::from_subquery("x", inner).to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM (SELECT id FROM (SELECT id FROM events) AS e) AS x"
        );
    }
}
