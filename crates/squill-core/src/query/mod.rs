//! SELECT statement building.

mod select;
mod where_clause;

pub use select::{JoinKind, QueryBuilder};
pub use where_clause::Where;
