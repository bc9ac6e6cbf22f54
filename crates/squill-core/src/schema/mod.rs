//! Declarative schema DSL.
//!
//! These types describe the desired shape of a table with zero database
//! interaction; they render themselves to DDL text. The SQLite driver's
//! reconciler consumes them to converge a live database toward the
//! declared shape.

mod column;
mod constraint;
mod index;
mod table;

pub use column::{Column, SqlType};
pub use constraint::{Constraint, ForeignKeyAction};
pub use index::Index;
pub use table::Table;
