//! # matview-query
//!
//! SQL statement builders for the materialized view lifecycle.
//!
//! Every builder follows the same fluent shape: construct through [`Query`],
//! configure with `&mut self` setters, then render with
//! [`QueryStatementBuilder::build`] (SQL text plus bind values) or through
//! `Display`.
//!
//! Identifiers and query bodies are written verbatim. Callers that need
//! quoting (mixed-case names, reserved words) pass already-quoted text, the
//! same way they would when substituting into a hand-written template.
//!
//! ## Statements
//!
//! - CREATE MATERIALIZED VIEW: [`CreateMaterializedViewStatement`]
//! - DROP MATERIALIZED VIEW: [`DropMaterializedViewStatement`]
//! - CREATE [UNIQUE] INDEX: [`CreateIndexStatement`]
//! - Column type lookup: [`ColumnTypesQuery`]
//!
//! ## Quick Start
//!
//! ```rust
//! use matview_query::prelude::*;
//!
//! let mut index = Query::create_unique_index();
//! index.name("daily_sales_day_idx").table("daily_sales").column("day");
//!
//! let mut create = Query::create_materialized_view();
//! create
//!     .name("daily_sales")
//!     .as_sql("SELECT day, sum(total) AS total FROM orders GROUP BY day")
//!     .trailer(index.to_string());
//!
//! assert_eq!(
//!     create.to_string(),
//!     "CREATE MATERIALIZED VIEW daily_sales AS \
//!      (SELECT day, sum(total) AS total FROM orders GROUP BY day); \
//!      CREATE UNIQUE INDEX daily_sales_day_idx ON daily_sales(day);"
//! );
//! ```

pub mod query;
pub mod value;

pub use query::*;
pub use value::Values;

/// Commonly used items
pub mod prelude {
	pub use crate::query::{
		ColumnTypesQuery, CreateIndexStatement, CreateMaterializedViewStatement,
		DropMaterializedViewStatement, Query, QueryStatementBuilder,
	};
	pub use crate::value::Values;
}
