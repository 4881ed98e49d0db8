//! Query statement builders
//!
//! # DDL Usage - Materialized View Operations
//!
//! - Create Materialized View: [`CreateMaterializedViewStatement`]
//! - Drop Materialized View: [`DropMaterializedViewStatement`]
//!
//! # DDL Usage - Index Operations
//!
//! - Create Index: [`CreateIndexStatement`]
//!
//! # Catalog Queries
//!
//! - Column types of a relation: [`ColumnTypesQuery`]

mod column_types;
mod create_index;
mod materialized_view;
mod traits;

pub use column_types::*;
pub use create_index::*;
pub use materialized_view::*;
pub use traits::*;

/// Entry point for constructing statements
#[derive(Debug, Clone, Copy)]
pub struct Query;

impl Query {
	/// Construct a new [`CreateMaterializedViewStatement`]
	///
	/// # Examples
	///
	/// ```rust
	/// use matview_query::prelude::*;
	///
	/// let mut stmt = Query::create_materialized_view();
	/// stmt.name("v1").as_sql("SELECT 1");
	/// assert_eq!(stmt.to_string(), "CREATE MATERIALIZED VIEW v1 AS (SELECT 1); ");
	/// ```
	pub fn create_materialized_view() -> CreateMaterializedViewStatement {
		CreateMaterializedViewStatement::new()
	}

	/// Construct a new [`DropMaterializedViewStatement`]
	///
	/// # Examples
	///
	/// ```rust
	/// use matview_query::prelude::*;
	///
	/// let mut stmt = Query::drop_materialized_view();
	/// stmt.name("v1").if_exists();
	/// assert_eq!(stmt.to_string(), "DROP MATERIALIZED VIEW IF EXISTS v1");
	/// ```
	pub fn drop_materialized_view() -> DropMaterializedViewStatement {
		DropMaterializedViewStatement::new()
	}

	/// Construct a new non-unique [`CreateIndexStatement`]
	pub fn create_index() -> CreateIndexStatement {
		CreateIndexStatement::new()
	}

	/// Construct a new [`CreateIndexStatement`] with UNIQUE set
	///
	/// # Examples
	///
	/// ```rust
	/// use matview_query::prelude::*;
	///
	/// let mut stmt = Query::create_unique_index();
	/// stmt.name("v1_id_idx").table("v1").column("id");
	/// assert_eq!(stmt.to_string(), "CREATE UNIQUE INDEX v1_id_idx ON v1(id);");
	/// ```
	pub fn create_unique_index() -> CreateIndexStatement {
		let mut stmt = CreateIndexStatement::new();
		stmt.unique();
		stmt
	}

	/// Construct a new [`ColumnTypesQuery`]
	pub fn column_types() -> ColumnTypesQuery {
		ColumnTypesQuery::new()
	}
}
