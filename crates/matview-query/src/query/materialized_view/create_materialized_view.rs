//! CREATE MATERIALIZED VIEW statement builder
//!
//! Renders `CREATE MATERIALIZED VIEW <name> AS (<sql>); <trailer>`.
//! The trailer slot carries follow-up DDL that must run in the same batch,
//! typically the view's unique index. An empty trailer still leaves the
//! separating space after the semicolon.

use std::fmt;

use crate::query::traits::QueryStatementBuilder;
use crate::value::Values;

/// CREATE MATERIALIZED VIEW statement builder
///
/// # Examples
///
/// ```rust
/// use matview_query::prelude::*;
///
/// let mut query = Query::create_materialized_view();
/// query
///     .name("active_users_mv")
///     .as_sql("SELECT id, name FROM users WHERE active")
///     .trailer("CREATE UNIQUE INDEX active_users_mv_id ON active_users_mv(id);");
///
/// assert_eq!(
///     query.to_string(),
///     "CREATE MATERIALIZED VIEW active_users_mv AS (SELECT id, name FROM users WHERE active); \
///      CREATE UNIQUE INDEX active_users_mv_id ON active_users_mv(id);"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateMaterializedViewStatement {
	pub(crate) name: String,
	pub(crate) select_sql: String,
	pub(crate) trailer: String,
}

impl CreateMaterializedViewStatement {
	/// Create a new CREATE MATERIALIZED VIEW statement
	pub fn new() -> Self {
		Self::default()
	}

	/// Take the ownership of data in the current statement
	pub fn take(&mut self) -> Self {
		std::mem::take(self)
	}

	/// Set the materialized view name
	pub fn name<N>(&mut self, name: N) -> &mut Self
	where
		N: Into<String>,
	{
		self.name = name.into();
		self
	}

	/// Set the defining query
	///
	/// The text is wrapped in parentheses as-is, on the same line as the
	/// closing `)`. The caller must strip a trailing semicolon, and must end
	/// a trailing `--` comment with a newline; otherwise the comment swallows
	/// the `)` and the statement no longer parses.
	pub fn as_sql<S>(&mut self, sql: S) -> &mut Self
	where
		S: Into<String>,
	{
		self.select_sql = sql.into();
		self
	}

	/// Set the statement text that follows the view definition
	pub fn trailer<T>(&mut self, trailer: T) -> &mut Self
	where
		T: Into<String>,
	{
		self.trailer = trailer.into();
		self
	}

	/// Name of the view being created
	pub fn view_name(&self) -> &str {
		&self.name
	}
}

impl QueryStatementBuilder for CreateMaterializedViewStatement {
	fn build(&self) -> (String, Values) {
		let sql = format!(
			"CREATE MATERIALIZED VIEW {} AS ({}); {}",
			self.name, self.select_sql, self.trailer
		);
		(sql, Values::new())
	}
}

impl fmt::Display for CreateMaterializedViewStatement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_sql())
	}
}
