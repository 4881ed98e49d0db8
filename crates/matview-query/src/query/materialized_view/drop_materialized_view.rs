//! DROP MATERIALIZED VIEW statement builder

use std::fmt;

use crate::query::traits::QueryStatementBuilder;
use crate::value::Values;

/// DROP MATERIALIZED VIEW statement builder
///
/// # Examples
///
/// ```rust
/// use matview_query::prelude::*;
///
/// // Drop with IF EXISTS
/// let mut query = Query::drop_materialized_view();
/// query.name("my_mv").if_exists();
/// assert_eq!(query.to_string(), "DROP MATERIALIZED VIEW IF EXISTS my_mv");
///
/// // Drop several views with CASCADE
/// let mut query = Query::drop_materialized_view();
/// query.names(["mv1", "mv2"]).cascade();
/// assert_eq!(query.to_string(), "DROP MATERIALIZED VIEW mv1, mv2 CASCADE");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropMaterializedViewStatement {
	pub(crate) names: Vec<String>,
	pub(crate) if_exists: bool,
	pub(crate) cascade: bool,
}

impl DropMaterializedViewStatement {
	/// Create a new DROP MATERIALIZED VIEW statement
	pub fn new() -> Self {
		Self::default()
	}

	/// Take the ownership of data in the current statement
	pub fn take(&mut self) -> Self {
		Self {
			names: std::mem::take(&mut self.names),
			if_exists: self.if_exists,
			cascade: self.cascade,
		}
	}

	/// Add a materialized view name
	pub fn name<N>(&mut self, name: N) -> &mut Self
	where
		N: Into<String>,
	{
		self.names.push(name.into());
		self
	}

	/// Add multiple materialized view names
	pub fn names<I, N>(&mut self, names: I) -> &mut Self
	where
		I: IntoIterator<Item = N>,
		N: Into<String>,
	{
		self.names.extend(names.into_iter().map(Into::into));
		self
	}

	/// Add IF EXISTS clause
	pub fn if_exists(&mut self) -> &mut Self {
		self.if_exists = true;
		self
	}

	/// Add CASCADE clause
	pub fn cascade(&mut self) -> &mut Self {
		self.cascade = true;
		self
	}
}

impl QueryStatementBuilder for DropMaterializedViewStatement {
	fn build(&self) -> (String, Values) {
		let mut sql = String::from("DROP MATERIALIZED VIEW");
		if self.if_exists {
			sql.push_str(" IF EXISTS");
		}
		sql.push(' ');
		sql.push_str(&self.names.join(", "));
		if self.cascade {
			sql.push_str(" CASCADE");
		}
		(sql, Values::new())
	}
}

impl fmt::Display for DropMaterializedViewStatement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_sql())
	}
}
