//! CREATE INDEX statement builder

use std::fmt;

use crate::query::traits::QueryStatementBuilder;
use crate::value::Values;

/// CREATE [UNIQUE] INDEX statement builder
///
/// Rendered with a trailing semicolon so it can be appended after another
/// statement in the same batch.
///
/// # Examples
///
/// ```rust
/// use matview_query::prelude::*;
///
/// let mut query = Query::create_unique_index();
/// query.name("orders_mv_key").table("orders_mv").columns(["day", "region"]);
/// assert_eq!(
///     query.to_string(),
///     "CREATE UNIQUE INDEX orders_mv_key ON orders_mv(day, region);"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateIndexStatement {
	pub(crate) name: String,
	pub(crate) table: String,
	pub(crate) columns: Vec<String>,
	pub(crate) unique: bool,
}

impl CreateIndexStatement {
	/// Create a new CREATE INDEX statement
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the index name
	pub fn name<N>(&mut self, name: N) -> &mut Self
	where
		N: Into<String>,
	{
		self.name = name.into();
		self
	}

	/// Set the indexed table or materialized view
	pub fn table<T>(&mut self, table: T) -> &mut Self
	where
		T: Into<String>,
	{
		self.table = table.into();
		self
	}

	/// Add an indexed column
	pub fn column<C>(&mut self, column: C) -> &mut Self
	where
		C: Into<String>,
	{
		self.columns.push(column.into());
		self
	}

	/// Add multiple indexed columns
	pub fn columns<I, C>(&mut self, columns: I) -> &mut Self
	where
		I: IntoIterator<Item = C>,
		C: Into<String>,
	{
		self.columns.extend(columns.into_iter().map(Into::into));
		self
	}

	/// Add UNIQUE
	pub fn unique(&mut self) -> &mut Self {
		self.unique = true;
		self
	}
}

impl QueryStatementBuilder for CreateIndexStatement {
	fn build(&self) -> (String, Values) {
		let sql = format!(
			"CREATE {}INDEX {} ON {}({});",
			if self.unique { "UNIQUE " } else { "" },
			self.name,
			self.table,
			self.columns.join(", ")
		);
		(sql, Values::new())
	}
}

impl fmt::Display for CreateIndexStatement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_sql())
	}
}
