//! Query statement traits

use std::fmt::Debug;

use crate::value::Values;

/// Trait for building query statements
///
/// Statements render to PostgreSQL syntax; placeholders, when present, use
/// the numbered `$n` form.
pub trait QueryStatementBuilder: Debug {
	/// Build the SQL text and collect bind values
	///
	/// # Examples
	///
	/// ```rust
	/// use matview_query::prelude::*;
	///
	/// let mut query = Query::column_types();
	/// query.relation("v1");
	///
	/// let (sql, values) = query.build();
	/// assert!(sql.contains("c.relname = $2"));
	/// assert_eq!(values.into_inner(), vec!["public".to_string(), "v1".to_string()]);
	/// ```
	fn build(&self) -> (String, Values);

	/// Build the SQL text, discarding bind values
	fn to_sql(&self) -> String {
		self.build().0
	}
}
