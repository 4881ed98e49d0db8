//! Column type lookup for a relation
//!
//! `information_schema.columns` does not list materialized views, so the
//! lookup reads `pg_catalog` directly and formats types with `format_type`.

use crate::query::traits::QueryStatementBuilder;
use crate::value::Values;

const DEFAULT_SCHEMA: &str = "public";

const COLUMN_TYPES_SQL: &str = "SELECT a.attname::text AS column_name, \
	format_type(a.atttypid, a.atttypmod) AS data_type \
	FROM pg_catalog.pg_attribute a \
	JOIN pg_catalog.pg_class c ON c.oid = a.attrelid \
	JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace \
	WHERE n.nspname = $1 AND c.relname = $2 AND a.attnum > 0 AND NOT a.attisdropped \
	ORDER BY a.attnum";

/// Query listing `(column_name, data_type)` for a table or materialized view
///
/// A schema-qualified relation (`reports.daily`) selects the schema;
/// otherwise `public` is used.
///
/// # Examples
///
/// ```rust
/// use matview_query::prelude::*;
///
/// let mut query = Query::column_types();
/// query.relation("reports.daily");
/// let (_, values) = query.build();
/// assert_eq!(values.into_inner(), vec!["reports".to_string(), "daily".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTypesQuery {
	pub(crate) schema: String,
	pub(crate) relation: String,
}

impl ColumnTypesQuery {
	/// Create a new lookup against the `public` schema
	pub fn new() -> Self {
		Self {
			schema: DEFAULT_SCHEMA.to_string(),
			relation: String::new(),
		}
	}

	/// Set the relation, splitting off a schema qualifier if present
	pub fn relation(&mut self, qualified: &str) -> &mut Self {
		match qualified.split_once('.') {
			Some((schema, relation)) => {
				self.schema = schema.to_string();
				self.relation = relation.to_string();
			}
			None => self.relation = qualified.to_string(),
		}
		self
	}

	/// Override the schema
	pub fn schema<S>(&mut self, schema: S) -> &mut Self
	where
		S: Into<String>,
	{
		self.schema = schema.into();
		self
	}
}

impl Default for ColumnTypesQuery {
	fn default() -> Self {
		Self::new()
	}
}

impl QueryStatementBuilder for ColumnTypesQuery {
	fn build(&self) -> (String, Values) {
		(
			COLUMN_TYPES_SQL.to_string(),
			Values(vec![self.schema.clone(), self.relation.clone()]),
		)
	}
}
