//! Common type definitions for database abstraction

use super::error::{DatabaseError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Query value types
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
}

impl From<&str> for QueryValue {
	fn from(s: &str) -> Self {
		QueryValue::String(s.to_string())
	}
}

impl From<String> for QueryValue {
	fn from(s: String) -> Self {
		QueryValue::String(s)
	}
}

impl From<i64> for QueryValue {
	fn from(i: i64) -> Self {
		QueryValue::Int(i)
	}
}

impl From<i32> for QueryValue {
	fn from(i: i32) -> Self {
		QueryValue::Int(i as i64)
	}
}

impl From<f64> for QueryValue {
	fn from(f: f64) -> Self {
		QueryValue::Float(f)
	}
}

impl From<bool> for QueryValue {
	fn from(b: bool) -> Self {
		QueryValue::Bool(b)
	}
}

/// Query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
	pub rows_affected: u64,
}

/// Row from query result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
	pub data: HashMap<String, QueryValue>,
}

impl Row {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) {
		self.data.insert(key.into(), value);
	}

	/// Get a column converted to `T`
	pub fn get<T>(&self, key: &str) -> Result<T>
	where
		T: TryFrom<QueryValue, Error = DatabaseError>,
	{
		self.data
			.get(key)
			.cloned()
			.ok_or_else(|| DatabaseError::ColumnNotFound(key.to_string()))
			.and_then(T::try_from)
	}
}

impl TryFrom<QueryValue> for String {
	type Error = DatabaseError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::String(s) => Ok(s),
			_ => Err(DatabaseError::TypeError(format!(
				"Cannot convert {:?} to String",
				value
			))),
		}
	}
}

impl TryFrom<QueryValue> for i64 {
	type Error = DatabaseError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::Int(i) => Ok(i),
			_ => Err(DatabaseError::TypeError(format!(
				"Cannot convert {:?} to i64",
				value
			))),
		}
	}
}

impl TryFrom<QueryValue> for bool {
	type Error = DatabaseError;

	fn try_from(value: QueryValue) -> Result<Self> {
		match value {
			QueryValue::Bool(b) => Ok(b),
			_ => Err(DatabaseError::TypeError(format!(
				"Cannot convert {:?} to bool",
				value
			))),
		}
	}
}

/// Executor bound to a single open transaction
///
/// Every statement runs on the same physical connection until `commit` or
/// `rollback` consumes the executor.
#[async_trait]
pub trait TransactionExecutor: Send + Sync {
	async fn execute(&mut self, sql: &str, params: Vec<QueryValue>) -> Result<QueryResult>;

	async fn fetch_all(&mut self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>>;

	async fn commit(self: Box<Self>) -> Result<()>;

	async fn rollback(self: Box<Self>) -> Result<()>;
}
