//! In-memory backend that records every call
//!
//! Used to assert statement text and ordering without a live database.
//!
//! ```rust,ignore
//! use matview_db::testing::{Event, RecordingBackend};
//! use matview_db::TransactionScope;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let backend = RecordingBackend::new();
//! let conn = backend.connection();
//!
//! let mut tx = TransactionScope::begin(&conn).await.unwrap();
//! tx.execute("SELECT 1", vec![]).await.unwrap();
//! tx.commit().await.unwrap();
//!
//! assert_eq!(backend.events().first(), Some(&Event::Begin));
//! # });
//! ```

use crate::backends::{
	DatabaseBackend, DatabaseConnection, DatabaseError, QueryResult, QueryValue, Result, Row,
	TransactionExecutor,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// A call observed by [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	Begin,
	Execute(String),
	Fetch(String, Vec<QueryValue>),
	Commit,
	Rollback,
}

#[derive(Debug, Default)]
struct State {
	events: Vec<Event>,
	failures: Vec<String>,
	rows: Vec<Row>,
}

impl State {
	fn check(&self, sql: &str) -> Result<()> {
		match self.failures.iter().find(|f| sql.contains(f.as_str())) {
			Some(fragment) => Err(DatabaseError::Sql(sqlx::Error::Protocol(format!(
				"simulated failure on statement containing {:?}",
				fragment
			)))),
			None => Ok(()),
		}
	}
}

/// Backend double recording calls in order
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
	state: Arc<Mutex<State>>,
}

impl RecordingBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fail any statement whose text contains `fragment`
	pub fn fail_when_contains(self, fragment: impl Into<String>) -> Self {
		self.state.lock().failures.push(fragment.into());
		self
	}

	/// Rows returned by every fetch
	pub fn with_rows(self, rows: Vec<Row>) -> Self {
		self.state.lock().rows = rows;
		self
	}

	/// Connection handle backed by this recorder
	pub fn connection(&self) -> DatabaseConnection {
		DatabaseConnection::new(Arc::new(self.clone()))
	}

	pub fn events(&self) -> Vec<Event> {
		self.state.lock().events.clone()
	}

	/// SQL text of every executed statement, in order
	pub fn executed(&self) -> Vec<String> {
		self.state
			.lock()
			.events
			.iter()
			.filter_map(|event| match event {
				Event::Execute(sql) => Some(sql.clone()),
				_ => None,
			})
			.collect()
	}

	fn record_execute(&self, sql: &str) -> Result<QueryResult> {
		let mut state = self.state.lock();
		state.events.push(Event::Execute(sql.to_string()));
		state.check(sql)?;
		Ok(QueryResult { rows_affected: 0 })
	}

	fn record_fetch(&self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>> {
		let mut state = self.state.lock();
		state.events.push(Event::Fetch(sql.to_string(), params));
		state.check(sql)?;
		Ok(state.rows.clone())
	}

	fn record(&self, event: Event) {
		self.state.lock().events.push(event);
	}
}

#[async_trait]
impl DatabaseBackend for RecordingBackend {
	async fn execute(&self, sql: &str, _params: Vec<QueryValue>) -> Result<QueryResult> {
		self.record_execute(sql)
	}

	async fn fetch_all(&self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>> {
		self.record_fetch(sql, params)
	}

	async fn begin(&self) -> Result<Box<dyn TransactionExecutor>> {
		self.record(Event::Begin);
		Ok(Box::new(RecordingExecutor {
			backend: self.clone(),
		}))
	}
}

struct RecordingExecutor {
	backend: RecordingBackend,
}

#[async_trait]
impl TransactionExecutor for RecordingExecutor {
	async fn execute(&mut self, sql: &str, _params: Vec<QueryValue>) -> Result<QueryResult> {
		self.backend.record_execute(sql)
	}

	async fn fetch_all(&mut self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>> {
		self.backend.record_fetch(sql, params)
	}

	async fn commit(self: Box<Self>) -> Result<()> {
		self.backend.record(Event::Commit);
		Ok(())
	}

	async fn rollback(self: Box<Self>) -> Result<()> {
		self.backend.record(Event::Rollback);
		Ok(())
	}
}
