//! PostgreSQL dialect implementation

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Postgres, Transaction};
use std::sync::Arc;

use super::super::{
	backend::DatabaseBackend,
	error::{DatabaseError, Result},
	types::{QueryResult, QueryValue, Row, TransactionExecutor},
};

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

fn bind_value<'q>(query: PgQuery<'q>, value: &'q QueryValue) -> PgQuery<'q> {
	match value {
		QueryValue::Null => query.bind(None::<i32>),
		QueryValue::Bool(b) => query.bind(b),
		QueryValue::Int(i) => query.bind(i),
		QueryValue::Float(f) => query.bind(f),
		QueryValue::String(s) => query.bind(s.as_str()),
	}
}

// Parameterless statements skip `bind_all` and run as plain `&str` (simple
// query protocol), which accepts several semicolon-separated commands.
fn bind_all<'q>(sql: &'q str, params: &'q [QueryValue]) -> PgQuery<'q> {
	params
		.iter()
		.fold(sqlx::query(sql), |query, param| bind_value(query, param))
}

fn consumed() -> DatabaseError {
	DatabaseError::TransactionError("Transaction already consumed".to_string())
}

/// PostgreSQL database backend
pub struct PostgresBackend {
	pool: Arc<PgPool>,
}

impl PostgresBackend {
	pub fn new(pool: PgPool) -> Self {
		Self {
			pool: Arc::new(pool),
		}
	}

	/// Build a backend whose pool opens connections on first use
	///
	/// Only the URL is validated here; connectivity errors surface from the
	/// first statement executed. Idle and lifetime reaping are disabled so no
	/// maintenance task is spawned, which keeps this callable without a
	/// Tokio runtime.
	pub fn connect_lazy(url: &str) -> Result<Self> {
		let pool = PgPoolOptions::new()
			.min_connections(0)
			.idle_timeout(None)
			.max_lifetime(None)
			.connect_lazy(url)?;
		Ok(Self::new(pool))
	}

	/// Build a backend and open the first connection immediately
	pub async fn connect(url: &str) -> Result<Self> {
		let pool = PgPoolOptions::new().connect(url).await?;
		Ok(Self::new(pool))
	}

	pub fn pool(&self) -> &PgPool {
		&self.pool
	}

	/// Row conversion shared between backend and transaction executor
	pub(crate) fn convert_row(pg_row: PgRow) -> Result<Row> {
		use sqlx::Row as SqlxRow;

		let mut row = Row::new();
		for column in pg_row.columns() {
			let name = column.name();

			if let Ok(value) = pg_row.try_get::<String, _>(name) {
				row.insert(name, QueryValue::String(value));
			} else if let Ok(value) = pg_row.try_get::<i64, _>(name) {
				row.insert(name, QueryValue::Int(value));
			} else if let Ok(value) = pg_row.try_get::<i32, _>(name) {
				row.insert(name, QueryValue::Int(value as i64));
			} else if let Ok(value) = pg_row.try_get::<bool, _>(name) {
				row.insert(name, QueryValue::Bool(value));
			} else if let Ok(value) = pg_row.try_get::<f64, _>(name) {
				row.insert(name, QueryValue::Float(value));
			} else {
				row.insert(name, QueryValue::Null);
			}
		}
		Ok(row)
	}
}

#[async_trait]
impl DatabaseBackend for PostgresBackend {
	async fn execute(&self, sql: &str, params: Vec<QueryValue>) -> Result<QueryResult> {
		let result = if params.is_empty() {
			sqlx::raw_sql(sql).execute(self.pool.as_ref()).await?
		} else {
			bind_all(sql, &params).execute(self.pool.as_ref()).await?
		};
		Ok(QueryResult {
			rows_affected: result.rows_affected(),
		})
	}

	async fn fetch_all(&self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>> {
		let rows = bind_all(sql, &params).fetch_all(self.pool.as_ref()).await?;
		rows.into_iter().map(Self::convert_row).collect()
	}

	async fn begin(&self) -> Result<Box<dyn TransactionExecutor>> {
		let tx = self.pool.begin().await?;
		Ok(Box::new(PgTransactionExecutor::new(tx)))
	}
}

/// PostgreSQL transaction executor
///
/// Wraps a SQLx `Transaction` so all statements in a scope share one
/// physical connection. Dropping it unfinished rolls the transaction back.
pub struct PgTransactionExecutor {
	tx: Option<Transaction<'static, Postgres>>,
}

impl PgTransactionExecutor {
	pub fn new(tx: Transaction<'static, Postgres>) -> Self {
		Self { tx: Some(tx) }
	}
}

#[async_trait]
impl TransactionExecutor for PgTransactionExecutor {
	async fn execute(&mut self, sql: &str, params: Vec<QueryValue>) -> Result<QueryResult> {
		let tx = self.tx.as_mut().ok_or_else(consumed)?;
		let result = if params.is_empty() {
			sqlx::Executor::execute(&mut **tx, sql).await?
		} else {
			bind_all(sql, &params).execute(&mut **tx).await?
		};
		Ok(QueryResult {
			rows_affected: result.rows_affected(),
		})
	}

	async fn fetch_all(&mut self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>> {
		let tx = self.tx.as_mut().ok_or_else(consumed)?;
		let rows = bind_all(sql, &params).fetch_all(&mut **tx).await?;
		rows.into_iter().map(PostgresBackend::convert_row).collect()
	}

	async fn commit(mut self: Box<Self>) -> Result<()> {
		let tx = self.tx.take().ok_or_else(consumed)?;
		tx.commit().await?;
		Ok(())
	}

	async fn rollback(mut self: Box<Self>) -> Result<()> {
		let tx = self.tx.take().ok_or_else(consumed)?;
		tx.rollback().await?;
		Ok(())
	}
}
