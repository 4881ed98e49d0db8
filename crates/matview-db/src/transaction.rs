//! # Transaction Management
//!
//! ## Recommended API: Closure-based Transactions
//!
//! [`transaction()`] runs a closure inside a [`TransactionScope`], committing
//! when it returns `Ok` and rolling back when it returns `Err`.
//!
//! ```rust,no_run
//! use matview_db::{DatabaseConnection, transaction};
//!
//! # async fn example(conn: DatabaseConnection) -> matview_db::Result<()> {
//! let affected = transaction(&conn, |tx| {
//!     Box::pin(async move { tx.execute("REFRESH MATERIALIZED VIEW v1", vec![]).await })
//! })
//! .await?;
//! # let _ = affected;
//! # Ok(())
//! # }
//! ```
//!
//! ## Low-level API: TransactionScope
//!
//! ```rust,no_run
//! use matview_db::{DatabaseConnection, TransactionScope};
//!
//! # async fn example(conn: DatabaseConnection) -> matview_db::Result<()> {
//! let mut tx = TransactionScope::begin(&conn).await?;
//! tx.execute("DROP MATERIALIZED VIEW IF EXISTS v1", vec![]).await?;
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

use crate::backends::{
	DatabaseConnection, DatabaseError, QueryValue, Result, Row, TransactionExecutor,
};
use futures::future::BoxFuture;

/// A bounded unit of work on one connection
///
/// Consumed by [`commit`](Self::commit) or [`rollback`](Self::rollback).
/// Dropping an unfinished scope leaves the rollback to the driver.
pub struct TransactionScope {
	executor: Option<Box<dyn TransactionExecutor>>,
}

impl TransactionScope {
	/// Begin a new transaction scope
	pub async fn begin(conn: &DatabaseConnection) -> Result<Self> {
		let executor = conn.begin().await?;
		tracing::debug!("Transaction started");
		Ok(Self {
			executor: Some(executor),
		})
	}

	fn executor(&mut self) -> Result<&mut Box<dyn TransactionExecutor>> {
		self.executor
			.as_mut()
			.ok_or_else(|| DatabaseError::TransactionError("Transaction already consumed".into()))
	}

	/// Execute a SQL statement within the transaction
	pub async fn execute(&mut self, sql: &str, params: Vec<QueryValue>) -> Result<u64> {
		let result = self.executor()?.execute(sql, params).await?;
		Ok(result.rows_affected)
	}

	/// Execute a SQL query and return all rows within the transaction
	pub async fn fetch_all(&mut self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>> {
		self.executor()?.fetch_all(sql, params).await
	}

	/// Commit the transaction
	pub async fn commit(mut self) -> Result<()> {
		let executor = self.executor.take().ok_or_else(|| {
			DatabaseError::TransactionError("Transaction already consumed".into())
		})?;
		executor.commit().await?;
		tracing::debug!("Transaction committed");
		Ok(())
	}

	/// Roll the transaction back
	pub async fn rollback(mut self) -> Result<()> {
		let executor = self.executor.take().ok_or_else(|| {
			DatabaseError::TransactionError("Transaction already consumed".into())
		})?;
		executor.rollback().await?;
		tracing::debug!("Transaction rolled back");
		Ok(())
	}

	/// Whether the scope still holds an open transaction
	pub fn is_active(&self) -> bool {
		self.executor.is_some()
	}
}

impl Drop for TransactionScope {
	fn drop(&mut self) {
		if self.executor.is_some() {
			tracing::warn!("Transaction scope dropped without commit or rollback; rolling back");
		}
	}
}

/// Run `f` inside a transaction scope
///
/// Commits when `f` returns `Ok`. On `Err` the scope is rolled back and the
/// closure's error is returned; a failing rollback is logged, not returned.
pub async fn transaction<T, F>(conn: &DatabaseConnection, f: F) -> Result<T>
where
	F: for<'t> FnOnce(&'t mut TransactionScope) -> BoxFuture<'t, Result<T>>,
{
	let mut tx = TransactionScope::begin(conn).await?;

	match f(&mut tx).await {
		Ok(value) => {
			tx.commit().await?;
			Ok(value)
		}
		Err(e) => {
			if let Err(rollback_error) = tx.rollback().await {
				tracing::warn!(error = %rollback_error, "Rollback failed after statement error");
			}
			Err(e)
		}
	}
}
