//! Database connection handle

use super::backend::DatabaseBackend;
use super::dialect::postgres::PostgresBackend;
use super::error::Result;
use super::types::{QueryResult, QueryValue, Row, TransactionExecutor};
use std::fmt;
use std::sync::Arc;

/// Cloneable handle to a database backend
///
/// Clones share the same backend (and therefore the same pool).
#[derive(Clone)]
pub struct DatabaseConnection {
	backend: Arc<dyn DatabaseBackend>,
}

impl DatabaseConnection {
	pub fn new(backend: Arc<dyn DatabaseBackend>) -> Self {
		Self { backend }
	}

	/// Create an engine for a PostgreSQL URL without connecting
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use matview_db::DatabaseConnection;
	///
	/// # async fn example() -> matview_db::Result<()> {
	/// let conn = DatabaseConnection::connect_lazy("postgres://postgres@localhost/app")?;
	/// conn.execute("SELECT 1", vec![]).await?;
	/// # Ok(())
	/// # }
	/// ```
	pub fn connect_lazy(url: &str) -> Result<Self> {
		tracing::debug!("Creating lazy PostgreSQL engine");
		let backend = PostgresBackend::connect_lazy(url)?;
		Ok(Self::new(Arc::new(backend)))
	}

	/// Create an engine for a PostgreSQL URL and open a connection now
	pub async fn connect(url: &str) -> Result<Self> {
		let backend = PostgresBackend::connect(url).await?;
		Ok(Self::new(Arc::new(backend)))
	}

	pub fn backend(&self) -> &Arc<dyn DatabaseBackend> {
		&self.backend
	}

	/// Execute a statement outside of an explicit transaction
	pub async fn execute(&self, sql: &str, params: Vec<QueryValue>) -> Result<u64> {
		let QueryResult { rows_affected } = self.backend.execute(sql, params).await?;
		Ok(rows_affected)
	}

	pub async fn fetch_all(&self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>> {
		self.backend.fetch_all(sql, params).await
	}

	pub async fn begin(&self) -> Result<Box<dyn TransactionExecutor>> {
		self.backend.begin().await
	}
}

impl fmt::Debug for DatabaseConnection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DatabaseConnection").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[rstest]
	fn test_connect_lazy_without_runtime() {
		let conn = DatabaseConnection::connect_lazy("postgres://localhost/app");
		assert!(conn.is_ok());
	}

	#[rstest]
	fn test_connect_lazy_rejects_malformed_url() {
		let result = DatabaseConnection::connect_lazy("not a url");
		assert!(result.is_err());
	}
}
