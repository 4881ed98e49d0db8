//! Database backend trait

use super::error::Result;
use super::types::{QueryResult, QueryValue, Row, TransactionExecutor};
use async_trait::async_trait;

/// Operations a database backend provides to the connection handle
#[async_trait]
pub trait DatabaseBackend: Send + Sync {
	/// Execute a statement outside of any explicit transaction
	async fn execute(&self, sql: &str, params: Vec<QueryValue>) -> Result<QueryResult>;

	/// Run a query and collect every row
	async fn fetch_all(&self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Row>>;

	/// Open a transaction on a dedicated connection
	async fn begin(&self) -> Result<Box<dyn TransactionExecutor>>;
}
