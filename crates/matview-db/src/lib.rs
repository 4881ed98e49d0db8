//! # matview-db
//!
//! Database client layer for the materialized view renderer.
//!
//! ## Overview
//!
//! - [`DatabaseBackend`]: backend trait (execute, fetch, begin)
//! - [`PostgresBackend`]: PostgreSQL implementation over `sqlx::PgPool`
//! - [`DatabaseConnection`]: cloneable engine handle shared by callers
//! - [`TransactionScope`] / [`transaction()`]: scoped units of work that
//!   commit on success and roll back on failure
//!
//! Driver errors are carried unmodified inside [`DatabaseError::Sql`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use matview_db::{DatabaseConnection, transaction};
//!
//! # async fn example() -> matview_db::Result<()> {
//! let conn = DatabaseConnection::connect_lazy("postgres://localhost/app")?;
//!
//! let sql = "DROP MATERIALIZED VIEW IF EXISTS daily_sales".to_string();
//! transaction(&conn, move |tx| {
//!     Box::pin(async move {
//!         tx.execute(&sql, Vec::new()).await?;
//!         Ok(())
//!     })
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod transaction;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backends::{
	DatabaseBackend, DatabaseConnection, DatabaseError, PgTransactionExecutor, PostgresBackend,
	QueryResult, QueryValue, Result, Row, TransactionExecutor,
};
pub use transaction::{TransactionScope, transaction};
