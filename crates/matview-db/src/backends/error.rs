//! Database error types

/// Errors raised by the database layer
///
/// Driver failures (bad SQL, connectivity, permissions) are wrapped without
/// translation; their `Display` output is the driver's own.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
	#[error(transparent)]
	Sql(#[from] sqlx::Error),

	#[error("Transaction error: {0}")]
	TransactionError(String),

	#[error("Column not found: {0}")]
	ColumnNotFound(String),

	#[error("Type error: {0}")]
	TypeError(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
