//! Backend abstractions and the PostgreSQL dialect

pub mod backend;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod types;

pub use backend::DatabaseBackend;
pub use connection::DatabaseConnection;
pub use dialect::postgres::{PgTransactionExecutor, PostgresBackend};
pub use error::{DatabaseError, Result};
pub use types::{QueryResult, QueryValue, Row, TransactionExecutor};
