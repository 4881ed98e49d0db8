//! # matview-conf
//!
//! Configuration for a single materialized view.
//!
//! Sources are layered in priority order:
//!
//! 1. CLI overrides ([`ConfigOverrides`])
//! 2. Environment variables (`MATVIEW_DB_URL`, then `DATABASE_URL`)
//! 3. TOML configuration file
//! 4. Defaults
//!
//! ## Example
//!
//! ```rust
//! use matview_conf::ViewConfig;
//!
//! let config = ViewConfig::from_toml(
//!     r#"
//! db_url = "postgres://localhost/app"
//! view_name = "daily_sales"
//! sql_module = "reports"
//! sql_name = "daily_sales.sql"
//! create_index = true
//! index_name = "daily_sales_day_idx"
//! index_column = "day"
//! "#,
//! )
//! .unwrap();
//!
//! assert!(config.create_index);
//! assert!(config.validate().is_ok());
//! ```

mod error;
mod view_config;

pub use error::{ConfigError, Result};
pub use view_config::{ConfigOverrides, DATABASE_URL_ENV, MATVIEW_DB_URL_ENV, ViewConfig};
