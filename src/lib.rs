//! # matview
//!
//! Create, refresh, and drop a PostgreSQL materialized view described by a
//! small configuration file.
//!
//! The view's defining query is kept in its own SQL resource, located by a
//! dotted module path and a file name. [`ViewRenderer`] loads it, renders the
//! lifecycle statements, and runs each statement in its own transaction.
//!
//! ## Crates
//!
//! - [`query`] (`matview-query`): statement builders
//! - [`db`] (`matview-db`): connection handle and transaction scopes over `sqlx`
//! - [`conf`] (`matview-conf`): TOML configuration with environment overrides
//!
//! ## Generated SQL
//!
//! | Operation | Statement |
//! |-----------|-----------|
//! | create | `CREATE MATERIALIZED VIEW <view> AS (<sql>); <index>` |
//! | index | `CREATE UNIQUE INDEX <index_name> ON <view>(<column>);` |
//! | delete | `DROP MATERIALIZED VIEW IF EXISTS <view>` |
//!
//! `refresh` is a delete followed by a create.
//!
//! ## Example
//!
//! ```rust,no_run
//! use matview::{ConfigOverrides, FilesystemSource, ViewConfig, ViewRenderer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ViewConfig::load("view.toml", &ConfigOverrides::default())?;
//! let source = FilesystemSource::new(&config.sql_root);
//!
//! let renderer = ViewRenderer::from_config(config, &source)?;
//! println!("{}", renderer.create_sql());
//! renderer.create_view().await?;
//! # Ok(())
//! # }
//! ```

pub mod renderer;
pub mod source;

pub use matview_conf as conf;
pub use matview_db as db;
pub use matview_query as query;

pub use matview_conf::{ConfigError, ConfigOverrides, ViewConfig};
pub use renderer::{ColumnType, CreateArguments, RenderError, Result, ViewRenderer};
pub use source::{FilesystemSource, MemorySource, SourceError, SqlSource};

/// Commonly used items
pub mod prelude {
	pub use crate::renderer::{CreateArguments, RenderError, ViewRenderer};
	pub use crate::source::{FilesystemSource, MemorySource, SqlSource};
	pub use matview_conf::{ConfigOverrides, ViewConfig};
}
