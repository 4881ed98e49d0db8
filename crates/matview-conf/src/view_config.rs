//! View configuration model and loading.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Highest-priority environment variable for the connection string
pub const MATVIEW_DB_URL_ENV: &str = "MATVIEW_DB_URL";

/// Conventional fallback environment variable for the connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

fn default_sql_root() -> PathBuf {
	PathBuf::from(".")
}

/// Configuration for one materialized view.
///
/// `sql_module` is a dotted locator (`reports.daily`) resolved against
/// `sql_root`; `sql_name` is the file holding the defining query.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
	/// Database connection string
	#[serde(default)]
	pub db_url: String,

	/// Target view name, optionally schema-qualified
	pub view_name: String,

	#[serde(default)]
	pub sql_module: String,

	#[serde(default)]
	pub sql_name: String,

	/// Directory SQL modules are resolved against
	#[serde(default = "default_sql_root")]
	pub sql_root: PathBuf,

	/// Create a unique index right after the view
	#[serde(default)]
	pub create_index: bool,

	#[serde(default)]
	pub index_name: String,

	#[serde(default)]
	pub index_column: String,
}

impl ViewConfig {
	/// Create a configuration with connection string and view name.
	pub fn new(db_url: impl Into<String>, view_name: impl Into<String>) -> Self {
		Self {
			db_url: db_url.into(),
			view_name: view_name.into(),
			sql_module: String::new(),
			sql_name: String::new(),
			sql_root: default_sql_root(),
			create_index: false,
			index_name: String::new(),
			index_column: String::new(),
		}
	}

	/// Set the SQL resource locator.
	pub fn with_sql(mut self, module: impl Into<String>, name: impl Into<String>) -> Self {
		self.sql_module = module.into();
		self.sql_name = name.into();
		self
	}

	/// Set the directory SQL modules are resolved against.
	pub fn with_sql_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.sql_root = root.into();
		self
	}

	/// Request a unique index on `column` named `name`.
	pub fn with_index(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
		self.create_index = true;
		self.index_name = name.into();
		self.index_column = column.into();
		self
	}

	/// Load configuration from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		tracing::debug!(path = %path.display(), "Loading view configuration");
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
			path: path.to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse configuration from TOML string.
	pub fn from_toml(content: &str) -> Result<Self> {
		toml::from_str(content).map_err(|e| ConfigError::ParseError {
			message: e.to_string(),
		})
	}

	/// Apply connection-string overrides from the process environment.
	pub fn apply_env(&mut self) {
		self.apply_env_from(|key| std::env::var(key).ok());
	}

	/// Apply connection-string overrides using `lookup` for variables.
	///
	/// `MATVIEW_DB_URL` wins over `DATABASE_URL`; empty values are ignored.
	pub fn apply_env_from<F>(&mut self, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		let url = [MATVIEW_DB_URL_ENV, DATABASE_URL_ENV]
			.into_iter()
			.find_map(|key| lookup(key).filter(|value| !value.trim().is_empty()));

		if let Some(url) = url {
			self.db_url = url;
		}
	}

	/// Merge CLI overrides; they take precedence over every other source.
	pub fn merge(&mut self, overrides: &ConfigOverrides) {
		if let Some(ref url) = overrides.db_url {
			self.db_url = url.clone();
		}
		if let Some(ref root) = overrides.sql_root {
			self.sql_root = root.clone();
		}
		if let Some(ref name) = overrides.view_name {
			self.view_name = name.clone();
		}
	}

	/// Check that every setting the renderer needs is present.
	pub fn validate(&self) -> Result<()> {
		if self.db_url.trim().is_empty() {
			return Err(ConfigError::MissingDatabaseUrl);
		}
		if self.view_name.trim().is_empty() {
			return Err(ConfigError::MissingField { field: "view_name" });
		}
		if self.sql_name.trim().is_empty() {
			return Err(ConfigError::MissingField { field: "sql_name" });
		}
		if self.create_index {
			if self.index_name.trim().is_empty() {
				return Err(ConfigError::MissingField {
					field: "index_name",
				});
			}
			if self.index_column.trim().is_empty() {
				return Err(ConfigError::MissingField {
					field: "index_column",
				});
			}
		}
		Ok(())
	}

	/// Read a file, then layer environment and CLI overrides, then validate.
	pub fn load(path: impl AsRef<Path>, overrides: &ConfigOverrides) -> Result<Self> {
		let mut config = Self::from_file(path)?;
		config.apply_env();
		config.merge(overrides);
		config.validate()?;
		Ok(config)
	}
}

/// Values supplied on the command line that override the file.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
	pub db_url: Option<String>,
	pub sql_root: Option<PathBuf>,
	pub view_name: Option<String>,
}

impl ConfigOverrides {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_db_url(mut self, url: Option<String>) -> Self {
		self.db_url = url;
		self
	}

	pub fn with_sql_root(mut self, root: Option<PathBuf>) -> Self {
		self.sql_root = root;
		self
	}

	pub fn with_view_name(mut self, name: Option<String>) -> Self {
		self.view_name = name;
		self
	}
}
