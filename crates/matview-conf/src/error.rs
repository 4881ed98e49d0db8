use std::path::PathBuf;

/// Configuration errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("IO error reading {path}: {source}")]
	IoError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse configuration: {message}")]
	ParseError { message: String },

	#[error(
		"Database URL not specified. Set MATVIEW_DB_URL or DATABASE_URL, or use --database-url"
	)]
	MissingDatabaseUrl,

	#[error("Missing required setting: {field}")]
	MissingField { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
