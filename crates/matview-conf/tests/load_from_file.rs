//! File-based loading with environment and CLI layering

use matview_conf::{ConfigError, ConfigOverrides, DATABASE_URL_ENV, MATVIEW_DB_URL_ENV, ViewConfig};
use rstest::*;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

struct EnvGuard {
	saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
	fn clear() -> Self {
		let saved = [MATVIEW_DB_URL_ENV, DATABASE_URL_ENV]
			.into_iter()
			.map(|key| (key, std::env::var(key).ok()))
			.collect();
		for key in [MATVIEW_DB_URL_ENV, DATABASE_URL_ENV] {
			// SAFETY: tests touching the environment are serialized.
			unsafe { std::env::remove_var(key) };
		}
		Self { saved }
	}
}

impl Drop for EnvGuard {
	fn drop(&mut self) {
		for (key, value) in &self.saved {
			// SAFETY: tests touching the environment are serialized.
			unsafe {
				match value {
					Some(v) => std::env::set_var(key, v),
					None => std::env::remove_var(key),
				}
			}
		}
	}
}

fn write_config(content: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().expect("Failed to create temp file");
	file.write_all(content.as_bytes())
		.expect("Failed to write config");
	file
}

#[fixture]
fn config_file() -> NamedTempFile {
	write_config(
		r#"
db_url = "postgres://file/db"
view_name = "daily_sales"
sql_module = "reports"
sql_name = "daily_sales.sql"
"#,
	)
}

#[rstest]
#[serial(env)]
fn test_load_uses_file_values(config_file: NamedTempFile) {
	let _env = EnvGuard::clear();

	let config = ViewConfig::load(config_file.path(), &ConfigOverrides::default()).unwrap();

	assert_eq!(config.db_url, "postgres://file/db");
	assert_eq!(config.view_name, "daily_sales");
	assert_eq!(config.sql_module, "reports");
}

#[rstest]
#[serial(env)]
fn test_environment_overrides_file(config_file: NamedTempFile) {
	let _env = EnvGuard::clear();
	// SAFETY: serialized with the other environment tests.
	unsafe { std::env::set_var(DATABASE_URL_ENV, "postgres://env/db") };

	let config = ViewConfig::load(config_file.path(), &ConfigOverrides::default()).unwrap();

	assert_eq!(config.db_url, "postgres://env/db");
}

#[rstest]
#[serial(env)]
fn test_cli_overrides_environment(config_file: NamedTempFile) {
	let _env = EnvGuard::clear();
	// SAFETY: serialized with the other environment tests.
	unsafe { std::env::set_var(MATVIEW_DB_URL_ENV, "postgres://env/db") };

	let overrides = ConfigOverrides::new().with_db_url(Some("postgres://cli/db".to_string()));
	let config = ViewConfig::load(config_file.path(), &overrides).unwrap();

	assert_eq!(config.db_url, "postgres://cli/db");
}

#[rstest]
#[serial(env)]
fn test_load_reports_missing_url() {
	let _env = EnvGuard::clear();
	let file = write_config("view_name = \"v1\"\nsql_name = \"v1.sql\"\n");

	let result = ViewConfig::load(file.path(), &ConfigOverrides::default());

	assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));
}

#[rstest]
fn test_missing_file_reports_path() {
	let result = ViewConfig::from_file("/nonexistent/matview/view.toml");

	match result {
		Err(ConfigError::IoError { path, .. }) => {
			assert_eq!(path.to_str(), Some("/nonexistent/matview/view.toml"));
		}
		other => panic!("expected IoError, got {:?}", other),
	}
}
