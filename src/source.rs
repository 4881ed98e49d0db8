//! SQL resource loading
//!
//! A view's defining query lives outside the configuration, addressed by a
//! dotted module locator plus a resource name. [`SqlSource`] resolves that
//! pair to SQL text; the text is returned verbatim.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Errors raised while resolving a SQL resource
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("SQL resource '{name}' not found in module '{module}'")]
	NotFound { module: String, name: String },

	#[error("Invalid SQL resource locator: {0}")]
	InvalidLocator(String),

	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Resolves `(module, name)` to the SQL text of a view definition
pub trait SqlSource: Send + Sync {
	fn read_sql(&self, module: &str, name: &str) -> Result<String>;
}

/// Source reading resources from a directory tree
///
/// Module `reports.daily` and name `sales.sql` resolve to
/// `<root>/reports/daily/sales.sql`. An empty module resolves directly under
/// the root.
///
/// # Example
///
/// ```rust,no_run
/// use matview::source::{FilesystemSource, SqlSource};
///
/// let source = FilesystemSource::new("./sql");
/// let sql = source.read_sql("reports.daily", "sales.sql").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemSource {
	root_dir: PathBuf,
}

impl FilesystemSource {
	pub fn new<P: AsRef<Path>>(root_dir: P) -> Self {
		Self {
			root_dir: root_dir.as_ref().to_path_buf(),
		}
	}

	pub fn root_dir(&self) -> &Path {
		&self.root_dir
	}

	/// Map a locator to a path under the root without touching the disk
	pub fn resolve(&self, module: &str, name: &str) -> Result<PathBuf> {
		let mut path = self.root_dir.clone();
		if !module.is_empty() {
			for segment in module.split('.') {
				check_segment(module, segment)?;
				path.push(segment);
			}
		}
		check_segment(name, name)?;
		path.push(name);
		Ok(path)
	}
}

fn check_segment(locator: &str, segment: &str) -> Result<()> {
	let invalid = segment.is_empty()
		|| segment == "."
		|| segment == ".."
		|| segment.contains(['/', '\\']);
	if invalid {
		return Err(SourceError::InvalidLocator(format!(
			"'{}' (offending segment '{}')",
			locator, segment
		)));
	}
	Ok(())
}

impl SqlSource for FilesystemSource {
	fn read_sql(&self, module: &str, name: &str) -> Result<String> {
		let path = self.resolve(module, name)?;
		tracing::debug!(path = %path.display(), "Reading view SQL");

		std::fs::read_to_string(&path).map_err(|e| match e.kind() {
			std::io::ErrorKind::NotFound => SourceError::NotFound {
				module: module.to_string(),
				name: name.to_string(),
			},
			_ => SourceError::Io { path, source: e },
		})
	}
}

/// In-memory registry of SQL resources
///
/// Useful with `include_str!` to embed view definitions in a binary.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
	resources: HashMap<(String, String), String>,
}

impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a resource, returning `self` for chaining
	pub fn with(
		mut self,
		module: impl Into<String>,
		name: impl Into<String>,
		sql: impl Into<String>,
	) -> Self {
		self.insert(module, name, sql);
		self
	}

	pub fn insert(
		&mut self,
		module: impl Into<String>,
		name: impl Into<String>,
		sql: impl Into<String>,
	) {
		self.resources
			.insert((module.into(), name.into()), sql.into());
	}
}

impl SqlSource for MemorySource {
	fn read_sql(&self, module: &str, name: &str) -> Result<String> {
		self.resources
			.get(&(module.to_string(), name.to_string()))
			.cloned()
			.ok_or_else(|| SourceError::NotFound {
				module: module.to_string(),
				name: name.to_string(),
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;
	use std::fs;
	use tempfile::TempDir;

	#[fixture]
	fn sql_tree() -> TempDir {
		let temp_dir = TempDir::new().unwrap();
		let module_dir = temp_dir.path().join("reports").join("daily");
		fs::create_dir_all(&module_dir).unwrap();
		fs::write(module_dir.join("sales.sql"), "SELECT 1 AS id").unwrap();
		fs::write(temp_dir.path().join("top.sql"), "SELECT 2").unwrap();
		temp_dir
	}

	#[rstest]
	fn test_dotted_module_maps_to_directories(sql_tree: TempDir) {
		let source = FilesystemSource::new(sql_tree.path());

		let sql = source.read_sql("reports.daily", "sales.sql").unwrap();

		assert_eq!(sql, "SELECT 1 AS id");
	}

	#[rstest]
	fn test_empty_module_reads_from_root(sql_tree: TempDir) {
		let source = FilesystemSource::new(sql_tree.path());
		assert_eq!(source.read_sql("", "top.sql").unwrap(), "SELECT 2");
	}

	#[rstest]
	fn test_missing_resource_is_not_found(sql_tree: TempDir) {
		let source = FilesystemSource::new(sql_tree.path());

		let result = source.read_sql("reports.daily", "missing.sql");

		match result {
			Err(SourceError::NotFound { module, name }) => {
				assert_eq!(module, "reports.daily");
				assert_eq!(name, "missing.sql");
			}
			other => panic!("expected NotFound, got {:?}", other),
		}
	}

	#[rstest]
	#[case("reports..daily", "sales.sql")]
	#[case("..", "sales.sql")]
	#[case("reports/daily", "sales.sql")]
	#[case("reports", "../secret.sql")]
	#[case("reports", "..")]
	#[case("reports", "")]
	#[case(".reports", "sales.sql")]
	fn test_traversal_is_rejected(sql_tree: TempDir, #[case] module: &str, #[case] name: &str) {
		let source = FilesystemSource::new(sql_tree.path());

		let result = source.read_sql(module, name);

		assert!(matches!(result, Err(SourceError::InvalidLocator(_))));
	}

	#[rstest]
	fn test_resolve_builds_path_without_io() {
		let source = FilesystemSource::new("/srv/sql");
		let path = source.resolve("a.b", "v.sql").unwrap();
		assert_eq!(path, PathBuf::from("/srv/sql/a/b/v.sql"));
	}

	#[rstest]
	fn test_directory_as_resource_is_io_error(sql_tree: TempDir) {
		let source = FilesystemSource::new(sql_tree.path());

		let result = source.read_sql("", "reports");

		assert!(matches!(result, Err(SourceError::Io { .. })));
	}

	#[rstest]
	fn test_memory_source_lookup() {
		let source = MemorySource::new().with("reports", "v1.sql", "SELECT 1");

		assert_eq!(source.read_sql("reports", "v1.sql").unwrap(), "SELECT 1");
		assert!(matches!(
			source.read_sql("reports", "v2.sql"),
			Err(SourceError::NotFound { .. })
		));
	}
}
