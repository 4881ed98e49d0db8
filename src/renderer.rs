//! Materialized view lifecycle
//!
//! [`ViewRenderer`] turns a [`ViewConfig`] into CREATE / DROP statements and
//! runs each one inside its own transaction scope.

use crate::source::{SourceError, SqlSource};
use matview_conf::ViewConfig;
use matview_db::{DatabaseConnection, DatabaseError, QueryValue, transaction};
use matview_query::{Query, QueryStatementBuilder};
use std::fmt;

/// Errors raised by [`ViewRenderer`]
///
/// Both variants are transparent: the message is the collaborator's own.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	#[error(transparent)]
	Source(#[from] SourceError),

	#[error(transparent)]
	Database(#[from] DatabaseError),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Values substituted into the CREATE statement
///
/// `index` is either empty or a complete index-creation statement that runs
/// right after the view is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateArguments {
	pub view_name: String,
	pub sql: String,
	pub index: String,
}

impl CreateArguments {
	pub fn new(view_name: impl Into<String>, sql: impl Into<String>) -> Self {
		Self {
			view_name: view_name.into(),
			sql: sql.into(),
			index: String::new(),
		}
	}

	pub fn with_index(mut self, index: impl Into<String>) -> Self {
		self.index = index.into();
		self
	}

	fn from_config(config: &ViewConfig, source: &dyn SqlSource) -> Result<Self> {
		let sql = source.read_sql(&config.sql_module, &config.sql_name)?;
		let mut arguments = Self::new(config.view_name.clone(), sql);

		if config.create_index {
			let mut index = Query::create_unique_index();
			index
				.name(config.index_name.as_str())
				.table(config.view_name.as_str())
				.column(config.index_column.as_str());
			arguments.index = index.to_string();
		}

		Ok(arguments)
	}
}

/// One column of a relation as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
	pub name: String,
	pub data_type: String,
}

/// Creates, refreshes, and drops one materialized view
///
/// # Examples
///
/// ```rust,no_run
/// use matview::{FilesystemSource, ViewConfig, ViewRenderer};
///
/// # async fn example() -> matview::Result<()> {
/// let config = ViewConfig::new("postgres://localhost/app", "daily_sales")
///     .with_sql("reports", "daily_sales.sql")
///     .with_index("daily_sales_day_idx", "day");
/// let source = FilesystemSource::new(&config.sql_root);
///
/// let renderer = ViewRenderer::from_config(config, &source)?;
/// renderer.refresh_view().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ViewRenderer {
	config: ViewConfig,
	engine: DatabaseConnection,
	arguments: CreateArguments,
}

impl ViewRenderer {
	/// Build a renderer whose arguments are derived from `config`
	///
	/// The SQL text is loaded from `source`; the index clause is filled in
	/// only when `config.create_index` is set. No connection is opened and no
	/// async runtime is needed until an operation runs.
	pub fn from_config(config: ViewConfig, source: &dyn SqlSource) -> Result<Self> {
		let engine = DatabaseConnection::connect_lazy(&config.db_url)?;
		let arguments = CreateArguments::from_config(&config, source)?;
		Ok(Self {
			config,
			engine,
			arguments,
		})
	}

	/// Build a renderer that uses `arguments` verbatim
	///
	/// The index clause is never derived here, whatever `create_index` says.
	pub fn from_arguments(config: ViewConfig, arguments: CreateArguments) -> Result<Self> {
		let engine = DatabaseConnection::connect_lazy(&config.db_url)?;
		Ok(Self {
			config,
			engine,
			arguments,
		})
	}

	/// Replace the engine handle
	pub fn with_engine(mut self, engine: DatabaseConnection) -> Self {
		self.engine = engine;
		self
	}

	pub fn config(&self) -> &ViewConfig {
		&self.config
	}

	pub fn arguments(&self) -> &CreateArguments {
		&self.arguments
	}

	pub fn engine(&self) -> &DatabaseConnection {
		&self.engine
	}

	/// Statement executed by [`create_view`](Self::create_view)
	pub fn create_sql(&self) -> String {
		let mut stmt = Query::create_materialized_view();
		stmt.name(self.arguments.view_name.as_str())
			.as_sql(self.arguments.sql.as_str())
			.trailer(self.arguments.index.as_str());
		stmt.to_string()
	}

	/// Statement executed by [`delete_view`](Self::delete_view)
	pub fn delete_sql(&self) -> String {
		let mut stmt = Query::drop_materialized_view();
		stmt.name(self.config.view_name.as_str()).if_exists();
		stmt.to_string()
	}

	/// Create the view, and its index when one is configured
	pub async fn create_view(&self) -> Result<()> {
		tracing::info!(view = %self, "Creating materialized view");
		self.execute_in_transaction(self.create_sql()).await?;
		Ok(())
	}

	/// Drop the view if it exists
	pub async fn delete_view(&self) -> Result<()> {
		tracing::info!(view = %self, "Dropping materialized view");
		self.execute_in_transaction(self.delete_sql()).await?;
		Ok(())
	}

	/// Drop then re-create the view
	///
	/// The two steps run in separate transactions. If the create fails the
	/// view stays absent until the next successful call.
	pub async fn refresh_view(&self) -> Result<()> {
		self.delete_view().await?;
		self.create_view().await
	}

	/// Column names and formatted types of the view, in column order
	pub async fn column_types(&self) -> Result<Vec<ColumnType>> {
		let mut query = Query::column_types();
		query.relation(&self.config.view_name);
		let (sql, values) = query.build();
		let params = values.into_iter().map(QueryValue::from).collect();

		let rows = self.engine.fetch_all(&sql, params).await?;
		let columns = rows
			.iter()
			.map(|row| -> matview_db::Result<ColumnType> {
				Ok(ColumnType {
					name: row.get("column_name")?,
					data_type: row.get("data_type")?,
				})
			})
			.collect::<matview_db::Result<Vec<_>>>()?;

		tracing::debug!(view = %self, columns = columns.len(), "Fetched column types");
		Ok(columns)
	}

	async fn execute_in_transaction(&self, sql: String) -> std::result::Result<(), DatabaseError> {
		tracing::debug!(sql = %sql, "Executing statement");
		transaction(&self.engine, move |tx| {
			Box::pin(async move {
				tx.execute(&sql, Vec::new()).await?;
				Ok(())
			})
		})
		.await
	}
}

impl fmt::Display for ViewRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.config.view_name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::MemorySource;
	use matview_db::Row;
	use matview_db::testing::{Event, RecordingBackend};
	use rstest::*;

	const DB_URL: &str = "postgres://localhost/matview_test";

	#[fixture]
	fn source() -> MemorySource {
		MemorySource::new().with("reports", "v1.sql", "SELECT 1")
	}

	#[fixture]
	fn config() -> ViewConfig {
		ViewConfig::new(DB_URL, "v1").with_sql("reports", "v1.sql")
	}

	#[rstest]
	fn test_create_sql_without_index(config: ViewConfig, source: MemorySource) {
		let renderer = ViewRenderer::from_config(config, &source).unwrap();

		assert_eq!(
			renderer.create_sql(),
			"CREATE MATERIALIZED VIEW v1 AS (SELECT 1); "
		);
		assert!(renderer.arguments().index.is_empty());
	}

	#[rstest]
	fn test_create_sql_with_index(config: ViewConfig, source: MemorySource) {
		let config = config.with_index("v1_id_idx", "id");

		let renderer = ViewRenderer::from_config(config, &source).unwrap();

		assert_eq!(
			renderer.arguments().index,
			"CREATE UNIQUE INDEX v1_id_idx ON v1(id);"
		);
		assert_eq!(
			renderer.create_sql(),
			"CREATE MATERIALIZED VIEW v1 AS (SELECT 1); CREATE UNIQUE INDEX v1_id_idx ON v1(id);"
		);
	}

	#[rstest]
	fn test_explicit_arguments_skip_index(config: ViewConfig) {
		let config = config.with_index("v1_id_idx", "id");
		let arguments = CreateArguments::new("v1", "SELECT 2");

		let renderer = ViewRenderer::from_arguments(config, arguments).unwrap();

		assert_eq!(renderer.arguments(), &CreateArguments::new("v1", "SELECT 2"));
		assert_eq!(
			renderer.create_sql(),
			"CREATE MATERIALIZED VIEW v1 AS (SELECT 2); "
		);
	}

	#[rstest]
	fn test_missing_sql_resource(config: ViewConfig) {
		let result = ViewRenderer::from_config(config, &MemorySource::new());
		assert!(matches!(
			result,
			Err(RenderError::Source(SourceError::NotFound { .. }))
		));
	}

	#[rstest]
	fn test_display_is_view_name(config: ViewConfig, source: MemorySource) {
		let renderer = ViewRenderer::from_config(config, &source).unwrap();
		assert_eq!(renderer.to_string(), "v1");
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_view_commits(config: ViewConfig, source: MemorySource) {
		let backend = RecordingBackend::new();
		let renderer = ViewRenderer::from_config(config, &source)
			.unwrap()
			.with_engine(backend.connection());

		renderer.create_view().await.unwrap();

		assert_eq!(
			backend.events(),
			vec![
				Event::Begin,
				Event::Execute("CREATE MATERIALIZED VIEW v1 AS (SELECT 1); ".to_string()),
				Event::Commit,
			]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_failed_create_rolls_back(config: ViewConfig, source: MemorySource) {
		let backend = RecordingBackend::new().fail_when_contains("CREATE MATERIALIZED VIEW");
		let renderer = ViewRenderer::from_config(config, &source)
			.unwrap()
			.with_engine(backend.connection());

		let result = renderer.create_view().await;

		assert!(matches!(
			result,
			Err(RenderError::Database(DatabaseError::Sql(_)))
		));
		assert_eq!(backend.events().last(), Some(&Event::Rollback));
		assert!(!backend.events().contains(&Event::Commit));
	}

	#[rstest]
	#[tokio::test]
	async fn test_delete_view_is_idempotent(config: ViewConfig, source: MemorySource) {
		let backend = RecordingBackend::new();
		let renderer = ViewRenderer::from_config(config, &source)
			.unwrap()
			.with_engine(backend.connection());

		renderer.delete_view().await.unwrap();
		renderer.delete_view().await.unwrap();

		assert_eq!(
			backend.executed(),
			vec![
				"DROP MATERIALIZED VIEW IF EXISTS v1".to_string(),
				"DROP MATERIALIZED VIEW IF EXISTS v1".to_string(),
			]
		);
	}

	#[rstest]
	fn test_delete_uses_configured_name(config: ViewConfig) {
		let arguments = CreateArguments::new("other_view", "SELECT 1");
		let renderer = ViewRenderer::from_arguments(config, arguments).unwrap();

		assert_eq!(renderer.delete_sql(), "DROP MATERIALIZED VIEW IF EXISTS v1");
	}

	#[rstest]
	#[tokio::test]
	async fn test_refresh_drops_then_creates(config: ViewConfig, source: MemorySource) {
		let backend = RecordingBackend::new();
		let renderer = ViewRenderer::from_config(config, &source)
			.unwrap()
			.with_engine(backend.connection());

		renderer.refresh_view().await.unwrap();

		assert_eq!(
			backend.events(),
			vec![
				Event::Begin,
				Event::Execute("DROP MATERIALIZED VIEW IF EXISTS v1".to_string()),
				Event::Commit,
				Event::Begin,
				Event::Execute("CREATE MATERIALIZED VIEW v1 AS (SELECT 1); ".to_string()),
				Event::Commit,
			]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_refresh_stops_when_drop_fails(config: ViewConfig, source: MemorySource) {
		let backend = RecordingBackend::new().fail_when_contains("DROP");
		let renderer = ViewRenderer::from_config(config, &source)
			.unwrap()
			.with_engine(backend.connection());

		assert!(renderer.refresh_view().await.is_err());
		assert!(
			backend
				.executed()
				.iter()
				.all(|sql| !sql.starts_with("CREATE"))
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_column_types_binds_schema_and_name(source: MemorySource) {
		let mut row = Row::new();
		row.insert("column_name", QueryValue::from("id"));
		row.insert("data_type", QueryValue::from("integer"));
		let backend = RecordingBackend::new().with_rows(vec![row]);
		let config = ViewConfig::new(DB_URL, "reports.v1").with_sql("reports", "v1.sql");
		let renderer = ViewRenderer::from_config(config, &source)
			.unwrap()
			.with_engine(backend.connection());

		let columns = renderer.column_types().await.unwrap();

		assert_eq!(
			columns,
			vec![ColumnType {
				name: "id".to_string(),
				data_type: "integer".to_string(),
			}]
		);
		match backend.events().as_slice() {
			[Event::Fetch(_, params)] => assert_eq!(
				params,
				&vec![QueryValue::from("reports"), QueryValue::from("v1")]
			),
			other => panic!("expected a single fetch, got {:?}", other),
		}
	}
}
