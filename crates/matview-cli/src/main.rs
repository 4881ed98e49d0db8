//! matview CLI
//!
//! Create, refresh, or drop the materialized view described by a TOML file.
//!
//! ## Usage
//!
//! ```bash
//! matview -c view.toml create
//! matview -c view.toml refresh
//! matview --database-url postgres://localhost/app drop
//! matview --view-name daily_sales_staging refresh
//! matview sql
//! ```
//!
//! The connection string is taken from `--database-url`, then
//! `MATVIEW_DB_URL`, then `DATABASE_URL`, then the file.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use matview::{ConfigOverrides, FilesystemSource, ViewConfig, ViewRenderer};

#[derive(Parser)]
#[command(name = "matview")]
#[command(about = "Materialized view lifecycle utility", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Path to the view configuration file
	#[arg(short, long, value_name = "FILE", default_value = "view.toml")]
	config: PathBuf,

	/// Database connection string (overrides environment and file)
	#[arg(long, value_name = "URL")]
	database_url: Option<String>,

	/// Directory SQL modules are resolved against
	#[arg(long, value_name = "DIR")]
	sql_root: Option<PathBuf>,

	/// Target view name (overrides the file)
	#[arg(long, value_name = "NAME")]
	view_name: Option<String>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
	/// Create the materialized view (and unique index when configured)
	Create,

	/// Drop and re-create the view
	Refresh,

	/// Drop the view if it exists
	Drop,

	/// Print the CREATE statement without executing it
	Sql,

	/// Print the view's column names and types
	Columns,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbosity);

	if let Err(e) = run(cli).await {
		eprintln!("Error: {:#}", e);
		process::exit(1);
	}
}

fn init_logging(verbosity: u8) {
	use tracing_subscriber::{EnvFilter, fmt, prelude::*};

	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn level_for(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

async fn run(cli: Cli) -> anyhow::Result<()> {
	let overrides = ConfigOverrides::new()
		.with_db_url(cli.database_url)
		.with_sql_root(cli.sql_root)
		.with_view_name(cli.view_name);
	let config = ViewConfig::load(&cli.config, &overrides)
		.with_context(|| format!("Failed to load {}", cli.config.display()))?;

	let source = FilesystemSource::new(&config.sql_root);
	let renderer = ViewRenderer::from_config(config, &source)?;

	match cli.command {
		Commands::Create => {
			renderer.create_view().await?;
			println!("{} {}", "Created".green().bold(), renderer);
		}
		Commands::Refresh => {
			renderer.refresh_view().await?;
			println!("{} {}", "Refreshed".green().bold(), renderer);
		}
		Commands::Drop => {
			renderer.delete_view().await?;
			println!("{} {}", "Dropped".yellow().bold(), renderer);
		}
		Commands::Sql => {
			println!("{}", renderer.create_sql());
		}
		Commands::Columns => {
			let columns = renderer.column_types().await?;
			if columns.is_empty() {
				println!("{} {}", "No columns found for".yellow(), renderer);
			}
			for column in columns {
				println!("{}\t{}", column.name.bold(), column.data_type);
			}
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[rstest]
	#[case(&["matview", "create"], Commands::Create)]
	#[case(&["matview", "refresh"], Commands::Refresh)]
	#[case(&["matview", "drop"], Commands::Drop)]
	#[case(&["matview", "sql"], Commands::Sql)]
	#[case(&["matview", "columns"], Commands::Columns)]
	fn test_subcommands_parse(#[case] args: &[&str], #[case] expected: Commands) {
		let cli = Cli::try_parse_from(args).unwrap();
		assert_eq!(cli.command, expected);
		assert_eq!(cli.config, PathBuf::from("view.toml"));
		assert!(cli.view_name.is_none());
	}

	#[rstest]
	fn test_global_options_parse() {
		let cli = Cli::try_parse_from([
			"matview",
			"-c",
			"views/daily.toml",
			"--database-url",
			"postgres://cli/db",
			"--sql-root",
			"sql",
			"--view-name",
			"reports.daily_sales",
			"-vv",
			"refresh",
		])
		.unwrap();

		assert_eq!(cli.config, PathBuf::from("views/daily.toml"));
		assert_eq!(cli.database_url.as_deref(), Some("postgres://cli/db"));
		assert_eq!(cli.sql_root, Some(PathBuf::from("sql")));
		assert_eq!(cli.view_name.as_deref(), Some("reports.daily_sales"));
		assert_eq!(cli.verbosity, 2);
	}

	#[rstest]
	fn test_unknown_subcommand_is_rejected() {
		assert!(Cli::try_parse_from(["matview", "vacuum"]).is_err());
	}

	#[rstest]
	#[case(0, "warn")]
	#[case(1, "info")]
	#[case(2, "debug")]
	#[case(7, "trace")]
	fn test_verbosity_levels(#[case] verbosity: u8, #[case] expected: &str) {
		assert_eq!(level_for(verbosity), expected);
	}
}
