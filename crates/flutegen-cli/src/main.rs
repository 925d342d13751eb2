//! flutegen CLI - Outside-SQL checking, two-way SQL rendering and data loading
//!
//! Commands:
//! - `flutegen check-sql` - Check outside-SQL files
//! - `flutegen render-sql` - Render a two-way SQL file against JSON parameters
//! - `flutegen load-data` - Load a delimited data file and print its records
//! - `flutegen check-config` - Validate a flutegen.toml configuration

use clap::{Parser, Subcommand};
use flutegen_core::LogLevel;
use std::path::PathBuf;

mod check_sql;
mod config;
mod load_data;
mod render_sql;

#[derive(Parser)]
#[command(name = "flutegen")]
#[command(author, version, about = "Two-way SQL and data loading toolchain", long_about = None)]
struct Cli {
    /// Path to flutegen.toml (default: ./flutegen.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Console log level, overriding the configuration
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check outside-SQL files (directories are searched for *.sql)
    CheckSql {
        /// SQL files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Render a two-way SQL file
    RenderSql {
        /// Two-way SQL file
        file: PathBuf,

        /// Parameter bean as a JSON object (default: {})
        #[arg(short, long)]
        params: Option<String>,
    },

    /// Load a delimited data file and print its records as JSON lines
    LoadData {
        /// Data file (.tsv, .csv, or any file with --delimiter)
        file: PathBuf,

        /// Table name (default: the file stem)
        #[arg(short, long)]
        table: Option<String>,

        /// Comma-separated table columns (default: the header columns)
        #[arg(long, value_delimiter = ',')]
        table_columns: Option<Vec<String>>,

        /// Field delimiter, overriding the configuration and file extension
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Validate a flutegen.toml configuration
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = config::resolve_path(cli.config);
    let config = config::load(config_path.as_deref())?;
    let level = match cli.log_level {
        Some(level) => level,
        None => config.log_level()?,
    };
    flutegen_logging::init_logging(level);

    match cli.command {
        Commands::CheckSql { paths } => {
            check_sql::run(&config, &paths)?;
        }
        Commands::RenderSql { file, params } => {
            render_sql::run(&file, params.as_deref())?;
        }
        Commands::LoadData {
            file,
            table,
            table_columns,
            delimiter,
        } => {
            let options = load_data::LoadOptions {
                table,
                table_columns,
                delimiter,
            };
            load_data::run(config, &file, options)?;
        }
        Commands::CheckConfig => {
            config::check(config_path.as_deref(), &config);
        }
    }

    Ok(())
}
