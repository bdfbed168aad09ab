mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use salary_survey_core::{DbConfig, SurveyFilter};
use salary_survey_storage::StorageBackend;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "salary-survey")]
#[command(about = "Import salary survey exports and query pay ranges", long_about = None)]
struct Cli {
    /// Use a SQLite database file instead of PostgreSQL (DB_* variables)
    #[arg(long, global = true, value_name = "PATH")]
    sqlite: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Normalize a survey CSV export and append it to the database
    Import {
        csv: PathBuf,
        /// Field separator, a single ASCII character
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,
    },
    /// Top pay ranges among matching responses
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Filtered survey records
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value = "0")]
        offset: usize,
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
    Stats,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    min_company_size: Option<f64>,
    #[arg(long)]
    max_company_size: Option<f64>,
    #[arg(long)]
    min_experience: Option<f64>,
    #[arg(long)]
    max_experience: Option<f64>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long)]
    work_area: Option<String>,
    #[arg(long)]
    currency: Option<String>,
}

impl From<FilterArgs> for SurveyFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            title: args.title,
            min_company_size: args.min_company_size,
            max_company_size: args.max_company_size,
            min_experience: args.min_experience,
            max_experience: args.max_experience,
            area: args.area,
            work_area: args.work_area,
            currency: args.currency,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
    }
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// SQLite when `--sqlite` is given, otherwise PostgreSQL from `DB_*`.
pub(crate) async fn open_storage(sqlite: Option<&Path>) -> Result<Arc<StorageBackend>> {
    let backend = match sqlite {
        Some(path) => {
            ensure_db_dir(path)?;
            StorageBackend::new_sqlite(path)?
        },
        None => StorageBackend::new_postgres(&DbConfig::from_env()).await?,
    };
    tracing::debug!(backend = backend.kind(), "storage opened");
    Ok(Arc::new(backend))
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: ignoring unreadable .env: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let sqlite = cli.sqlite.as_deref();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(sqlite, port, host).await?,
        Commands::Import { csv, delimiter } => {
            commands::import::run(sqlite, &csv, delimiter).await?;
        },
        Commands::Summary { filter } => commands::query::run_summary(sqlite, filter.into()).await?,
        Commands::List { filter, offset, limit } => {
            commands::query::run_list(sqlite, filter.into(), offset, limit).await?;
        },
        Commands::Stats => commands::query::run_stats(sqlite).await?,
    }

    Ok(())
}
