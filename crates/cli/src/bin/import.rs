//! Load a bank branch CSV into the database.
//!
//! Usage:
//!   ifsc-import --csv bank_branches.csv
//!   ifsc-import --csv branches.csv --batch-size 5000 --on-conflict skip

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use domain::importer::{self, BankCache, ImportOptions, DEFAULT_BATCH_SIZE};
use domain::models::ConflictPolicy;
use domain::{create_pool, Config};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnConflict {
    /// Abort the run on the first duplicate IFSC
    Fail,
    /// Keep the existing branch and continue
    Skip,
}

impl From<OnConflict> for ConflictPolicy {
    fn from(value: OnConflict) -> Self {
        match value {
            OnConflict::Fail => ConflictPolicy::Fail,
            OnConflict::Skip => ConflictPolicy::Skip,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ifsc-import", version = env!("APP_VERSION"), about = "Import bank branches from a CSV file")]
struct Args {
    /// Source CSV with a header row
    #[arg(long, env = "CSV_PATH", default_value = "bank_branches.csv")]
    csv: PathBuf,

    /// SQLite URL; defaults to <DATA_PATH>/ifsc.db
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Rows per bulk insert
    #[arg(long, env = "IMPORT_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    batch_size: u64,

    /// What to do with an IFSC that is already stored
    #[arg(long, value_enum, default_value_t = OnConflict::Fail)]
    on_conflict: OnConflict,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(url) = args.database_url {
        config = config.with_database_url(url);
    }
    if config.uses_data_path() {
        std::fs::create_dir_all(&config.data_path).with_context(|| {
            format!("Failed to create data directory '{}'", config.data_path.display())
        })?;
    }

    tracing::info!("Creating DB tables (if not exist)...");
    let pool = create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to open database")?;

    let options = ImportOptions {
        batch_size: args.batch_size as usize,
        on_conflict: args.on_conflict.into(),
    };
    // One cache per run
    let mut cache = BankCache::new();
    let summary = importer::import_file(&pool, &args.csv, options, &mut cache)
        .await
        .with_context(|| format!("Import of '{}' failed", args.csv.display()))?;

    tracing::info!(
        rows_read = summary.rows_read,
        inserted = summary.branches_inserted,
        skipped_blank_ifsc = summary.skipped_blank_ifsc,
        skipped_conflicts = summary.skipped_conflicts,
        banks_created = summary.banks_created,
        batches = summary.batches,
        "Done."
    );

    pool.close().await;
    Ok(())
}
