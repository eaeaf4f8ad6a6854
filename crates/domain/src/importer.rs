//! Bulk loader for bank branch source files
//!
//! One sequential pass over a delimited file: headers are mapped to canonical
//! fields, bank names are resolved through a [`BankCache`], and branches are
//! written in fixed-size batches, one transaction per batch.

mod cache;
mod headers;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sqlx::SqlitePool;
use thiserror::Error;

pub use cache::BankCache;
pub use headers::{classify, normalize_header, Field, HeaderMap};

use crate::models::{Branch, ConflictPolicy};
use crate::repositories::BranchRepository;

pub const DEFAULT_BATCH_SIZE: usize = 2000;

/// Bank name substituted when a row has none
pub const UNKNOWN_BANK: &str = "UNKNOWN";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Source file has no IFSC column (can't proceed). Found headers: {}", .found.join(", "))]
    MissingIfscColumn { found: Vec<String> },

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Failed to open '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Rows buffered before each bulk insert
    pub batch_size: usize,
    pub on_conflict: ConflictPolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            on_conflict: ConflictPolicy::default(),
        }
    }
}

/// Counters for one import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows read, header excluded
    pub rows_read: u64,
    pub branches_inserted: u64,
    pub skipped_blank_ifsc: u64,
    /// Rows dropped because their IFSC already existed (skip policy only)
    pub skipped_conflicts: u64,
    pub banks_created: u64,
    pub batches: u64,
}

/// Import a file from disk.
///
/// The file is read with the blocking `csv` reader on the calling task. That
/// is fine for the one-shot `ifsc-import` binary; inside a shared runtime run
/// this under `tokio::task::spawn_blocking` or a dedicated runtime.
pub async fn import_file(
    pool: &SqlitePool,
    path: impl AsRef<Path>,
    options: ImportOptions,
    cache: &mut BankCache,
) -> Result<ImportSummary, ImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ImportError::Open {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!("Importing branches from {}", path.display());
    import_reader(pool, file, options, cache).await
}

/// Import delimited text with a header row from any reader
pub async fn import_reader<R: Read>(
    pool: &SqlitePool,
    reader: R,
    options: ImportOptions,
    cache: &mut BankCache,
) -> Result<ImportSummary, ImportError> {
    if options.batch_size == 0 {
        return Err(ImportError::InvalidBatchSize);
    }

    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let header_map = HeaderMap::from_headers(&headers);

    if !header_map.has(Field::Ifsc) {
        return Err(ImportError::MissingIfscColumn { found: headers });
    }

    let banks_before = cache.created();
    let mut summary = ImportSummary::default();
    let mut buffer: Vec<BufferedRow> = Vec::with_capacity(options.batch_size);
    let mut record = csv::ByteRecord::new();

    while csv.read_byte_record(&mut record)? {
        summary.rows_read += 1;

        let ifsc = header_map.value(&record, Field::Ifsc);
        if ifsc.is_empty() {
            summary.skipped_blank_ifsc += 1;
            continue;
        }

        let mut bank_name = header_map.value(&record, Field::BankName);
        if bank_name.is_empty() {
            bank_name = UNKNOWN_BANK.to_string();
        }

        buffer.push(BufferedRow {
            bank_name,
            branch: Branch {
                ifsc,
                bank_id: 0,
                branch: header_map.value(&record, Field::Branch),
                address: header_map.value(&record, Field::Address),
                city: header_map.value(&record, Field::City),
                district: header_map.value(&record, Field::District),
                state: header_map.value(&record, Field::State),
                micr: header_map.value(&record, Field::Micr),
            },
        });

        if buffer.len() >= options.batch_size {
            flush(pool, &mut buffer, options.on_conflict, cache, &mut summary).await?;
            tracing::info!(
                "Inserted {} rows...",
                summary.branches_inserted + summary.skipped_conflicts
            );
        }
    }

    if !buffer.is_empty() {
        flush(pool, &mut buffer, options.on_conflict, cache, &mut summary).await?;
        tracing::info!(
            "Inserted final chunk. Total rows: {}",
            summary.branches_inserted + summary.skipped_conflicts
        );
    }

    summary.banks_created = (cache.created() - banks_before) as u64;
    Ok(summary)
}

/// A parsed row waiting for its bank id
struct BufferedRow {
    bank_name: String,
    branch: Branch,
}

/// Write the buffered rows, then keep or drop the cache entries they created
async fn flush(
    pool: &SqlitePool,
    buffer: &mut Vec<BufferedRow>,
    on_conflict: ConflictPolicy,
    cache: &mut BankCache,
    summary: &mut ImportSummary,
) -> Result<(), sqlx::Error> {
    let rows = buffer.len() as u64;
    let inserted = match write_batch(pool, buffer, on_conflict, cache).await {
        Ok(inserted) => {
            cache.commit();
            inserted
        }
        Err(e) => {
            cache.discard();
            return Err(e);
        }
    };

    let skipped = rows - inserted;
    if skipped > 0 {
        tracing::warn!("Skipped {} rows with an existing IFSC", skipped);
    }

    summary.branches_inserted += inserted;
    summary.skipped_conflicts += skipped;
    summary.batches += 1;
    Ok(())
}

/// Banks first seen in this batch are created in the batch's transaction,
/// so a rolled-back batch leaves no bank without branches.
async fn write_batch(
    pool: &SqlitePool,
    buffer: &mut Vec<BufferedRow>,
    on_conflict: ConflictPolicy,
    cache: &mut BankCache,
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut branches = Vec::with_capacity(buffer.len());

    for row in buffer.drain(..) {
        let bank_id = cache.resolve(&mut tx, &row.bank_name).await?;
        branches.push(Branch {
            bank_id,
            ..row.branch
        });
    }

    let inserted = BranchRepository::insert_rows(&mut tx, &branches, on_conflict).await?;
    tx.commit().await?;
    Ok(inserted)
}
