//! CSV ledger ingestion.
//!
//! The expected layout is a header `Id,Date,Transaction` followed by one row
//! per transaction. Reading is all-or-nothing: the first malformed row fails
//! the whole read.

use crate::error::{EngineError, Result};
use crate::transaction::{Transaction, TransactionRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

const HEADER: [&str; 3] = ["id", "date", "transaction"];

/// Something that yields a batch of transactions.
pub trait TransactionSource {
    fn read_transactions(&self) -> Result<Vec<Transaction>>;
}

/// Reads transactions from a CSV stream.
///
/// `default_year` is used for rows whose date has no year component.
pub fn read_csv<R: Read>(reader: R, default_year: i32) -> Result<Vec<Transaction>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(reader);

    let header = csv_reader.headers()?.clone();
    if !is_valid_header(&header) {
        return Err(EngineError::InvalidHeader {
            found: header.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut transactions = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row
        // Positional: header spelling is validated above, not matched by name.
        let record: TransactionRecord = result?.deserialize(None)?;
        let tx = record.parse(row_num, default_year)?;
        debug!("Row {}: {} on {} for {}", row_num, tx.id, tx.date, tx.amount);
        transactions.push(tx);
    }

    Ok(transactions)
}

fn is_valid_header(header: &StringRecord) -> bool {
    header.len() == HEADER.len()
        && header
            .iter()
            .zip(HEADER)
            .all(|(found, expected)| found.eq_ignore_ascii_case(expected))
}

/// A CSV ledger on the local filesystem.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    default_year: i32,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, default_year: i32) -> Self {
        CsvFileSource {
            path: path.into(),
            default_year,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionSource for CsvFileSource {
    fn read_transactions(&self) -> Result<Vec<Transaction>> {
        let file = File::open(&self.path)?;
        if file.metadata()?.len() == 0 {
            return Err(EngineError::EmptyFile);
        }

        let transactions = read_csv(BufReader::new(file), self.default_year)?;
        info!(
            "Read {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }
}
