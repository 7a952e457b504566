//! The order command: load, sort, validate, and re-emit interval records.
//!
//! One linear pass: every record is read into memory, the whole set is
//! sorted by ascending end timestamp, the sorted sequence is validated,
//! and only then is anything written. A failing run produces no output
//! lines at all.

use crate::reader::{read_sources, RecordError, Source};
use crate::record::Record;
use crate::validate::{check_records, Violation};
use std::io::{BufWriter, Write};
use thiserror::Error;

/// Errors from a full order-and-check run.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Violation(#[from] Violation),
}

/// Order-and-check command.
#[derive(Debug, Clone)]
pub struct OrderCommand;

impl Default for OrderCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderCommand {
    pub fn new() -> Self {
        Self
    }

    /// Sort records by ascending numeric end timestamp.
    ///
    /// The sort is stable, so records with equal ends keep their input
    /// order and output is deterministic.
    pub fn sort(&self, mut records: Vec<Record>) -> Vec<Record> {
        records.sort_by_key(|r| r.end.value());
        records
    }

    /// Run the full pipeline from input sources to an output writer.
    pub fn run<W: Write>(&self, sources: &[Source], output: &mut W) -> Result<(), OrderError> {
        let records = read_sources(sources)?;
        self.process(records, output)
    }

    /// Sort, validate, and emit an already-loaded record set.
    pub fn process<W: Write>(
        &self,
        records: Vec<Record>,
        output: &mut W,
    ) -> Result<(), OrderError> {
        let sorted = self.sort(records);
        check_records(&sorted)?;

        let mut out = BufWriter::with_capacity(64 * 1024, output);
        for record in &sorted {
            writeln!(out, "{}", record).map_err(RecordError::Io)?;
        }
        out.flush().map_err(RecordError::Io)?;

        Ok(())
    }
}
