//! Overlap validation for record sequences sorted by end timestamp.
//!
//! The checker walks records in ascending global end order and keeps one
//! "last seen end" per key. Within a key, each record must begin strictly
//! after the previous record's end; touching counts as overlap. Keys never
//! interact.
//!
//! Validation assumes the global sort has already been applied; the checker
//! itself does no sorting.

use crate::record::Record;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::error;
use std::fmt;

/// The two ways a record sequence can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A key's first interval in sorted order has begin > end.
    BeginAfterEnd,
    /// An interval begins at or before the same key's previous end.
    Overlap,
}

impl ViolationKind {
    fn message(self) -> &'static str {
        match self {
            ViolationKind::BeginAfterEnd => "begin > end in following line:",
            ViolationKind::Overlap => {
                "the following line creates an overlapping interval:"
            }
        }
    }
}

/// A failed validation: which rule broke, and the offending source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    /// The verbatim trimmed input line that broke the rule.
    pub line: String,
}

impl fmt::Display for Violation {
    /// Renders the two-line diagnostic: a fixed message, then the offending
    /// line indented by two spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n  {}", self.kind.message(), self.line)
    }
}

impl error::Error for Violation {}

impl Violation {
    fn new(kind: ViolationKind, record: &Record) -> Self {
        Self {
            kind,
            line: record.original_line().to_string(),
        }
    }
}

/// Incremental overlap checker for records arriving in ascending-end order.
///
/// `begin <= end` well-formedness is enforced only when a key is first seen;
/// later records for the key are checked against the stored end alone.
/// Downstream tooling matches on which of the two diagnostics fires.
#[derive(Debug, Default)]
pub struct OverlapChecker {
    last_ends: HashMap<String, i64>,
    record_count: usize,
}

impl OverlapChecker {
    /// Create a new checker with no keys seen yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one record against its key's timeline.
    pub fn check(&mut self, record: &Record) -> Result<(), Violation> {
        self.record_count += 1;
        let begin = record.begin.value();
        let end = record.end.value();

        match self.last_ends.entry(record.key.clone()) {
            Entry::Vacant(slot) => {
                if begin > end {
                    return Err(Violation::new(ViolationKind::BeginAfterEnd, record));
                }
                slot.insert(end);
            }
            Entry::Occupied(mut slot) => {
                if *slot.get() >= begin {
                    return Err(Violation::new(ViolationKind::Overlap, record));
                }
                slot.insert(end);
            }
        }

        Ok(())
    }

    /// Number of records checked so far, including a failing one.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Reset the checker for a fresh sequence.
    pub fn reset(&mut self) {
        self.last_ends.clear();
        self.record_count = 0;
    }
}

/// Validate a sorted slice, stopping at the first violation.
pub fn check_records(records: &[Record]) -> Result<(), Violation> {
    let mut checker = OverlapChecker::new();
    for record in records {
        checker.check(record)?;
    }
    Ok(())
}
