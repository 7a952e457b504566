//! TICK: Timeline Interval ChecKer
//!
//! Normalizes and validates keyed time-interval fixtures. Records are read
//! from text lines, sorted by ascending end timestamp, checked so that no
//! two intervals with the same key overlap (touching counts as overlap),
//! and written back out in sorted order. Keys form independent timelines.
//!
//! # Example
//!
//! ```rust
//! use tick_intervals::order::OrderCommand;
//! use tick_intervals::reader::parse_records;
//!
//! let records = parse_records("30 40 a foo\n10 20 a bar\n").unwrap();
//! let mut out = Vec::new();
//! OrderCommand::new().process(records, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "10 20 a bar\n30 40 a foo\n");
//! ```

pub mod order;
pub mod reader;
pub mod record;
pub mod validate;

// Re-export commonly used types
pub use order::{OrderCommand, OrderError};
pub use reader::{parse_records, read_sources, RecordError, RecordReader, Source};
pub use record::{Record, Timestamp};
pub use validate::{check_records, OverlapChecker, Violation, ViolationKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::order::OrderCommand;
    pub use crate::reader::{parse_records, RecordReader, Source};
    pub use crate::record::{Record, Timestamp};
    pub use crate::validate::{check_records, OverlapChecker, Violation};
}
