//! Core record types for keyed timeline intervals.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A timestamp as it appeared in the input.
///
/// Keeps the original token next to the parsed value so output reproduces
/// the source spelling exactly (leading zeros, explicit sign), while sorting
/// and overlap checks compare the numeric value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    value: i64,
}

impl Timestamp {
    /// The numeric value used for sorting and overlap comparisons.
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The original token text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Timestamp {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<i64>()?;
        Ok(Self {
            raw: s.to_string(),
            value,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One keyed interval record.
///
/// Records with the same key form one timeline; records with different keys
/// are never compared against each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub begin: Timestamp,
    pub end: Timestamp,
    pub key: String,
    /// Free-form payload; may be empty and may contain spaces.
    pub value: String,
    /// Verbatim trimmed source line, kept for diagnostics.
    original: String,
}

impl Record {
    /// Build a record from already-parsed fields.
    ///
    /// The diagnostic line is reconstructed from the fields; records parsed
    /// from input carry the actual source line instead.
    pub fn new(
        begin: Timestamp,
        end: Timestamp,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let value = value.into();
        let original = if value.is_empty() {
            format!("{} {} {}", begin, end, key)
        } else {
            format!("{} {} {} {}", begin, end, key, value)
        };
        Self {
            begin,
            end,
            key,
            value,
            original,
        }
    }

    pub(crate) fn with_original(
        begin: Timestamp,
        end: Timestamp,
        key: String,
        value: String,
        original: String,
    ) -> Self {
        Self {
            begin,
            end,
            key,
            value,
            original,
        }
    }

    /// The trimmed source line this record was parsed from.
    #[inline]
    pub fn original_line(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for Record {
    // All four fields are always joined by single spaces, so a record with
    // an empty value renders with a trailing separator; the rendered line
    // re-parses to the same record.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.begin, self.end, self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_timestamp_value_and_text() {
        let t = ts("42");
        assert_eq!(t.value(), 42);
        assert_eq!(t.as_str(), "42");
    }

    #[test]
    fn test_timestamp_preserves_source_spelling() {
        assert_eq!(ts("007").to_string(), "007");
        assert_eq!(ts("007").value(), 7);
        assert_eq!(ts("+3").to_string(), "+3");
        assert_eq!(ts("+3").value(), 3);
    }

    #[test]
    fn test_timestamp_negative() {
        let t = ts("-15");
        assert_eq!(t.value(), -15);
        assert_eq!(t.to_string(), "-15");
    }

    #[test]
    fn test_timestamp_rejects_non_integer() {
        assert!("abc".parse::<Timestamp>().is_err());
        assert!("".parse::<Timestamp>().is_err());
        assert!("1.5".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_record_display() {
        let rec = Record::new(ts("10"), ts("20"), "a", "foo");
        assert_eq!(rec.to_string(), "10 20 a foo");
    }

    #[test]
    fn test_record_display_value_with_spaces() {
        let rec = Record::new(ts("10"), ts("20"), "a", "foo  bar baz");
        assert_eq!(rec.to_string(), "10 20 a foo  bar baz");
    }

    #[test]
    fn test_record_display_empty_value_keeps_separator() {
        let rec = Record::new(ts("10"), ts("20"), "a", "");
        assert_eq!(rec.to_string(), "10 20 a ");
    }

    #[test]
    fn test_record_original_line() {
        let rec = Record::new(ts("10"), ts("20"), "a", "foo");
        assert_eq!(rec.original_line(), "10 20 a foo");

        let bare = Record::new(ts("10"), ts("20"), "a", "");
        assert_eq!(bare.original_line(), "10 20 a");
    }
}
