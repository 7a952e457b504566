//! Streaming record parser over line-oriented text sources.
//!
//! Input grammar, per line:
//!
//! ```text
//! <line> ::= "" | "#" <anything> | <begin> " " <end> " " <key> [" " <value>]
//! ```
//!
//! Blank lines and lines whose first non-space character is `#` are skipped.
//! Fields are separated by single spaces; everything after the third field
//! is the value and may itself contain spaces.

use crate::record::{Record, Timestamp};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading records.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{file}: parse error at line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// A streaming interval record reader.
pub struct RecordReader<R: Read> {
    reader: BufReader<R>,
    label: String,
    line_number: usize,
    buffer: String,
}

impl RecordReader<File> {
    /// Open a fixture file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(file).with_label(path.as_ref().display().to_string()))
    }
}

impl<R: Read> RecordReader<R> {
    /// Create a new record reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            label: "<stdin>".to_string(),
            line_number: 0,
            buffer: String::with_capacity(256),
        }
    }

    /// Set the source label used in parse error messages.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Read the next record, skipping blank and comment lines.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            return self.parse_line(line).map(Some);
        }
    }

    /// Parse a single non-comment, non-blank line.
    ///
    /// Splitting on single spaces keeps empty tokens for consecutive
    /// spaces, so `10  20 a` fails on its empty second field rather than
    /// silently shifting the remaining tokens.
    fn parse_line(&self, line: &str) -> Result<Record> {
        let tokens: Vec<&str> = line.split(' ').collect();

        if tokens.len() < 3 {
            return Err(self.parse_error(format!(
                "expected at least 3 fields, got {}",
                tokens.len()
            )));
        }

        let begin = self.parse_timestamp(tokens[0], "begin")?;
        let end = self.parse_timestamp(tokens[1], "end")?;
        let key = tokens[2].to_string();
        let value = tokens[3..].join(" ");

        Ok(Record::with_original(
            begin,
            end,
            key,
            value,
            line.to_string(),
        ))
    }

    fn parse_timestamp(&self, token: &str, field: &str) -> Result<Timestamp> {
        token.parse().map_err(|_| {
            self.parse_error(format!("invalid {} timestamp: '{}'", field, token))
        })
    }

    fn parse_error(&self, message: String) -> RecordError {
        RecordError::Parse {
            file: self.label.clone(),
            line: self.line_number,
            message,
        }
    }

    /// Get an iterator over all records.
    pub fn records(self) -> RecordIter<R> {
        RecordIter { reader: self }
    }
}

/// Iterator over records.
pub struct RecordIter<R: Read> {
    reader: RecordReader<R>,
}

impl<R: Read> Iterator for RecordIter<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// One input source: a named file or the standard input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Map a CLI path argument to a source; `-` means stdin.
    pub fn from_arg<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.to_string_lossy() == "-" {
            Source::Stdin
        } else {
            Source::File(path.to_path_buf())
        }
    }
}

/// Read every record from the given sources, in order, as one sequence.
///
/// An empty source list reads standard input.
pub fn read_sources(sources: &[Source]) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    if sources.is_empty() {
        collect_into(RecordReader::new(io::stdin().lock()), &mut records)?;
        return Ok(records);
    }

    for source in sources {
        match source {
            Source::Stdin => {
                collect_into(RecordReader::new(io::stdin().lock()), &mut records)?;
            }
            Source::File(path) => {
                collect_into(RecordReader::from_path(path)?, &mut records)?;
            }
        }
    }

    Ok(records)
}

fn collect_into<R: Read>(reader: RecordReader<R>, records: &mut Vec<Record>) -> Result<()> {
    for record in reader.records() {
        records.push(record?);
    }
    Ok(())
}

/// Parse records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    RecordReader::new(content.as_bytes()).records().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_record() {
        let records = parse_records("10 20 a foo\n").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].begin.value(), 10);
        assert_eq!(records[0].end.value(), 20);
        assert_eq!(records[0].key, "a");
        assert_eq!(records[0].value, "foo");
        assert_eq!(records[0].original_line(), "10 20 a foo");
    }

    #[test]
    fn test_parse_value_with_spaces() {
        let records = parse_records("10 20 a foo bar baz\n").unwrap();
        assert_eq!(records[0].value, "foo bar baz");
    }

    #[test]
    fn test_parse_value_keeps_inner_runs_of_spaces() {
        let records = parse_records("10 20 a foo  bar\n").unwrap();
        assert_eq!(records[0].value, "foo  bar");
    }

    #[test]
    fn test_parse_empty_value() {
        let records = parse_records("10 20 a\n").unwrap();
        assert_eq!(records[0].value, "");
        assert_eq!(records[0].original_line(), "10 20 a");
    }

    #[test]
    fn test_skip_blank_and_comment_lines() {
        let content = "\n# comment\n   \n10 20 a foo\n  # indented comment\n";
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let records = parse_records("  10 20 a foo  \r\n").unwrap();
        assert_eq!(records[0].original_line(), "10 20 a foo");
    }

    #[test]
    fn test_too_few_fields_is_an_error() {
        let err = parse_records("10 20\n").unwrap_err();
        match err {
            RecordError::Parse { line, message, .. } => {
                assert_eq!(line, 1);
                assert!(message.contains("expected at least 3 fields"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_integer_timestamp_is_an_error() {
        let err = parse_records("10 x a foo\n").unwrap_err();
        match err {
            RecordError::Parse { message, .. } => {
                assert!(message.contains("invalid end timestamp: 'x'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_double_space_between_fields_is_an_error() {
        // "10  20 a" tokenizes to ["10", "", "20", "a"]; the empty second
        // token is not a valid end timestamp.
        let err = parse_records("10  20 a\n").unwrap_err();
        match err {
            RecordError::Parse { message, .. } => {
                assert!(message.contains("invalid end timestamp: ''"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_reports_line_number_after_skipped_lines() {
        let err = parse_records("# header\n\n10 20 a ok\nbroken\n").unwrap_err();
        match err {
            RecordError::Parse { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_path_labels_errors_with_file_name() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not numbers\n").unwrap();
        file.flush().unwrap();

        let reader = RecordReader::from_path(file.path()).unwrap();
        let err = reader.records().collect::<Result<Vec<_>>>().unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_source_from_arg() {
        assert_eq!(Source::from_arg("-"), Source::Stdin);
        assert_eq!(
            Source::from_arg("fixtures.txt"),
            Source::File(PathBuf::from("fixtures.txt"))
        );
    }

    #[test]
    fn test_read_sources_concatenates_files_in_order() {
        let mut a = NamedTempFile::new().unwrap();
        a.write_all(b"10 20 a foo\n").unwrap();
        a.flush().unwrap();
        let mut b = NamedTempFile::new().unwrap();
        b.write_all(b"30 40 a bar\n").unwrap();
        b.flush().unwrap();

        let sources = vec![
            Source::File(a.path().to_path_buf()),
            Source::File(b.path().to_path_buf()),
        ];
        let records = read_sources(&sources).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value, "foo");
        assert_eq!(records[1].value, "bar");
    }

    #[test]
    fn test_read_sources_missing_file() {
        let sources = vec![Source::File(PathBuf::from("/no/such/fixture.txt"))];
        assert!(matches!(
            read_sources(&sources),
            Err(RecordError::Io(_))
        ));
    }
}
