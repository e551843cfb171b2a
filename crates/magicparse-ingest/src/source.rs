//! Row sources: decoded text in, lazy raw rows out.

use std::fmt;

use magicparse_model::{ConfigError, Result, SchemaConfig};

use crate::row::RawRow;

/// Splits decoded text into raw rows.
///
/// Rows are produced lazily, one at a time. The iterator is finite and a
/// fresh one is created for every parse, so sources hold configuration only.
pub trait RowSource: Send + Sync + fmt::Debug {
    fn rows<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = RawRow> + 'a>;
}

/// Delimiter-separated records with RFC 4180 quoting.
///
/// Records may have different lengths. Every physical record yields exactly
/// one row: a blank line is an empty row and a record the reader rejects is
/// an [`RawRow::Unreadable`] row, so row numbers always follow the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedSource {
    delimiter: u8,
    has_header: bool,
}

impl DelimitedSource {
    pub fn new(delimiter: u8, has_header: bool) -> Self {
        Self {
            delimiter,
            has_header,
        }
    }

    /// Builds the source from a schema's `delimiter` and `has_header`.
    pub fn from_config(config: &SchemaConfig) -> Result<Self> {
        let delimiter = config.delimiter();
        if !delimiter.is_ascii() {
            return Err(ConfigError::InvalidDelimiter { delimiter });
        }
        Ok(Self::new(delimiter as u8, config.has_header()))
    }

    pub fn delimiter(&self) -> char {
        char::from(self.delimiter)
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    fn read_record(&self, record: &str) -> RawRow {
        if record.trim_end_matches(['\r', '\n']).is_empty() {
            return RawRow::Cells(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(record.as_bytes());
        let mut fields = csv::StringRecord::new();
        match reader.read_record(&mut fields) {
            Ok(_) => RawRow::Cells(fields.iter().map(str::to_string).collect()),
            Err(error) => {
                tracing::warn!(%error, "unreadable delimited record");
                RawRow::Unreadable(error.to_string())
            }
        }
    }
}

impl Default for DelimitedSource {
    fn default() -> Self {
        Self::new(b',', false)
    }
}

impl RowSource for DelimitedSource {
    fn rows<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = RawRow> + 'a> {
        let records = Records {
            rest: text,
            delimiter: self.delimiter(),
        };
        Box::new(
            records
                .skip(usize::from(self.has_header))
                .map(|record| self.read_record(record)),
        )
    }
}

/// Splits delimited text into physical records, terminators included.
///
/// Line breaks inside quoted fields stay in their record. Blank lines are
/// records of their own.
struct Records<'a> {
    rest: &'a str,
    delimiter: char,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let mut end = self.rest.len();
        let mut in_quotes = false;
        // A quote right after a closing quote is an escaped quote.
        let mut just_closed = false;
        let mut field_start = true;
        for (index, ch) in self.rest.char_indices() {
            if in_quotes {
                if ch == '"' {
                    in_quotes = false;
                    just_closed = true;
                }
                continue;
            }
            if ch == '"' && (field_start || just_closed) {
                in_quotes = true;
                just_closed = false;
                field_start = false;
                continue;
            }
            if ch == '\n' {
                end = index + 1;
                break;
            }
            just_closed = false;
            field_start = ch == self.delimiter;
        }

        let (record, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(record)
    }
}

/// One row per line; `\n` and `\r\n` terminators are removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedWidthSource;

impl RowSource for FixedWidthSource {
    fn rows<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = RawRow> + 'a> {
        Box::new(text.lines().map(|line| RawRow::Line(line.to_string())))
    }
}
