//! Schemas and the parse loop.

use std::fmt;

use magicparse_ingest::{Encoding, RawRow, RowSource, decode, resolve_encoding};
use magicparse_model::{ConfigError, Result, Row, SchemaConfig};
use serde::Serialize;
use tracing::{debug, debug_span, trace};

use crate::field::{ErrorRecord, Field, FieldError};
use crate::file_type::FileType;
use crate::registry::Registry;

/// Outcome of one parse call.
///
/// Every raw row lands in exactly one of the two lists; both keep the order
/// in which rows were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    pub rows: Vec<Row>,
    pub errors: Vec<ErrorRecord>,
}

impl ParseResult {
    /// True when no row was rejected.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of raw rows that were read.
    pub fn total(&self) -> usize {
        self.rows.len() + self.errors.len()
    }

    pub fn into_parts(self) -> (Vec<Row>, Vec<ErrorRecord>) {
        (self.rows, self.errors)
    }
}

/// A built schema: fields, a row source and an encoding.
///
/// Schemas are immutable once built. `parse` keeps all of its state on the
/// stack, so one schema can serve any number of calls from any number of
/// threads.
pub struct Schema {
    file_type: String,
    encoding: &'static Encoding,
    source: Box<dyn RowSource>,
    fields: Vec<Field>,
}

impl Schema {
    /// Assembles a schema from already built parts.
    pub fn new(
        file_type: impl Into<String>,
        encoding: &'static Encoding,
        source: Box<dyn RowSource>,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            file_type: file_type.into(),
            encoding,
            source,
            fields,
        }
    }

    /// Builds a schema against the process-wide [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unknown file type, encoding, type or
    /// transform, or any other invalid field configuration.
    pub fn build(config: &SchemaConfig) -> Result<Self> {
        let registry = Registry::read_global();
        Self::build_with(config, &registry)
    }

    /// Builds a schema against an explicit registry.
    pub fn build_with(config: &SchemaConfig, registry: &Registry) -> Result<Self> {
        let file_type =
            registry
                .file_type(&config.file_type)
                .ok_or_else(|| ConfigError::UnknownFileType {
                    file_type: config.file_type.clone(),
                })?;
        let encoding = resolve_encoding(config.encoding())?;
        let source = file_type.row_source(config)?;
        let fields = config
            .fields
            .iter()
            .map(|field| Field::build(field, registry.transforms()))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            file_type = %config.file_type,
            encoding = encoding.name(),
            fields = fields.len(),
            "built schema"
        );

        Ok(Self::new(file_type.key(), encoding, source, fields))
    }

    /// Parses a JSON configuration document and builds it.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::build(&SchemaConfig::from_json(json)?)
    }

    /// Adds a file type to the process-wide registry.
    pub fn register<F: FileType + 'static>(file_type: F) {
        let key = file_type.key().to_string();
        Registry::write_global().register_file_type(file_type);
        debug!(file_type = %key, "registered file type");
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn source(&self) -> &dyn RowSource {
        self.source.as_ref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Parses raw bytes into rows and per-row errors.
    pub fn parse(&self, bytes: &[u8]) -> ParseResult {
        self.parse_rows(bytes, None)
    }

    /// Like [`Schema::parse`], passing each successful row through
    /// `post_treatment` before it is collected. Rejected rows skip it.
    pub fn parse_with<F>(&self, bytes: &[u8], post_treatment: F) -> ParseResult
    where
        F: Fn(Row) -> Row,
    {
        let treat: &dyn Fn(Row) -> Row = &post_treatment;
        self.parse_rows(bytes, Some(treat))
    }

    /// Reads every field of one raw row. The first failing field wins and
    /// the remaining fields are not attempted.
    pub fn parse_row(&self, raw: &RawRow) -> std::result::Result<Row, FieldError> {
        let mut row = Row::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = field.extract(raw)?;
            row.insert(field.key(), value);
        }
        Ok(row)
    }

    fn parse_rows(&self, bytes: &[u8], treat: Option<&dyn Fn(Row) -> Row>) -> ParseResult {
        let _span = debug_span!("parse", file_type = %self.file_type).entered();

        let text = decode(bytes, self.encoding);
        let mut result = ParseResult::default();

        for (index, raw) in self.source.rows(&text).enumerate() {
            let row_number = index + 1;
            match self.parse_row(&raw) {
                Ok(row) => {
                    let row = match treat {
                        Some(treat) => treat(row),
                        None => row,
                    };
                    result.rows.push(row);
                }
                Err(error) => {
                    trace!(
                        row_number,
                        field = %error.field_key,
                        error = %error.error,
                        "row rejected"
                    );
                    result.errors.push(error.at_row(row_number));
                }
            }
        }

        debug!(
            rows = result.rows.len(),
            errors = result.errors.len(),
            "parsed input"
        );
        result
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("file_type", &self.file_type)
            .field("encoding", &self.encoding.name())
            .field("source", &self.source)
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magicparse_model::{FieldConfig, Value};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_schema_is_shareable() {
        assert_send_sync::<Schema>();
    }

    #[test]
    fn test_parse_row_stops_at_first_failure() {
        let config = SchemaConfig::new("csv")
            .with_field(FieldConfig::new("a", "int").with_column_number(1))
            .with_field(FieldConfig::new("b", "int").with_column_number(2))
            .with_field(FieldConfig::new("c", "int").with_column_number(3));
        let schema = Schema::build_with(&config, &Registry::builtin()).unwrap();

        let raw = RawRow::Cells(vec!["1".into(), "x".into(), "y".into()]);
        let error = schema.parse_row(&raw).unwrap_err();
        assert_eq!(error.field_key, "b");

        let raw = RawRow::Cells(vec!["1".into(), "2".into(), "3".into()]);
        let row = schema.parse_row(&raw).unwrap();
        assert_eq!(
            row,
            Row::from([
                ("a", Value::Int(1)),
                ("b", Value::Int(2)),
                ("c", Value::Int(3))
            ])
        );
    }

    #[test]
    fn test_build_with_explicit_registry() {
        let config = SchemaConfig::new("csv");
        let err = Schema::build_with(&config, &Registry::empty()).unwrap_err();
        assert!(err.to_string().contains("unknown file type"));
    }

    #[test]
    fn test_unknown_encoding() {
        let config = SchemaConfig::new("csv").with_encoding("klingon");
        let err = Schema::build_with(&config, &Registry::builtin()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEncoding { .. }));
    }
}
