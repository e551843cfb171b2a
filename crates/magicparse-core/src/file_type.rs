//! File types: how a schema's configuration becomes a row source.

use magicparse_ingest::{DelimitedSource, FixedWidthSource, RowSource};
use magicparse_model::{Result, SchemaConfig};

/// A file type a schema can be built for.
///
/// Implementors only decide how rows are produced; field extraction, the
/// transform chains and error aggregation are shared by every file type.
///
/// # Example
///
/// ```
/// use magicparse_core::{FileType, RawRow, RowSource, Schema, SchemaConfig};
///
/// #[derive(Debug)]
/// struct PipedSource;
///
/// impl RowSource for PipedSource {
///     fn rows<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = RawRow> + 'a> {
///         Box::new(text.split('|').map(|item| RawRow::Cells(vec![item.to_string()])))
///     }
/// }
///
/// struct Piped;
///
/// impl FileType for Piped {
///     fn key(&self) -> &str {
///         "piped"
///     }
///
///     fn row_source(&self, _: &SchemaConfig) -> magicparse_core::Result<Box<dyn RowSource>> {
///         Ok(Box::new(PipedSource))
///     }
/// }
///
/// Schema::register(Piped);
/// let schema = Schema::build(&SchemaConfig::new("piped")).unwrap();
/// assert_eq!(schema.parse(b"a|b|c").rows.len(), 3);
/// ```
pub trait FileType: Send + Sync {
    /// Dispatch key matched against `file_type`.
    fn key(&self) -> &str;

    /// Builds the row source from the schema configuration.
    fn row_source(&self, config: &SchemaConfig) -> Result<Box<dyn RowSource>>;
}

/// Delimited files (`"csv"`): `delimiter` and `has_header` apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct Csv;

impl FileType for Csv {
    fn key(&self) -> &str {
        "csv"
    }

    fn row_source(&self, config: &SchemaConfig) -> Result<Box<dyn RowSource>> {
        Ok(Box::new(DelimitedSource::from_config(config)?))
    }
}

/// Fixed-width files (`"columnar"`): one row per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Columnar;

impl FileType for Columnar {
    fn key(&self) -> &str {
        "columnar"
    }

    fn row_source(&self, _: &SchemaConfig) -> Result<Box<dyn RowSource>> {
        Ok(Box::new(FixedWidthSource))
    }
}
