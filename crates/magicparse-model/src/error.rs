//! Configuration errors raised while building a schema.

use thiserror::Error;

use crate::Category;

/// Errors that can occur while building a schema from its configuration.
///
/// These are fatal to the build call. Per-value failures during parsing are
/// never reported through this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The `file_type` is not registered.
    #[error("unknown file type '{file_type}'")]
    UnknownFileType { file_type: String },

    /// A transform name is not registered in its category.
    #[error("invalid {category} '{name}'")]
    UnknownTransform { category: Category, name: String },

    /// A field declares a type with no matching converter.
    #[error("field '{key}' has unknown type '{type_name}'")]
    UnknownType { key: String, type_name: String },

    /// Transform parameters could not be applied.
    #[error("invalid parameters for {category} '{name}': {message}")]
    InvalidParameters {
        category: Category,
        name: String,
        message: String,
    },

    /// A field has neither a column number nor a start/length pair.
    #[error("field '{key}' must define 'column-number' or both 'column-start' and 'column-length'")]
    MissingPosition { key: String },

    /// Column numbers are 1-based.
    #[error("field '{key}' has column-number 0, column numbers start at 1")]
    InvalidColumnNumber { key: String },

    /// `column-start` plus `column-length` does not fit in a line offset.
    #[error("field '{key}' has a span ending past the largest supported line length")]
    SpanOverflow { key: String },

    /// The encoding label is not recognized.
    #[error("unknown encoding '{label}'")]
    UnknownEncoding { label: String },

    /// The delimiter cannot be used by the delimited reader.
    #[error("delimiter must be a single ASCII character, got '{delimiter}'")]
    InvalidDelimiter { delimiter: char },

    /// The configuration document itself is malformed.
    #[error("invalid schema configuration: {message}")]
    Invalid { message: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}

/// Result type for schema building.
pub type Result<T> = std::result::Result<T, ConfigError>;
