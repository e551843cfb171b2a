//! Declarative schema configuration.
//!
//! The configuration document mirrors the wire format:
//!
//! ```json
//! {
//!   "file_type": "csv",
//!   "has_header": true,
//!   "fields": [
//!     {
//!       "key": "ratio",
//!       "type": "decimal",
//!       "column-number": 2,
//!       "pre-processors": [{"name": "strip-whitespaces"}],
//!       "post-processors": [{"name": "divide", "parameters": {"denominator": 100}}]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Encoding used when a schema does not declare one.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Delimiter used by delimited schemas that do not declare one.
pub const DEFAULT_DELIMITER: char = ',';

/// Named transform parameters, passed to the transform's builder.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// Reference to a transform: `{name, parameters?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformSpec {
    /// Lookup key in the category's registry.
    pub name: String,

    /// Named arguments for the builder. Absent means "build with no arguments".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl TransformSpec {
    /// A transform built without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: None,
        }
    }

    /// A transform with parameters taken from a JSON object.
    ///
    /// Non-object values leave the spec without parameters.
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = parameters {
            self.parameters = Some(map);
        }
        self
    }
}

/// Configuration of a single schema field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Output key in the parsed row.
    pub key: String,

    /// Declared type, resolved against the converter registry.
    #[serde(rename = "type")]
    pub type_name: String,

    /// 1-based column for delimited rows.
    #[serde(
        rename = "column-number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub column_number: Option<usize>,

    /// 0-based character offset for fixed-width rows.
    #[serde(
        rename = "column-start",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub column_start: Option<usize>,

    /// Character count for fixed-width rows.
    #[serde(
        rename = "column-length",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub column_length: Option<usize>,

    #[serde(rename = "pre-processors", default)]
    pub pre_processors: Vec<TransformSpec>,

    #[serde(default)]
    pub validators: Vec<TransformSpec>,

    #[serde(rename = "post-processors", default)]
    pub post_processors: Vec<TransformSpec>,
}

impl FieldConfig {
    /// Creates a field with no position and no transforms besides its converter.
    pub fn new(key: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_name: type_name.into(),
            column_number: None,
            column_start: None,
            column_length: None,
            pre_processors: Vec::new(),
            validators: Vec::new(),
            post_processors: Vec::new(),
        }
    }

    /// Set the 1-based column number.
    pub fn with_column_number(mut self, number: usize) -> Self {
        self.column_number = Some(number);
        self
    }

    /// Set the fixed-width slice.
    pub fn with_span(mut self, start: usize, length: usize) -> Self {
        self.column_start = Some(start);
        self.column_length = Some(length);
        self
    }

    /// Append a pre-processor.
    pub fn with_pre_processor(mut self, spec: TransformSpec) -> Self {
        self.pre_processors.push(spec);
        self
    }

    /// Append a validator.
    pub fn with_validator(mut self, spec: TransformSpec) -> Self {
        self.validators.push(spec);
        self
    }

    /// Append a post-processor.
    pub fn with_post_processor(mut self, spec: TransformSpec) -> Self {
        self.post_processors.push(spec);
        self
    }
}

/// Configuration of a whole schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Dispatch key for the file type registry.
    pub file_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Delimited files only: skip the first record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_header: Option<bool>,

    /// Delimited files only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,

    /// Fields in output and processing order.
    pub fields: Vec<FieldConfig>,

    /// Any other top-level keys, handed to the file type as its own options.
    #[serde(flatten)]
    pub options: Parameters,
}

impl SchemaConfig {
    /// Creates an empty configuration for a file type.
    pub fn new(file_type: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            encoding: None,
            has_header: None,
            delimiter: None,
            fields: Vec::new(),
            options: Parameters::new(),
        }
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already parsed JSON document.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Declared encoding label, or [`DEFAULT_ENCODING`].
    pub fn encoding(&self) -> &str {
        self.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }

    /// Declared delimiter, or [`DEFAULT_DELIMITER`].
    pub fn delimiter(&self) -> char {
        self.delimiter.unwrap_or(DEFAULT_DELIMITER)
    }

    pub fn has_header(&self) -> bool {
        self.has_header.unwrap_or(false)
    }

    /// A file-type-specific option.
    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }
}
