//! Shared data model for magicparse.
//!
//! This crate holds the types every other magicparse crate agrees on:
//!
//! - **Values**: [`Value`], the dynamic value flowing through a field's transform chain
//! - **Rows**: [`Row`], an insertion-ordered mapping from field key to value
//! - **Configuration**: [`SchemaConfig`], [`FieldConfig`] and [`TransformSpec`],
//!   deserialized from the declarative schema document
//! - **Errors**: [`ConfigError`], raised while a schema is being built
//!
//! # Example
//!
//! ```
//! use magicparse_model::SchemaConfig;
//!
//! let config = SchemaConfig::from_json(
//!     r#"{"file_type": "csv", "fields": [{"key": "age", "type": "int", "column-number": 1}]}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.file_type, "csv");
//! assert_eq!(config.delimiter(), ',');
//! assert_eq!(config.fields[0].column_number, Some(1));
//! ```

mod category;
mod config;
mod error;
mod row;
mod value;

pub use category::Category;
pub use config::{
    DEFAULT_DELIMITER, DEFAULT_ENCODING, FieldConfig, Parameters, SchemaConfig, TransformSpec,
};
pub use error::{ConfigError, Result};
pub use row::Row;
pub use value::Value;
