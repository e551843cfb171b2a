//! Schema-driven record parsing.
//!
//! A [`Schema`] is built once from a declarative [`SchemaConfig`] and turns
//! raw delimited or fixed-width bytes into typed [`Row`]s. Every field runs
//! an ordered transform chain (pre-processors, one converter, validators,
//! post-processors). Failures never abort a parse: each rejected row becomes
//! exactly one [`ErrorRecord`] naming the row, the field and its position.
//!
//! # Example
//!
//! ```
//! use magicparse_core::{ErrorRecord, Position, Row, Schema, Value};
//!
//! let schema = Schema::from_json(
//!     r#"{"file_type": "csv", "fields": [{"key": "age", "type": "int", "column-number": 1}]}"#,
//! )
//! .unwrap();
//!
//! let result = schema.parse(b"1\na\n2");
//!
//! assert_eq!(
//!     result.rows,
//!     vec![Row::from([("age", Value::Int(1))]), Row::from([("age", Value::Int(2))])]
//! );
//! assert_eq!(
//!     result.errors,
//!     vec![ErrorRecord {
//!         row_number: 2,
//!         field_key: "age".into(),
//!         position: Position::Column { number: 1 },
//!         error: "value is not a valid integer".into(),
//!     }]
//! );
//! ```
//!
//! # Extension
//!
//! - New file types implement [`FileType`] and are added with [`Schema::register`]
//!   (process-wide) or [`Registry::register_file_type`] (explicit registry).
//! - New transforms are registered in the [`TransformCatalog`] of a [`Registry`].

mod field;
mod file_type;
mod registry;
mod schema;

pub use field::{ErrorRecord, Field, FieldError, Position};
pub use file_type::{Columnar, Csv, FileType};
pub use registry::Registry;
pub use schema::{ParseResult, Schema};

// === Re-exports ===
pub use magicparse_ingest::{DelimitedSource, Encoding, FixedWidthSource, RawRow, RowSource};
pub use magicparse_model::{
    Category, ConfigError, FieldConfig, Parameters, Result, Row, SchemaConfig, TransformSpec,
    Value,
};
pub use magicparse_transform::{
    Configurable, Transform, TransformCatalog, TransformError, TransformRegistry,
};
