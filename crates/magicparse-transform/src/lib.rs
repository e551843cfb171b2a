//! Field transforms for magicparse.
//!
//! A field's raw string goes through an ordered chain of [`Transform`]s:
//! pre-processors, exactly one converter, validators, then post-processors.
//! Every transform is built by name from a [`TransformSpec`] through the
//! [`TransformRegistry`] of its [`Category`]. Registries are open: callers
//! can add their own builders next to the built-ins.
//!
//! # Example
//!
//! ```
//! use magicparse_model::{Category, TransformSpec, Value};
//! use magicparse_transform::TransformCatalog;
//! use serde_json::json;
//!
//! let catalog = TransformCatalog::builtin();
//! let replace = catalog
//!     .build(
//!         Category::PreProcessor,
//!         &TransformSpec::new("replace")
//!             .with_parameters(json!({"pattern": "XXX", "replacement": "000"})),
//!     )
//!     .unwrap();
//!
//! assert_eq!(replace.apply(Value::from("XXX150")).unwrap(), Value::from("000150"));
//! ```
//!
//! # Built-ins
//!
//! | Category       | Names |
//! |----------------|-------|
//! | pre-processor  | `strip-whitespaces`, `left-strip`, `left-pad-zeroes`, `replace`, `regex-replace`, `map` |
//! | converter      | `str`, `int`, `decimal`, `date`, `datetime` |
//! | validator      | `regex-matches`, `greater-than` |
//! | post-processor | `divide`, `round` |

mod error;
mod registry;
mod transform;

pub mod converters;
pub mod post_processors;
pub mod pre_processors;
pub mod validators;

pub use error::{Result, TransformError};
pub use registry::{TransformBuilder, TransformCatalog, TransformRegistry};
pub use transform::{Configurable, NoParameters, Transform};

pub use magicparse_model::{Category, Parameters, TransformSpec, Value};
