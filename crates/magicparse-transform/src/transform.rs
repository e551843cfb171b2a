//! The transform abstraction.

use std::fmt;

use bigdecimal::BigDecimal;
use magicparse_model::Value;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, TransformError};

pub(crate) const NOT_A_STRING: &str = "value is not a string";
pub(crate) const NOT_A_NUMBER: &str = "value is not a number";

/// A single step of a field's transform chain.
///
/// Implementations hold their parameters (compiled patterns, denominators...)
/// and must not keep mutable state: `apply` depends only on `self` and the
/// input, so one instance can serve many rows on many threads.
pub trait Transform: Send + Sync + fmt::Debug {
    /// Registry name of the transform (e.g. `"strip-whitespaces"`).
    fn name(&self) -> &str;

    /// Transforms a value, or explains why it cannot.
    fn apply(&self, value: Value) -> Result<Value>;
}

/// A transform buildable from named parameters.
///
/// Registering a `Configurable` type wires its parameter struct to serde:
/// the configured parameters are deserialized into [`Self::Parameters`],
/// so missing or unexpected names are reported as configuration errors.
pub trait Configurable: Transform + Sized + 'static {
    /// Registry name.
    const NAME: &'static str;

    /// Parameter struct deserialized from the configuration.
    type Parameters: DeserializeOwned;

    /// Builds the transform, or returns a message describing bad parameters.
    fn from_parameters(parameters: Self::Parameters) -> std::result::Result<Self, String>;
}

/// Parameters of transforms that take none. Rejects any key.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoParameters {}

pub(crate) fn expect_str(value: Value) -> Result<String> {
    match value {
        Value::Str(s) => Ok(s),
        _ => Err(TransformError::new(NOT_A_STRING)),
    }
}

pub(crate) fn expect_decimal(value: &Value) -> Result<BigDecimal> {
    value
        .to_decimal()
        .ok_or_else(|| TransformError::new(NOT_A_NUMBER))
}

/// Reads a JSON number parameter as an exact decimal.
pub(crate) fn number_to_decimal(
    number: &serde_json::Number,
) -> std::result::Result<BigDecimal, String> {
    number
        .to_string()
        .parse::<BigDecimal>()
        .map_err(|e| format!("'{number}' is not a valid number: {e}"))
}
