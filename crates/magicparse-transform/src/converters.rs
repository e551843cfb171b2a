//! Type converters, selected by a field's declared `type`.
//!
//! Conversion failures carry a fixed message per type so callers can match
//! on them.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate};
use magicparse_model::Value;

use crate::error::{Result, TransformError};
use crate::transform::{Configurable, NoParameters, Transform};

pub const INVALID_INTEGER: &str = "value is not a valid integer";
pub const INVALID_DECIMAL: &str = "value is not a valid decimal";
pub const INVALID_DATE: &str = "value is not a valid date";
pub const INVALID_DATETIME: &str = "value is not a valid datetime";

/// Keeps strings as they are; renders other values as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrConverter;

impl Transform for StrConverter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        match value {
            Value::Str(_) => Ok(value),
            other => Ok(Value::Str(other.to_string())),
        }
    }
}

impl Configurable for StrConverter {
    const NAME: &'static str = "str";
    type Parameters = NoParameters;

    fn from_parameters(_: NoParameters) -> std::result::Result<Self, String> {
        Ok(Self)
    }
}

/// Signed 64-bit integers. Surrounding whitespace is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntConverter;

impl Transform for IntConverter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        match value {
            Value::Int(_) => Ok(value),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| TransformError::new(INVALID_INTEGER)),
            _ => Err(TransformError::new(INVALID_INTEGER)),
        }
    }
}

impl Configurable for IntConverter {
    const NAME: &'static str = "int";
    type Parameters = NoParameters;

    fn from_parameters(_: NoParameters) -> std::result::Result<Self, String> {
        Ok(Self)
    }
}

/// Arbitrary precision decimals. Surrounding whitespace is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalConverter;

impl Transform for DecimalConverter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        match value {
            Value::Decimal(_) => Ok(value),
            Value::Int(i) => Ok(Value::Decimal(BigDecimal::from(i))),
            Value::Str(s) => BigDecimal::from_str(s.trim())
                .map(Value::Decimal)
                .map_err(|_| TransformError::new(INVALID_DECIMAL)),
            _ => Err(TransformError::new(INVALID_DECIMAL)),
        }
    }
}

impl Configurable for DecimalConverter {
    const NAME: &'static str = "decimal";
    type Parameters = NoParameters;

    fn from_parameters(_: NoParameters) -> std::result::Result<Self, String> {
        Ok(Self)
    }
}

/// ISO 8601 calendar dates (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DateConverter;

impl Transform for DateConverter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        match value {
            Value::Date(_) => Ok(value),
            Value::Str(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| TransformError::new(INVALID_DATE)),
            _ => Err(TransformError::new(INVALID_DATE)),
        }
    }
}

impl Configurable for DateConverter {
    const NAME: &'static str = "date";
    type Parameters = NoParameters;

    fn from_parameters(_: NoParameters) -> std::result::Result<Self, String> {
        Ok(Self)
    }
}

/// RFC 3339 timestamps with an explicit offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeConverter;

impl Transform for DateTimeConverter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        match value {
            Value::DateTime(_) => Ok(value),
            Value::Str(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(Value::DateTime)
                .map_err(|_| TransformError::new(INVALID_DATETIME)),
            _ => Err(TransformError::new(INVALID_DATETIME)),
        }
    }
}

impl Configurable for DateTimeConverter {
    const NAME: &'static str = "datetime";
    type Parameters = NoParameters;

    fn from_parameters(_: NoParameters) -> std::result::Result<Self, String> {
        Ok(Self)
    }
}
