//! Numeric reshaping applied once the rest of the chain succeeded.

use bigdecimal::BigDecimal;
use magicparse_model::Value;
use serde::Deserialize;

use crate::error::Result;
use crate::transform::{Configurable, Transform, expect_decimal, number_to_decimal};

/// Divides by a fixed, non-zero denominator. The result is always a decimal.
#[derive(Debug, Clone)]
pub struct Divide {
    denominator: BigDecimal,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DivideParameters {
    pub denominator: serde_json::Number,
}

impl Transform for Divide {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let numerator = expect_decimal(&value)?;
        Ok(Value::Decimal(numerator / self.denominator.clone()))
    }
}

impl Configurable for Divide {
    const NAME: &'static str = "divide";
    type Parameters = DivideParameters;

    fn from_parameters(parameters: DivideParameters) -> std::result::Result<Self, String> {
        let denominator = number_to_decimal(&parameters.denominator)?;
        if denominator == BigDecimal::from(0) {
            return Err("denominator must not be zero".to_string());
        }
        Ok(Self { denominator })
    }
}

/// Largest number of decimal places `round` accepts, in either direction.
pub const MAX_ROUND_PRECISION: i64 = 100;

/// Rounds decimals half-to-even to a number of decimal places.
/// Integers pass unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Round {
    precision: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundParameters {
    pub precision: i64,
}

impl Transform for Round {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        match value {
            Value::Int(_) => Ok(value),
            other => {
                let number = expect_decimal(&other)?;
                Ok(Value::Decimal(number.round(self.precision)))
            }
        }
    }
}

impl Configurable for Round {
    const NAME: &'static str = "round";
    type Parameters = RoundParameters;

    fn from_parameters(parameters: RoundParameters) -> std::result::Result<Self, String> {
        let precision = parameters.precision;
        if !(-MAX_ROUND_PRECISION..=MAX_ROUND_PRECISION).contains(&precision) {
            return Err(format!(
                "precision must be between -{MAX_ROUND_PRECISION} and {MAX_ROUND_PRECISION}, \
                 got {precision}"
            ));
        }
        Ok(Self { precision })
    }
}
