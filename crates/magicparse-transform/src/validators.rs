//! Validators: return the value unchanged or reject it.

use bigdecimal::BigDecimal;
use magicparse_model::Value;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, TransformError};
use crate::transform::{Configurable, NOT_A_STRING, Transform, expect_decimal, number_to_decimal};

/// The value must match a regex at its start.
#[derive(Debug, Clone)]
pub struct RegexMatches {
    regex: Regex,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegexMatchesParameters {
    pub pattern: String,
}

impl RegexMatches {
    fn matches_at_start(&self, s: &str) -> bool {
        // The leftmost match starts at 0 whenever any match does.
        self.regex.find(s).is_some_and(|m| m.start() == 0)
    }
}

impl Transform for RegexMatches {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let Some(s) = value.as_str() else {
            return Err(TransformError::new(NOT_A_STRING));
        };
        if self.matches_at_start(s) {
            Ok(value)
        } else {
            Err(TransformError::new(format!(
                "string does not match regex '{}'",
                self.regex.as_str()
            )))
        }
    }
}

impl Configurable for RegexMatches {
    const NAME: &'static str = "regex-matches";
    type Parameters = RegexMatchesParameters;

    fn from_parameters(parameters: RegexMatchesParameters) -> std::result::Result<Self, String> {
        let regex = Regex::new(&parameters.pattern).map_err(|e| e.to_string())?;
        Ok(Self { regex })
    }
}

/// Numeric values must be strictly greater than a threshold.
#[derive(Debug, Clone)]
pub struct GreaterThan {
    threshold: BigDecimal,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GreaterThanParameters {
    pub threshold: serde_json::Number,
}

impl Transform for GreaterThan {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let number = expect_decimal(&value)?;
        if number > self.threshold {
            Ok(value)
        } else {
            Err(TransformError::new(format!(
                "value must be greater than {}",
                self.threshold
            )))
        }
    }
}

impl Configurable for GreaterThan {
    const NAME: &'static str = "greater-than";
    type Parameters = GreaterThanParameters;

    fn from_parameters(parameters: GreaterThanParameters) -> std::result::Result<Self, String> {
        Ok(Self {
            threshold: number_to_decimal(&parameters.threshold)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex(pattern: &str) -> RegexMatches {
        RegexMatches::from_parameters(RegexMatchesParameters {
            pattern: pattern.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_regex_matches() {
        let validator = regex("^mac .*$");
        assert_eq!(
            validator.apply(Value::from("mac adam")).unwrap(),
            Value::from("mac adam")
        );
        let err = validator.apply(Value::from("adam")).unwrap_err();
        assert_eq!(err.message(), "string does not match regex '^mac .*$'");
    }

    #[test]
    fn test_regex_matches_is_anchored_at_start() {
        let validator = regex(r"\d+");
        assert!(validator.apply(Value::from("12ab")).is_ok());
        assert!(validator.apply(Value::from("ab12")).is_err());
    }

    #[test]
    fn test_regex_matches_rejects_numbers() {
        let err = regex(".*").apply(Value::Int(1)).unwrap_err();
        assert_eq!(err.message(), "value is not a string");
    }

    #[test]
    fn test_invalid_regex() {
        let result = RegexMatches::from_parameters(RegexMatchesParameters {
            pattern: "[".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_greater_than() {
        let validator = GreaterThan::from_parameters(GreaterThanParameters {
            threshold: serde_json::Number::from(10),
        })
        .unwrap();
        assert_eq!(validator.apply(Value::Int(11)).unwrap(), Value::Int(11));
        let err = validator.apply(Value::Int(10)).unwrap_err();
        assert_eq!(err.message(), "value must be greater than 10");
        let err = validator.apply(Value::from("11")).unwrap_err();
        assert_eq!(err.message(), "value is not a number");
    }
}
