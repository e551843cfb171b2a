//! String clean-up applied before type conversion.
//!
//! Pre-processors take and return [`Value::Str`]. Anything else is rejected
//! with "value is not a string".

use std::collections::BTreeMap;

use magicparse_model::Value;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, TransformError};
use crate::transform::{Configurable, NoParameters, Transform, expect_str};

/// Trims whitespace on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripWhitespaces;

impl Transform for StripWhitespaces {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let s = expect_str(value)?;
        Ok(Value::Str(s.trim().to_string()))
    }
}

impl Configurable for StripWhitespaces {
    const NAME: &'static str = "strip-whitespaces";
    type Parameters = NoParameters;

    fn from_parameters(_: NoParameters) -> std::result::Result<Self, String> {
        Ok(Self)
    }
}

/// Strips leading characters that belong to a set.
#[derive(Debug, Clone)]
pub struct LeftStrip {
    characters: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeftStripParameters {
    pub characters: String,
}

impl Transform for LeftStrip {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let s = expect_str(value)?;
        let stripped = s.trim_start_matches(|c: char| self.characters.contains(c));
        Ok(Value::Str(stripped.to_string()))
    }
}

impl Configurable for LeftStrip {
    const NAME: &'static str = "left-strip";
    type Parameters = LeftStripParameters;

    fn from_parameters(parameters: LeftStripParameters) -> std::result::Result<Self, String> {
        Ok(Self {
            characters: parameters.characters,
        })
    }
}

/// Left-pads with `0` up to a character width. Longer values pass unchanged.
#[derive(Debug, Clone, Copy)]
pub struct LeftPadZeroes {
    width: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeftPadZeroesParameters {
    pub width: usize,
}

impl Transform for LeftPadZeroes {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let s = expect_str(value)?;
        let missing = self.width.saturating_sub(s.chars().count());
        Ok(Value::Str(format!("{}{s}", "0".repeat(missing))))
    }
}

impl Configurable for LeftPadZeroes {
    const NAME: &'static str = "left-pad-zeroes";
    type Parameters = LeftPadZeroesParameters;

    fn from_parameters(parameters: LeftPadZeroesParameters) -> std::result::Result<Self, String> {
        Ok(Self {
            width: parameters.width,
        })
    }
}

/// Literal substring replacement.
#[derive(Debug, Clone)]
pub struct Replace {
    pattern: String,
    replacement: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaceParameters {
    pub pattern: String,
    pub replacement: String,
}

impl Transform for Replace {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let s = expect_str(value)?;
        Ok(Value::Str(s.replace(&self.pattern, &self.replacement)))
    }
}

impl Configurable for Replace {
    const NAME: &'static str = "replace";
    type Parameters = ReplaceParameters;

    fn from_parameters(parameters: ReplaceParameters) -> std::result::Result<Self, String> {
        if parameters.pattern.is_empty() {
            return Err("pattern must not be empty".to_string());
        }
        Ok(Self {
            pattern: parameters.pattern,
            replacement: parameters.replacement,
        })
    }
}

/// Regex replace-all. The replacement may reference groups (`$1`, `${name}`).
#[derive(Debug, Clone)]
pub struct RegexReplace {
    regex: Regex,
    replacement: String,
}

impl Transform for RegexReplace {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let s = expect_str(value)?;
        let replaced = self.regex.replace_all(&s, self.replacement.as_str());
        Ok(Value::Str(replaced.into_owned()))
    }
}

impl Configurable for RegexReplace {
    const NAME: &'static str = "regex-replace";
    type Parameters = ReplaceParameters;

    fn from_parameters(parameters: ReplaceParameters) -> std::result::Result<Self, String> {
        let regex = Regex::new(&parameters.pattern).map_err(|e| e.to_string())?;
        Ok(Self {
            regex,
            replacement: parameters.replacement,
        })
    }
}

/// Looks the value up in a fixed table.
///
/// Values missing from the table map to `default` when one is configured,
/// otherwise they fail.
#[derive(Debug, Clone)]
pub struct Map {
    values: BTreeMap<String, String>,
    default: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapParameters {
    pub values: BTreeMap<String, String>,
    #[serde(default)]
    pub default: Option<String>,
}

impl Transform for Map {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: Value) -> Result<Value> {
        let s = expect_str(value)?;
        if let Some(mapped) = self.values.get(&s) {
            return Ok(Value::Str(mapped.clone()));
        }
        match &self.default {
            Some(default) => Ok(Value::Str(default.clone())),
            None => {
                let keys: Vec<String> = self.values.keys().map(|k| format!("'{k}'")).collect();
                Err(TransformError::new(format!(
                    "value '{s}' does not map to any values in [{}]",
                    keys.join(", ")
                )))
            }
        }
    }
}

impl Configurable for Map {
    const NAME: &'static str = "map";
    type Parameters = MapParameters;

    fn from_parameters(parameters: MapParameters) -> std::result::Result<Self, String> {
        Ok(Self {
            values: parameters.values,
            default: parameters.default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply<T: Transform>(transform: &T, input: &str) -> Result<Value> {
        transform.apply(Value::from(input))
    }

    #[test]
    fn test_strip_whitespaces() {
        assert_eq!(
            apply(&StripWhitespaces, "   mac adam    ").unwrap(),
            Value::from("mac adam")
        );
        assert_eq!(apply(&StripWhitespaces, "\t\n").unwrap(), Value::from(""));
    }

    #[test]
    fn test_rejects_non_string() {
        let err = StripWhitespaces.apply(Value::Int(1)).unwrap_err();
        assert_eq!(err.message(), "value is not a string");
    }

    #[test]
    fn test_left_strip() {
        let strip = LeftStrip::from_parameters(LeftStripParameters {
            characters: "0 ".to_string(),
        })
        .unwrap();
        assert_eq!(apply(&strip, "00 0120").unwrap(), Value::from("120"));
        assert_eq!(apply(&strip, "000").unwrap(), Value::from(""));
    }

    #[test]
    fn test_left_pad_zeroes() {
        let pad = LeftPadZeroes { width: 5 };
        assert_eq!(apply(&pad, "42").unwrap(), Value::from("00042"));
        assert_eq!(apply(&pad, "123456").unwrap(), Value::from("123456"));
        assert_eq!(apply(&pad, "é").unwrap(), Value::from("0000é"));
    }

    #[test]
    fn test_replace_is_literal() {
        let replace = Replace::from_parameters(ReplaceParameters {
            pattern: "X.X".to_string(),
            replacement: "0".to_string(),
        })
        .unwrap();
        assert_eq!(apply(&replace, "X.X1XYX").unwrap(), Value::from("01XYX"));
    }

    #[test]
    fn test_replace_rejects_empty_pattern() {
        let result = Replace::from_parameters(ReplaceParameters {
            pattern: String::new(),
            replacement: "0".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_regex_replace() {
        let replace = RegexReplace::from_parameters(ReplaceParameters {
            pattern: r"(\d+),(\d+)".to_string(),
            replacement: "$1.$2".to_string(),
        })
        .unwrap();
        assert_eq!(apply(&replace, "12,50 and 3,1").unwrap(), Value::from("12.50 and 3.1"));
    }

    #[test]
    fn test_regex_replace_invalid_pattern() {
        let result = RegexReplace::from_parameters(ReplaceParameters {
            pattern: "(".to_string(),
            replacement: String::new(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_map() {
        let map = Map::from_parameters(MapParameters {
            values: BTreeMap::from([
                ("M".to_string(), "male".to_string()),
                ("F".to_string(), "female".to_string()),
            ]),
            default: None,
        })
        .unwrap();
        assert_eq!(apply(&map, "F").unwrap(), Value::from("female"));
        let err = apply(&map, "X").unwrap_err();
        assert_eq!(
            err.message(),
            "value 'X' does not map to any values in ['F', 'M']"
        );
    }

    #[test]
    fn test_map_default() {
        let map = Map::from_parameters(MapParameters {
            values: BTreeMap::from([("Y".to_string(), "yes".to_string())]),
            default: Some("unknown".to_string()),
        })
        .unwrap();
        assert_eq!(apply(&map, "N").unwrap(), Value::from("unknown"));
    }
}
