//! Schema fields: extraction, transform chain and error shaping.

use std::fmt;

use magicparse_ingest::RawRow;
use magicparse_model::{Category, ConfigError, FieldConfig, Result, TransformSpec, Value};
use magicparse_transform::{Transform, TransformCatalog, TransformError};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Where a field's raw value sits in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// 1-based column of a delimited row.
    Column { number: usize },
    /// Character slice of a fixed-width line.
    Span { start: usize, length: usize },
}

impl Position {
    /// Reads the position from a field configuration.
    ///
    /// `column-number` wins when present; otherwise both `column-start` and
    /// `column-length` are required.
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        match (config.column_number, config.column_start, config.column_length) {
            (Some(0), _, _) => Err(ConfigError::InvalidColumnNumber {
                key: config.key.clone(),
            }),
            (Some(number), _, _) => Ok(Position::Column { number }),
            (None, Some(start), Some(length)) => match start.checked_add(length) {
                Some(_) => Ok(Position::Span { start, length }),
                None => Err(ConfigError::SpanOverflow {
                    key: config.key.clone(),
                }),
            },
            _ => Err(ConfigError::MissingPosition {
                key: config.key.clone(),
            }),
        }
    }

    /// Extracts the raw text at this position.
    pub fn extract(&self, row: &RawRow) -> std::result::Result<String, TransformError> {
        if let Some(message) = row.unreadable() {
            return Err(TransformError::new(message));
        }
        match *self {
            Position::Column { number } => number
                .checked_sub(1)
                .and_then(|index| row.cell(index))
                .map(str::to_string)
                .ok_or_else(|| {
                    TransformError::new(format!(
                        "column {number} is out of range, row has {} column(s)",
                        row.width()
                    ))
                }),
            Position::Span { start, length } => {
                let line = row
                    .line()
                    .ok_or_else(|| TransformError::new("row is not a fixed-width line"))?;
                let available = line.chars().count();
                let end = start
                    .checked_add(length)
                    .ok_or_else(|| TransformError::new("column span overflows"))?;
                if end > available {
                    return Err(TransformError::new(format!(
                        "row is too short, expected at least {end} characters, found {available}"
                    )));
                }
                Ok(line.chars().skip(start).take(length).collect())
            }
        }
    }

    fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        match self {
            Position::Column { number } => map.serialize_entry("column-number", number),
            Position::Span { start, length } => {
                map.serialize_entry("column-start", start)?;
                map.serialize_entry("column-length", length)
            }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Column { number } => write!(f, "column {number}"),
            Position::Span { start, length } => {
                write!(f, "chars {start}..{}", start.saturating_add(*length))
            }
        }
    }
}

/// A field failure: which field, where, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field_key: String,
    pub position: Position,
    pub error: String,
}

impl FieldError {
    /// Attaches the 1-based row number.
    pub fn at_row(self, row_number: usize) -> ErrorRecord {
        ErrorRecord {
            row_number,
            field_key: self.field_key,
            position: self.position,
            error: self.error,
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.position.serialize_entries(&mut map)?;
        map.serialize_entry("field-key", &self.field_key)?;
        map.serialize_entry("error", &self.error)?;
        map.end()
    }
}

/// A rejected row, as reported in a parse result.
///
/// Serializes to the flat wire shape, e.g.
/// `{"row-number": 2, "column-number": 1, "field-key": "age", "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub row_number: usize,
    pub field_key: String,
    pub position: Position,
    pub error: String,
}

impl Serialize for ErrorRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("row-number", &self.row_number)?;
        self.position.serialize_entries(&mut map)?;
        map.serialize_entry("field-key", &self.field_key)?;
        map.serialize_entry("error", &self.error)?;
        map.end()
    }
}

/// One schema field.
///
/// The chain is always `[pre-processors...][converter][validators...]`;
/// post-processors are kept apart and only run once the chain succeeded.
pub struct Field {
    key: String,
    type_name: String,
    position: Position,
    transforms: Vec<Box<dyn Transform>>,
    post_processors: Vec<Box<dyn Transform>>,
}

impl Field {
    /// Builds a field and its transforms from the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a missing position, an unknown type or
    /// transform, or invalid transform parameters.
    pub fn build(config: &FieldConfig, catalog: &TransformCatalog) -> Result<Self> {
        let position = Position::from_config(config)?;

        let build_all = |category: Category, specs: &[TransformSpec]| {
            specs
                .iter()
                .map(|spec| catalog.build(category, spec))
                .collect::<Result<Vec<_>>>()
        };

        let mut transforms = build_all(Category::PreProcessor, &config.pre_processors)?;
        let converter = catalog
            .converters
            .build(&TransformSpec::new(config.type_name.as_str()))
            .map_err(|err| match err {
                ConfigError::UnknownTransform { .. } => ConfigError::UnknownType {
                    key: config.key.clone(),
                    type_name: config.type_name.clone(),
                },
                other => other,
            })?;
        transforms.push(converter);
        transforms.extend(build_all(Category::Validator, &config.validators)?);

        let post_processors = build_all(Category::PostProcessor, &config.post_processors)?;

        Ok(Self {
            key: config.key.clone(),
            type_name: config.type_name.clone(),
            position,
            transforms,
            post_processors,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Declared type name (the converter's registry name).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Pre-processors, converter and validators, in application order.
    pub fn transforms(&self) -> &[Box<dyn Transform>] {
        &self.transforms
    }

    pub fn post_processors(&self) -> &[Box<dyn Transform>] {
        &self.post_processors
    }

    /// Runs the chain, then the post-processors, on an already extracted value.
    pub fn transform(&self, value: Value) -> std::result::Result<Value, TransformError> {
        let value = apply_all(&self.transforms, value)?;
        apply_all(&self.post_processors, value)
    }

    /// Extracts this field's value from a row and transforms it.
    pub fn read_value(&self, row: &RawRow) -> std::result::Result<Value, TransformError> {
        let raw = self.position.extract(row)?;
        self.transform(Value::Str(raw))
    }

    /// Shapes a failure of this field into a [`FieldError`].
    pub fn error(&self, error: &TransformError) -> FieldError {
        FieldError {
            field_key: self.key.clone(),
            position: self.position,
            error: error.message().to_string(),
        }
    }

    /// [`Field::read_value`] with the failure already shaped.
    pub fn extract(&self, row: &RawRow) -> std::result::Result<Value, FieldError> {
        self.read_value(row).map_err(|err| self.error(&err))
    }
}

fn apply_all(
    transforms: &[Box<dyn Transform>],
    value: Value,
) -> std::result::Result<Value, TransformError> {
    transforms
        .iter()
        .try_fold(value, |value, transform| transform.apply(value))
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |transforms: &[Box<dyn Transform>]| {
            transforms
                .iter()
                .map(|t| t.name().to_string())
                .collect::<Vec<_>>()
        };
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("type_name", &self.type_name)
            .field("position", &self.position)
            .field("transforms", &names(&self.transforms))
            .field("post_processors", &names(&self.post_processors))
            .finish()
    }
}
