//! Tests for field transform chains and error shaping.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use magicparse_core::{
    Field, FieldConfig, FieldError, Position, RawRow, TransformCatalog, TransformSpec, Value,
};
use serde_json::json;

fn build(config: FieldConfig) -> Field {
    Field::build(&config, &TransformCatalog::builtin()).unwrap()
}

fn names(field: &Field) -> Vec<&str> {
    field.transforms().iter().map(|t| t.name()).collect()
}

#[test]
fn chain_runs_pre_processors_converter_then_validators() {
    let field = build(
        FieldConfig::new("name", "str")
            .with_column_number(1)
            .with_pre_processor(TransformSpec::new("strip-whitespaces"))
            .with_validator(
                TransformSpec::new("regex-matches").with_parameters(json!({"pattern": "^mac .*$"})),
            ),
    );

    assert_eq!(names(&field), vec!["strip-whitespaces", "str", "regex-matches"]);
    assert!(field.post_processors().is_empty());

    let value = field.transform(Value::from("   mac adam    ")).unwrap();
    assert_eq!(value, Value::from("mac adam"));
}

#[test]
fn post_processors_are_kept_apart_and_run_last() {
    let field = build(
        FieldConfig::new("ratio", "decimal")
            .with_column_number(1)
            .with_pre_processor(
                TransformSpec::new("replace")
                    .with_parameters(json!({"pattern": "XXX", "replacement": "000"})),
            )
            .with_post_processor(
                TransformSpec::new("divide").with_parameters(json!({"denominator": 100})),
            ),
    );

    assert_eq!(names(&field), vec!["replace", "decimal"]);
    let post: Vec<&str> = field.post_processors().iter().map(|t| t.name()).collect();
    assert_eq!(post, vec!["divide"]);

    let value = field.transform(Value::from("XXX150")).unwrap();
    assert_eq!(value, Value::Decimal(BigDecimal::from_str("1.50").unwrap()));
}

#[test]
fn validators_see_converted_values() {
    let field = build(
        FieldConfig::new("qty", "int")
            .with_column_number(1)
            .with_pre_processor(
                TransformSpec::new("left-strip").with_parameters(json!({"characters": "0"})),
            )
            .with_validator(
                TransformSpec::new("greater-than").with_parameters(json!({"threshold": 10})),
            ),
    );

    let row = RawRow::Cells(vec!["0042".into()]);
    assert_eq!(field.read_value(&row).unwrap(), Value::Int(42));

    let row = RawRow::Cells(vec!["0007".into()]);
    let err = field.read_value(&row).unwrap_err();
    assert_eq!(err.message(), "value must be greater than 10");
}

#[test]
fn csv_error_format() {
    let field = build(FieldConfig::new("ratio", "decimal").with_column_number(1));

    let err = field
        .read_value(&RawRow::Cells(vec!["hello".into()]))
        .unwrap_err();

    assert_eq!(
        field.error(&err),
        FieldError {
            field_key: "ratio".into(),
            position: Position::Column { number: 1 },
            error: "value is not a valid decimal".into(),
        }
    );
    assert_eq!(
        serde_json::to_value(field.error(&err)).unwrap(),
        json!({"column-number": 1, "field-key": "ratio", "error": "value is not a valid decimal"})
    );
}

#[test]
fn columnar_error_format() {
    let field = build(FieldConfig::new("ratio", "decimal").with_span(0, 5));

    let err = field.extract(&RawRow::Line("hello".into())).unwrap_err();

    assert_eq!(
        err,
        FieldError {
            field_key: "ratio".into(),
            position: Position::Span {
                start: 0,
                length: 5
            },
            error: "value is not a valid decimal".into(),
        }
    );
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!({
            "column-start": 0,
            "column-length": 5,
            "field-key": "ratio",
            "error": "value is not a valid decimal"
        })
    );
}

#[test]
fn extraction_failure_is_a_field_error() {
    let field = build(FieldConfig::new("city", "str").with_column_number(4));

    let err = field
        .extract(&RawRow::Cells(vec!["a".into(), "b".into()]))
        .unwrap_err();

    assert_eq!(err.field_key, "city");
    assert_eq!(err.position, Position::Column { number: 4 });
    assert_eq!(err.error, "column 4 is out of range, row has 2 column(s)");
}

#[test]
fn post_processor_failure_uses_the_same_shape() {
    let field = build(
        FieldConfig::new("label", "str")
            .with_column_number(1)
            .with_post_processor(
                TransformSpec::new("round").with_parameters(json!({"precision": 2})),
            ),
    );

    let err = field.extract(&RawRow::Cells(vec!["abc".into()])).unwrap_err();

    assert_eq!(
        err,
        FieldError {
            field_key: "label".into(),
            position: Position::Column { number: 1 },
            error: "value is not a number".into(),
        }
    );
}

#[test]
fn post_processors_do_not_run_when_the_chain_fails() {
    let field = build(
        FieldConfig::new("amount", "int")
            .with_column_number(1)
            .with_post_processor(
                TransformSpec::new("divide").with_parameters(json!({"denominator": 100})),
            ),
    );

    let err = field.extract(&RawRow::Cells(vec!["x".into()])).unwrap_err();
    assert_eq!(err.error, "value is not a valid integer");
}
