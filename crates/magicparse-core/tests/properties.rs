//! Property tests for the parse loop.

use magicparse_core::{Registry, Row, Schema, SchemaConfig};
use proptest::prelude::*;
use serde_json::json;

fn csv_schema(has_header: bool, fields: serde_json::Value) -> Schema {
    let config = SchemaConfig::from_value(json!({
        "file_type": "csv",
        "has_header": has_header,
        "fields": fields
    }))
    .unwrap();
    Schema::build_with(&config, &Registry::builtin()).unwrap()
}

fn cell() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{1,4}", "[a-z]{1,4}"]
}

proptest! {
    #[test]
    fn zero_fields_yield_one_empty_row_per_line(
        lines in prop::collection::vec("[a-z0-9]{1,6}", 0..20)
    ) {
        let schema = csv_schema(false, json!([]));
        let result = schema.parse(lines.join("\n").as_bytes());

        prop_assert_eq!(result.rows, vec![Row::new(); lines.len()]);
        prop_assert!(result.errors.is_empty());
    }

    #[test]
    fn every_row_is_either_kept_or_rejected(lines in prop::collection::vec(cell(), 0..30)) {
        let schema = csv_schema(false, json!([{"key": "n", "type": "int", "column-number": 1}]));
        let result = schema.parse(lines.join("\n").as_bytes());

        let numeric = lines.iter().filter(|l| l.bytes().all(|b| b.is_ascii_digit())).count();
        prop_assert_eq!(result.total(), lines.len());
        prop_assert_eq!(result.rows.len(), numeric);
    }

    #[test]
    fn error_row_numbers_are_one_based_and_skip_the_header(
        lines in prop::collection::vec(cell(), 1..30)
    ) {
        let fields = json!([{"key": "n", "type": "int", "column-number": 1}]);
        let expected: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.bytes().all(|b| b.is_ascii_digit()))
            .map(|(i, _)| i + 1)
            .collect();

        let plain = csv_schema(false, fields.clone()).parse(lines.join("\n").as_bytes());
        let with_header = csv_schema(true, fields)
            .parse(format!("n\n{}", lines.join("\n")).as_bytes());

        let plain_numbers: Vec<usize> = plain.errors.iter().map(|e| e.row_number).collect();
        let header_numbers: Vec<usize> = with_header.errors.iter().map(|e| e.row_number).collect();
        prop_assert_eq!(&plain_numbers, &expected);
        prop_assert_eq!(&header_numbers, &expected);
    }
}
