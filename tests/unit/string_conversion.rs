//! Unit tests for in-memory JSON/CSV conversion
//!
//! Tests cover:
//! - Both conversion directions through the public API
//! - Header discovery, field selection and flattening
//! - Round trips of flat records
//! - Error handling for invalid input and unsupported pairs

use serde_json::{json, Value};
use tabconv::conversion::DataFormat;
use tabconv::{convert, convert_with_metadata, ConversionConfig, ConversionError, FormatError};

fn to_csv(json: &str) -> String {
    convert(json, &ConversionConfig::json_to_csv()).unwrap()
}

fn to_json(csv: &str) -> Value {
    let out = convert(csv, &ConversionConfig::csv_to_json()).unwrap();
    serde_json::from_str(&out).unwrap()
}

#[cfg(test)]
mod json_to_csv_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_records() {
        let csv = to_csv(r#"[{"name": "Alice", "age": 30, "active": true},
                           {"name": "Bob", "age": 25, "active": false}]"#);
        assert_eq!(csv, "name,age,active\nAlice,30,true\nBob,25,false");
    }

    #[test]
    fn test_empty_array_has_no_header() {
        assert_eq!(to_csv("[]"), "");
        assert_eq!(to_csv("  [ ]  "), "");
    }

    #[test]
    fn test_header_discovery_order() {
        let csv = to_csv(r#"[{"a":1,"b":2},{"b":3,"c":4}]"#);
        assert_eq!(csv.lines().next(), Some("a,b,c"));
    }

    #[test]
    fn test_null_and_missing_are_empty() {
        let csv = to_csv(r#"[{"a": null, "b": 1}, {"b": 2}]"#);
        assert_eq!(csv, "a,b\n,1\n,2");
    }

    #[test]
    fn test_flatten_nested() {
        let config = ConversionConfig::json_to_csv().with_flatten(true);
        let csv = convert(r#"[{"a":{"b":1,"c":2}}]"#, &config).unwrap();
        assert_eq!(csv, "a.b,a.c\n1,2");
    }

    #[test]
    fn test_flatten_with_explicit_dotted_fields() {
        let config = ConversionConfig::json_to_csv()
            .with_flatten(true)
            .with_fields(["user.name", "id"]);
        let csv = convert(
            r#"[{"id": 7, "user": {"name": "Ann", "age": 3}}]"#,
            &config,
        )
        .unwrap();
        assert_eq!(csv, "user.name,id\nAnn,7");
    }

    #[test]
    fn test_non_object_elements_skipped() {
        let result = convert_with_metadata(
            r#"[{"a":1}, "skip-me", {"a":2}]"#,
            &ConversionConfig::json_to_csv(),
        )
        .unwrap();
        assert_eq!(result.content, "a\n1\n2");
        assert_eq!(result.metadata.row_count, 2);
        assert_eq!(result.metadata.skipped_records, 1);
    }

    #[test]
    fn test_explicit_fields_without_records_is_header_only() {
        let config = ConversionConfig::json_to_csv().with_fields(["id", "name"]);
        let csv = convert(r#"[1, "two", null]"#, &config).unwrap();
        assert_eq!(csv, "id,name");
    }

    #[test]
    fn test_single_empty_object() {
        assert_eq!(to_csv("[{}]"), "\n");
        assert_eq!(to_csv("[{}, {}]"), "\n\n");
    }

    #[test]
    fn test_array_elements_are_indexed_records() {
        assert_eq!(to_csv("[[1, 2]]"), "0,1\n1,2");
        assert_eq!(to_csv(r#"[["a"], {"0": "b", "x": 1}]"#), "0,x\na,\nb,1");
    }

    #[test]
    fn test_custom_delimiter_quotes_only_that_delimiter() {
        let config = ConversionConfig::json_to_csv().with_delimiter(';').unwrap();
        let csv = convert(r#"[{"x": "a,b", "y": "c;d"}]"#, &config).unwrap();
        assert_eq!(csv, "x;y\na,b;\"c;d\"");
    }

    #[test]
    fn test_arrays_stay_single_cells() {
        let csv = to_csv(r#"[{"tags": ["a", "b"]}]"#);
        assert_eq!(csv, "tags\n\"[\"\"a\"\",\"\"b\"\"]\"");
    }
}

#[cfg(test)]
mod csv_to_json_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_rows_with_coercion() {
        let value = to_json("id,name,active,score\n1,Alice,true,9.5\n2,Bob,false,\n");
        assert_eq!(
            value,
            json!([
                {"id": 1, "name": "Alice", "active": true, "score": 9.5},
                {"id": 2, "name": "Bob", "active": false, "score": null}
            ])
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_json(""), json!([]));
        assert_eq!(to_json("\n\n  \n"), json!([]));
        assert_eq!(to_json("only,header"), json!([]));
    }

    #[test]
    fn test_key_order_follows_header() {
        let out = convert("b,a\n1,2", &ConversionConfig::csv_to_json().with_pretty(false)).unwrap();
        assert_eq!(out, r#"[{"b":1,"a":2}]"#);
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(to_json("a,b\r\nx,y\r\n"), json!([{"a": "x", "b": "y"}]));
    }

    #[test]
    fn test_short_rows_omit_trailing_keys() {
        assert_eq!(to_json("a,b,c\n1"), json!([{"a": 1}]));
    }

    #[test]
    fn test_pretty_output_uses_two_spaces() {
        let out = convert("a\n1", &ConversionConfig::csv_to_json()).unwrap();
        assert_eq!(out, "[\n  {\n    \"a\": 1\n  }\n]");
    }

    #[test]
    fn test_infinite_numbers_become_null() {
        assert_eq!(
            to_json("a,b,c,d\nInfinity,-Infinity,1e400,NaN"),
            json!([{"a": null, "b": null, "c": null, "d": "NaN"}])
        );
    }

    #[test]
    fn test_integer_boundary() {
        let config = ConversionConfig::csv_to_json().with_pretty(false);
        let out = convert("a,b\n9007199254740992,9007199254740993", &config).unwrap();
        assert_eq!(out, r#"[{"a":9007199254740992,"b":9007199254740992}]"#);
    }

    #[test]
    fn test_in_memory_text_is_not_size_limited() {
        let config = ConversionConfig::csv_to_json().with_memory_limit(1024);
        let raw = format!("a\n{}", "x".repeat(2000));
        let value: Value = serde_json::from_str(&convert(&raw, &config).unwrap()).unwrap();
        assert_eq!(value[0]["a"].as_str().map(str::len), Some(2000));
    }

    #[test]
    fn test_tab_delimited() {
        let config = ConversionConfig::csv_to_json().with_delimiter('\t').unwrap();
        let out = convert("a\tb\nx,y\tz", &config.with_pretty(false)).unwrap();
        assert_eq!(out, r#"[{"a":"x,y","b":"z"}]"#);
    }
}

#[cfg(test)]
mod round_trip_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flat_records_round_trip() {
        let original = json!([
            {"id": 1, "name": "Alice", "active": true, "note": null},
            {"id": 2, "name": "Bob", "active": false, "note": "x y"},
            {"id": 3, "name": "Eve", "active": true, "note": "-1.5e3 text"}
        ]);

        let csv = to_csv(&original.to_string());
        assert_eq!(to_json(&csv), original);
    }

    #[test]
    fn test_numeric_strings_become_numbers() {
        let csv = to_csv(r#"[{"zip": "02134", "flag": "true"}]"#);
        assert_eq!(to_json(&csv), json!([{"zip": 2134, "flag": true}]));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_json() {
        let err = convert(r#"[{"a": }]"#, &ConversionConfig::json_to_csv()).unwrap_err();
        assert!(matches!(err, ConversionError::ParseError(_)));
        assert!(err.user_message().starts_with("Failed to parse JSON:"));
    }

    #[test]
    fn test_root_not_array() {
        let err = convert(r#"{"a": 1}"#, &ConversionConfig::json_to_csv()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::FormatError(FormatError::NotAnArray { .. })
        ));
    }

    #[test]
    fn test_unsupported_pair() {
        let config = ConversionConfig::default().with_formats(DataFormat::Json, DataFormat::Json);
        let err = convert("[]", &config).unwrap_err();
        assert_eq!(err.user_message(), "Unsupported conversion: json to json");
    }

    #[test]
    fn test_strict_quotes() {
        let config = ConversionConfig::csv_to_json().with_strict_quotes(true);
        let err = convert("a\n\"unterminated", &config).unwrap_err();
        assert!(err.user_message().starts_with("Failed to parse CSV:"));

        assert_eq!(to_json("a\n\"unterminated"), json!([{"a": "unterminated"}]));
    }
}
