//! Schema inference tests

use super::*;
use crate::error::Error;
use crate::types::{KeyConvention, NodePath};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn infer_one(value: serde_json::Value) -> Option<SchemaNode> {
    SchemaInferrer::new()
        .infer_value(&value)
        .expect("inference should not fail")
}

#[test]
fn test_infer_simple_record() {
    let records = vec![
        json!({"id": 0, "tag": "a"}),
        json!({"id": 1, "tag": "b"}),
    ];

    let schema = infer_schema(&records).unwrap();

    assert_eq!(schema.type_list, TypeList::single(TypeName::Object));
    assert_eq!(
        schema.get_property("id").unwrap().type_list,
        TypeList::nullable(TypeName::Integer)
    );
    assert_eq!(
        schema.get_property("tag").unwrap().type_list,
        TypeList::nullable(TypeName::String)
    );
}

#[test]
fn test_root_type_is_bare_object() {
    let schema = infer_schema(&[json!({"a": 1})]).unwrap();
    assert_eq!(schema.to_json()["type"], json!("object"));
}

#[test]
fn test_null_value_node() {
    let node = infer_one(json!(null)).unwrap();
    assert_eq!(node.type_list, TypeList::null_only());
    assert_eq!(node.to_json()["type"], json!(["null"]));
}

#[test]
fn test_empty_object_carries_no_evidence() {
    assert!(infer_one(json!({})).is_none());

    // An empty nested object leaves no property behind
    let node = infer_one(json!({"a": 1, "empty": {}})).unwrap();
    let props = node.properties.as_ref().unwrap();
    assert!(props.contains_key("a"));
    assert!(!props.contains_key("empty"));
}

#[test]
fn test_array_uses_first_element_only() {
    let node = infer_one(json!({"values": [1, "not checked"]})).unwrap();
    let values = node.get_property("values").unwrap();
    assert_eq!(values.type_list, TypeList::nullable(TypeName::Array));
    assert_eq!(
        values.items.as_ref().unwrap().type_list,
        TypeList::nullable(TypeName::Integer)
    );
}

#[test]
fn test_empty_array_has_no_items() {
    let node = infer_one(json!([])).unwrap();
    assert_eq!(node.type_list, TypeList::nullable(TypeName::Array));
    assert!(node.items.is_none());
}

#[test_case(json!(true), TypeName::Boolean ; "bool")]
#[test_case(json!(1), TypeName::Integer ; "int")]
#[test_case(json!(-7), TypeName::Integer ; "negative int")]
#[test_case(json!(0.5), TypeName::Number ; "float")]
#[test_case(json!("a"), TypeName::String ; "plain string")]
#[test_case(json!("1"), TypeName::Integer ; "numeric string")]
#[test_case(json!("1.5"), TypeName::Number ; "decimal string")]
#[test_case(json!("0.5"), TypeName::Number ; "decimal string with leading zero")]
#[test_case(json!("01"), TypeName::String ; "leading zero code")]
#[test_case(json!("0"), TypeName::String ; "bare zero string")]
#[test_case(json!(""), TypeName::String ; "empty string")]
#[test_case(json!("+1"), TypeName::Integer ; "plus sign")]
fn test_scalar_heuristics(value: serde_json::Value, expected: TypeName) {
    let node = infer_one(value).unwrap();
    assert_eq!(node.type_list, TypeList::nullable(expected));
}

#[test]
fn test_leading_zero_preservation_across_records() {
    let codes = infer_schema(&[json!({"zip": "01"}), json!({"zip": "02"})]).unwrap();
    assert_eq!(
        codes.get_property("zip").unwrap().type_list,
        TypeList::nullable(TypeName::String)
    );

    let counts = infer_schema(&[json!({"n": "1"}), json!({"n": "2"})]).unwrap();
    assert_eq!(
        counts.get_property("n").unwrap().type_list,
        TypeList::nullable(TypeName::Integer)
    );
}

#[test_case("2021-06-04", true ; "date only")]
#[test_case("2021-06-04T09:00", true ; "with time suffix")]
#[test_case("2021-06-01 09:00:00", true ; "space separated")]
#[test_case("2021-6-04", false ; "single digit month")]
#[test_case("2021-13-04", false ; "month out of range")]
#[test_case("1899-06-04", false ; "year before 1900")]
#[test_case("20", false ; "bare number")]
#[test_case("2021-06-4", true ; "single digit day")]
fn test_datetime_heuristic(input: &str, expected: bool) {
    assert_eq!(looks_like_datetime(input), expected);
}

#[test]
fn test_date_string_gets_format() {
    let node = infer_one(json!("2021-06-04")).unwrap();
    assert_eq!(node.type_list, TypeList::nullable(TypeName::String));
    assert_eq!(node.format, Some("date-time".to_string()));

    let node = infer_one(json!("20")).unwrap();
    assert_eq!(node.format, None);
}

#[test]
fn test_key_convention_applied_at_every_depth() {
    let keys = KeyConvention {
        lower: true,
        replace_special: Some("_".to_string()),
        snake_case: true,
    };
    let inferrer = SchemaInferrer::new().with_key_convention(keys);

    let schema = inferrer
        .infer(&[json!({"First Name!": "a", "Nested": {"Inner Key": 1}})])
        .unwrap();

    assert!(schema.get_property("first_name_").is_some());
    let nested = schema.get_property("nested").unwrap();
    assert!(nested.get_property("inner_key").is_some());
}

#[test]
fn test_record_level_selector() {
    let inferrer = SchemaInferrer::new().with_record_level("$.data.record");
    let schema = inferrer
        .infer(&[json!({"data": {"record": {"id": 1}}})])
        .unwrap();
    assert!(schema.get_property("id").is_some());
}

#[test]
fn test_non_object_input_rejected() {
    let err = infer_schema(&[json!([1, 2])]).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));

    let err = infer_schema(&[]).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_non_object_later_record_is_fatal() {
    // A non-object record after the first must not graft `items` onto the
    // accumulated object schema.
    let err = infer_schema(&[json!({"a": 1}), json!([1, 2])]).unwrap_err();
    match err {
        Error::TypeMismatch { path, left, right } => {
            assert_eq!(path.to_string(), "$");
            assert_eq!(left, "object");
            assert_eq!(right, "array");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }

    let err = infer_schema(&[json!({"a": 1}), json!("x")]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));

    // A pure-null record carries no evidence and stays legal.
    let schema = infer_schema(&[json!({"a": 1}), json!(null)]).unwrap();
    assert!(schema.get_property("a").is_some());
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_null_dominance() {
    let node = SchemaNode::nullable(TypeName::Integer);
    let null = SchemaNode::null();
    let path = NodePath::root();

    assert_eq!(merge_nodes(&node, &null, &path).unwrap(), node);
    assert_eq!(merge_nodes(&null, &node, &path).unwrap(), node);
}

#[test]
fn test_merge_widens_integer_to_number() {
    let schema = infer_schema(&[json!({"v": 1}), json!({"v": 0.5})]).unwrap();
    assert_eq!(
        schema.get_property("v").unwrap().type_list,
        TypeList::nullable(TypeName::Number)
    );

    // widening is monotone: a later integer does not narrow back
    let schema = infer_schema(&[json!({"v": 0.5}), json!({"v": 1})]).unwrap();
    assert_eq!(
        schema.get_property("v").unwrap().type_list,
        TypeList::nullable(TypeName::Number)
    );
}

#[test]
fn test_merge_numeric_string_with_float_string() {
    let schema = infer_schema(&[json!({"field": "1"}), json!({"field": "10.0"})]).unwrap();
    assert_eq!(
        schema.get_property("field").unwrap().type_list,
        TypeList::nullable(TypeName::Number)
    );
}

#[test]
fn test_merge_mismatch_widens_to_string() {
    let schema = infer_schema(&[json!({"v": 1}), json!({"v": true})]).unwrap();
    assert_eq!(
        schema.get_property("v").unwrap().type_list,
        TypeList::nullable(TypeName::String)
    );
}

#[test]
fn test_merge_format_mismatch_drops_format() {
    let schema = infer_schema(&[
        json!({"d": "2021-06-04"}),
        json!({"d": "not a date"}),
    ])
    .unwrap();

    let d = schema.get_property("d").unwrap();
    assert_eq!(d.type_list, TypeList::nullable(TypeName::String));
    assert_eq!(d.format, None);
}

#[test]
fn test_merge_matching_format_is_kept() {
    let schema = infer_schema(&[
        json!({"d": "2021-06-04"}),
        json!({"d": "2021-06-05T09:00"}),
    ])
    .unwrap();
    assert_eq!(
        schema.get_property("d").unwrap().format,
        Some("date-time".to_string())
    );
}

#[test]
fn test_merge_object_vs_array_is_fatal() {
    let err = infer_schema(&[json!({"x": {"a": 1}}), json!({"x": [1, 2]})]).unwrap_err();
    match err {
        Error::TypeMismatch { path, left, right } => {
            assert_eq!(path.to_string(), "$.x");
            assert_eq!(left, "object");
            assert_eq!(right, "array");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

#[test]
fn test_merge_object_vs_scalar_is_fatal() {
    let err = infer_schema(&[json!({"x": {"a": 1}}), json!({"x": 1})]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_merge_top_level_key_union() {
    // A key seen only in the earlier record survives the fold.
    let schema = infer_schema(&[json!({"a": 1, "b": "x"}), json!({"a": 2})]).unwrap();
    assert!(schema.get_property("a").is_some());
    assert!(schema.get_property("b").is_some());

    let schema = infer_schema(&[json!({"a": 1}), json!({"a": 2, "b": "x"})]).unwrap();
    assert!(schema.get_property("b").is_some());
}

#[test]
fn test_merge_nested_left_only_key_dropped() {
    // Nested merges iterate the right-hand key set: a nested property seen
    // only in the earlier record is dropped. Pinned current behavior.
    let schema = infer_schema(&[
        json!({"o": {"keep": 1, "lost": 2}}),
        json!({"o": {"keep": 3}}),
    ])
    .unwrap();

    let o = schema.get_property("o").unwrap();
    assert!(o.get_property("keep").is_some());
    assert!(o.get_property("lost").is_none());
}

#[test]
fn test_merge_fold_order_independent_for_types() {
    let records = [json!({"v": 1}), json!({"v": 0.5}), json!({"v": "2"})];
    let forward = infer_schema(&records).unwrap();

    let mut reversed = records.to_vec();
    reversed.reverse();
    let backward = infer_schema(&reversed).unwrap();

    assert_eq!(
        forward.get_property("v").unwrap().type_list,
        backward.get_property("v").unwrap().type_list
    );
}

#[test]
fn test_merge_recurses_into_array_items() {
    let schema = infer_schema(&[
        json!({"a": [1]}),
        json!({"a": [0.5]}),
    ])
    .unwrap();

    let items = schema.get_property("a").unwrap().items.as_ref().unwrap();
    assert_eq!(items.type_list, TypeList::nullable(TypeName::Number));
}

#[test]
fn test_merge_does_not_mutate_inputs() {
    let a = SchemaNode::nullable(TypeName::Integer);
    let b = SchemaNode::nullable(TypeName::Number);
    let a_before = a.clone();
    let b_before = b.clone();

    let merged = merge_nodes(&a, &b, &NodePath::root()).unwrap();
    assert_eq!(merged.type_list, TypeList::nullable(TypeName::Number));
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

// ============================================================================
// Normalize
// ============================================================================

#[test]
fn test_normalize_only_null_field() {
    let schema = infer_schema(&[
        json!({"field": "1", "null_field": null}),
        json!({"field": "2", "null_field": null}),
    ])
    .unwrap();

    assert_eq!(
        schema.get_property("null_field").unwrap().type_list,
        default_type()
    );
}

#[test]
fn test_normalize_empty_array_items() {
    let schema = infer_schema(&[json!({"arr": []}), json!({"arr": []})]).unwrap();

    let arr = schema.get_property("arr").unwrap();
    assert_eq!(arr.type_list, TypeList::nullable(TypeName::Array));
    assert_eq!(arr.items.as_ref().unwrap().type_list, default_type());
}

#[test]
fn test_normalize_array_of_null_elements() {
    let schema = infer_schema(&[json!({"arr": [null]})]).unwrap();
    let arr = schema.get_property("arr").unwrap();
    assert_eq!(arr.items.as_ref().unwrap().type_list, default_type());
}

#[test]
fn test_normalize_reaches_object_inside_array() {
    let schema = infer_schema(&[json!({"arr": [{"inner": null}]})]).unwrap();
    let items = schema.get_property("arr").unwrap().items.as_ref().unwrap();
    assert_eq!(
        items.get_property("inner").unwrap().type_list,
        default_type()
    );
}

#[test]
fn test_normalize_nested_null_subfield() {
    let schema = infer_schema(&[
        json!({"nested": {"some_date": "2021-05-25", "null_subfield": null}}),
        json!({"nested": {"some_date": "2021-05-25", "null_subfield": null}}),
    ])
    .unwrap();

    let nested = schema.get_property("nested").unwrap();
    assert_eq!(
        nested.get_property("some_date").unwrap().format,
        Some("date-time".to_string())
    );
    assert_eq!(
        nested.get_property("null_subfield").unwrap().type_list,
        default_type()
    );
}

#[test]
fn test_normalize_is_idempotent() {
    let schema = infer_schema(&[
        json!({"a": null, "b": [], "c": {"d": 1}, "e": [0.5]}),
    ])
    .unwrap();

    let again = normalize(&schema, &NodePath::root());
    assert_eq!(schema, again);
}

// ============================================================================
// Serialized shape
// ============================================================================

#[test]
fn test_schema_json_shape() {
    let schema = infer_schema(&[json!({
        "id": 1,
        "when": "2021-06-04",
        "tags": ["a"],
    })])
    .unwrap();

    let v = schema.to_json();
    assert_eq!(v["type"], json!("object"));
    assert_eq!(v["properties"]["id"]["type"], json!(["null", "integer"]));
    assert_eq!(v["properties"]["when"]["type"], json!(["null", "string"]));
    assert_eq!(v["properties"]["when"]["format"], json!("date-time"));
    assert_eq!(
        v["properties"]["tags"]["items"]["type"],
        json!(["null", "string"])
    );
    // absent options are not serialized
    assert!(v["properties"]["id"].get("format").is_none());
    assert!(v["properties"]["id"].get("properties").is_none());
}

#[test]
fn test_schema_round_trips_through_serde() {
    let schema = infer_schema(&[json!({"a": 1, "b": {"c": "2021-06-04"}})]).unwrap();
    let text = serde_json::to_string(&schema).unwrap();
    let back: SchemaNode = serde_json::from_str(&text).unwrap();
    assert_eq!(schema, back);
}
