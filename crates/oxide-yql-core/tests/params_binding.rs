//! Tests for binding caller values to generated parameters and building
//! the engine parameter map.

mod common;
use common::*;

use std::sync::Arc;

use chrono::NaiveDate;
use oxide_yql_core::{
    DefaultTypeLookup, HostValue, ParserOptions, QueryError, TypeLookup, YqlType, YqlValue,
};

#[test]
fn test_values_get_natural_types() {
    let query = parse("SELECT * FROM t WHERE a = ? AND b = ? AND c = ? AND d = ?");
    let mut params = new_params(&query);
    params.set(1, true).unwrap();
    params.set(2, 1.5_f64).unwrap();
    params.set(3, vec![1_u8, 2]).unwrap();
    params.set(4, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).unwrap();

    let map = params.to_params().unwrap();
    let types: Vec<String> = map.iter().map(|(_, v)| v.yql_type().to_string()).collect();
    assert_eq!(types, vec!["Bool", "Double", "Bytes", "Date"]);
}

#[test]
fn test_explicit_type_wins() {
    let query = parse("SELECT ?");
    let mut params = new_params(&query);
    params.set_typed(1, 7_i64, &YqlType::Int16).unwrap();
    assert_eq!(params.value("$jp1").unwrap(), YqlValue::Int16(7));

    params.set_typed(1, "{}", &YqlType::Json).unwrap();
    assert_eq!(params.value("$jp1").unwrap(), YqlValue::Json(String::from("{}")));
}

#[test]
fn test_limit_converts_to_uint64() {
    let query = parse("SELECT * FROM t LIMIT ?");
    let mut params = new_params(&query);
    params.set(1, 10_i32).unwrap();
    assert_eq!(params.value("$jp2").unwrap_err(), QueryError::MissingValue(String::from("$jp2")));
    assert_eq!(params.value("$jp1").unwrap(), YqlValue::Uint64(10));

    let err = params.set(1, -5_i32).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot cast value of parameter $jp1 to Uint64: value -5 is out of range"
    );
}

#[test]
fn test_declared_type_survives_clear() {
    let query = parse("SELECT * FROM t WHERE a = ? LIMIT ?");
    let mut params = new_params(&query);
    params.set(1, "x").unwrap();
    params.set(2, 1_u8).unwrap();
    params.clear();

    let described = params.describe();
    assert_eq!(described[0].ty, None);
    assert_eq!(described[1].ty, Some(YqlType::Uint64));

    params.set_null(2, None).unwrap();
    assert_eq!(params.value("$jp2").unwrap(), YqlValue::null(&YqlType::Uint64));
}

#[test]
fn test_untyped_null_is_unknown() {
    let query = parse("SELECT ?");
    let mut params = new_params(&query);
    params.set(1, None::<i32>).unwrap();
    assert_eq!(
        params.to_params().unwrap_err(),
        QueryError::ParameterTypeUnknown(String::from("$jp1"))
    );

    params.set_null(1, Some(&YqlType::Text)).unwrap();
    assert!(params.value("$jp1").unwrap().is_null());
}

#[test]
fn test_missing_value_is_reported() {
    let query = parse("SELECT ?, ?");
    let mut params = new_params(&query);
    params.set(1, 1_i32).unwrap();
    let err = params.to_params().unwrap_err();
    assert_eq!(err.to_string(), "Missing value for parameter: $jp2");
}

#[test]
fn test_index_out_of_range() {
    let query = parse("SELECT * FROM t WHERE id IN (?, ?)");
    let mut params = new_params(&query);
    assert_eq!(params.len(), 2);
    assert_eq!(
        params.set(3, 1_i32).unwrap_err(),
        QueryError::ParameterIndexOutOfRange { index: 3, count: 2 }
    );
}

#[test]
fn test_native_values_pass_through() {
    let query = parse("SELECT ?");
    let mut params = new_params(&query);
    let value = YqlValue::List {
        item: YqlType::Int32,
        items: vec![YqlValue::Int32(1)],
    };
    params.set(1, value.clone()).unwrap();
    assert_eq!(params.value("$jp1").unwrap(), value);
}

/// Binds every text value as JSON.
struct JsonLookup;

impl TypeLookup for JsonLookup {
    fn find_type(&self, value: &HostValue, hint: Option<&YqlType>) -> Option<YqlType> {
        match value {
            HostValue::Text(_) if hint.is_none() => Some(YqlType::Json),
            _ => DefaultTypeLookup::new().find_type(value, hint),
        }
    }

    fn convert(&self, value: HostValue, ty: &YqlType) -> Result<YqlValue, String> {
        DefaultTypeLookup::new().convert(value, ty)
    }
}

#[test]
fn test_custom_type_lookup() {
    let query = parse("SELECT ?");
    let mut params = query.new_params(Arc::new(JsonLookup));
    params.set(1, r#"{"a": 1}"#).unwrap();
    let map = params.to_params().unwrap();
    assert_eq!(query.yql_text(&map), "DECLARE $jp1 AS Json;\nSELECT $jp1");
}

#[test]
fn test_declarations_follow_parameter_order() {
    let query = parse("SELECT ?; SELECT * FROM t WHERE id IN (?, ?) LIMIT ?");
    let mut params = new_params(&query);
    params.set(1, "a").unwrap();
    params.set(2, 1_i32).unwrap();
    params.set(3, 2_i32).unwrap();
    params.set(4, 3_i32).unwrap();
    let text = query.yql_text(&params.to_params().unwrap());
    assert_eq!(
        text,
        "DECLARE $jp1 AS Text;\n\
         DECLARE $jp2 AS List<Int64>;\n\
         DECLARE $jp3 AS Uint64;\n\
         SELECT $jp1; SELECT * FROM t WHERE id IN  $jp2 LIMIT $jp3"
    );

    let options = ParserOptions::new().with_declare_jdbc_parameters(false);
    let plain = parse_with("SELECT ?", options);
    let mut params = new_params(&plain);
    params.set(1, "a").unwrap();
    assert_eq!(plain.yql_text(&params.to_params().unwrap()), "SELECT $jp1");
}
