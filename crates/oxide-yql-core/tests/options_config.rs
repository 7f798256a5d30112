//! Tests for loading parser options from configuration.

use oxide_yql_core::ParserOptions;

#[test]
fn test_defaults() {
    let options = ParserOptions::default();
    assert!(options.detect_query_type);
    assert!(options.detect_jdbc_parameters);
    assert!(!options.force_jdbc_parameters);
    assert!(options.declare_jdbc_parameters);
    assert!(options.replace_in_by_list);
}

#[test]
fn test_kebab_case_keys() {
    let options: ParserOptions = serde_json::from_str(
        r#"{"force-jdbc-parameters": true, "replace-in-by-list": false}"#,
    )
    .unwrap();
    assert_eq!(
        options,
        ParserOptions::new()
            .with_force_jdbc_parameters(true)
            .with_replace_in_by_list(false)
    );
}

#[test]
fn test_empty_object_gives_defaults() {
    let options: ParserOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, ParserOptions::default());
}

#[test]
fn test_serializes_with_kebab_case() {
    let json = serde_json::to_value(ParserOptions::default()).unwrap();
    assert_eq!(json["detect-query-type"], true);
    assert_eq!(json["declare-jdbc-parameters"], true);
    assert_eq!(json["force-jdbc-parameters"], false);
}
