//! Tests for `?` placeholder rewriting: naming, escaping, collision
//! avoidance, OFFSET/LIMIT typing and the parameter toggles.

mod common;
use common::*;

use oxide_yql_core::{ParamFactory, ParserOptions, YqlType};

#[test]
fn test_placeholders_get_sequential_names() {
    let query = parse("SELECT * FROM t WHERE a = ? AND b > ?");
    assert_eq!(query.yql(), "SELECT * FROM t WHERE a = $jp1 AND b > $jp2");
    let names: Vec<&str> = query.params().map(ParamFactory::name).collect();
    assert_eq!(names, vec!["$jp1", "$jp2"]);
}

#[test]
fn test_names_continue_across_statements() {
    let query = parse("SELECT ?; SELECT ?, ?");
    assert_eq!(query.yql(), "SELECT $jp1; SELECT $jp2, $jp3");
    assert_eq!(query.statements()[0].params().len(), 1);
    assert_eq!(query.statements()[1].params().len(), 2);
}

#[test]
fn test_doubled_placeholder_is_a_literal() {
    assert_eq!(rewrite("SELECT a ?? b"), "SELECT a ? b");
    assert_eq!(rewrite("SELECT ???"), "SELECT ?$jp1");
    assert_eq!(rewrite("SELECT ????"), "SELECT ??");

    let query = parse("SELECT j ?? 'k', ? FROM t");
    assert_eq!(query.yql(), "SELECT j ? 'k', $jp1 FROM t");
    assert_eq!(query.slot_count(), 1);
}

#[test]
fn test_placeholders_inside_quotes_are_kept() {
    assert_eq!(
        rewrite("SELECT '?', \"?\", `?`, ? FROM t"),
        "SELECT '?', \"?\", `?`, $jp1 FROM t"
    );
    assert_eq!(rewrite("SELECT 'it\\'s ?', ?"), "SELECT 'it\\'s ?', $jp1");
    assert_eq!(rewrite("SELECT 'open ?"), "SELECT 'open ?");
}

#[test]
fn test_placeholders_inside_comments_are_kept() {
    assert_eq!(
        rewrite("SELECT ? -- why ?\r? /* ? */"),
        "SELECT $jp1 -- why ?\r$jp2 /* ? */"
    );
}

#[test]
fn test_generated_names_never_collide_with_source() {
    let sql = "SELECT $jp1, '$jp3' FROM t WHERE a = ? AND b = ? -- $jp4";
    let query = parse(sql);
    assert_eq!(
        query.yql(),
        "SELECT $jp1, '$jp3' FROM t WHERE a = $jp2 AND b = $jp5 -- $jp4"
    );
    for name in query.params().map(ParamFactory::name) {
        assert!(!sql.contains(name), "{name} occurs in the source");
    }
}

#[test]
fn test_generated_name_count_matches_factories() {
    for sql in [
        "SELECT ?",
        "SELECT * FROM t WHERE a IN (?, ?) AND b = ? LIMIT ? OFFSET ?",
        "SELECT * FROM t WHERE (a, b) IN ((?, ?), (?, ?)); SELECT ?",
        "SELECT * FROM jdbc_table(?, ?, ?) WHERE c = ??",
        "UPSERT INTO t (a, b) VALUES (?, ?)",
        "SELECT 1",
    ] {
        let query = parse(sql);
        let names = generated_names(query.yql());
        assert_eq!(names.len(), query.params().count(), "{sql}");
        let slots: usize = query.params().map(ParamFactory::slots).sum();
        assert_eq!(slots, query.slot_count(), "{sql}");
        assert_eq!(slots, new_params(&query).len(), "{sql}");
    }
}

#[test]
fn test_limit_and_offset_are_unsigned() {
    let query = parse("SELECT * FROM t WHERE a = ? ORDER BY a LIMIT ? OFFSET\n-- skip\n?");
    let params = query.statements()[0].params();
    assert_eq!(params[0], ParamFactory::simple("$jp1"));
    assert_eq!(params[1], ParamFactory::typed("$jp2", YqlType::Uint64));
    assert_eq!(params[2], ParamFactory::typed("$jp3", YqlType::Uint64));
}

#[test]
fn test_limit_followed_by_doubled_placeholder() {
    let query = parse("SELECT * FROM t LIMIT ?? + ?");
    assert_eq!(query.yql(), "SELECT * FROM t LIMIT ? + $jp1");
    assert_eq!(query.statements()[0].params()[0], ParamFactory::simple("$jp1"));
}

#[test]
fn test_ddl_and_unknown_need_force() {
    let sql = "CREATE TABLE t (a Int32 DEFAULT ?); PRAGMA x = ?";
    let options = ParserOptions::new();
    let query = parse_with("CREATE TABLE t (a Int32 DEFAULT ?)", options);
    assert_eq!(query.yql(), "CREATE TABLE t (a Int32 DEFAULT ?)");
    assert_eq!(query.slot_count(), 0);

    let forced = parse_with(sql, options.with_force_jdbc_parameters(true));
    assert_eq!(
        forced.yql(),
        "CREATE TABLE t (a Int32 DEFAULT $jp1); PRAGMA x = $jp2"
    );
}

#[test]
fn test_declare_needs_force() {
    let sql = "DECLARE $a AS Int32; SELECT ? + $a";
    assert_eq!(rewrite(sql), "DECLARE $a AS Int32; SELECT $jp1 + $a");

    let options = ParserOptions::new().with_force_jdbc_parameters(true);
    let query = parse_with("DECLARE $a AS ?", options);
    assert_eq!(query.yql(), "DECLARE $a AS $jp1");
}

#[test]
fn test_parameter_detection_off() {
    let options = ParserOptions::new()
        .with_detect_jdbc_parameters(false)
        .with_force_jdbc_parameters(true);
    let sql = "SELECT * FROM t WHERE a IN (?, ?) AND b = ?? LIMIT ?";
    let query = parse_with(sql, options);
    assert_eq!(query.yql(), sql);
    assert_eq!(query.slot_count(), 0);
}

#[test]
fn test_query_type_detection_off_still_rewrites() {
    let options = ParserOptions::new().with_detect_query_type(false);
    let query = parse_with("CREATE TABLE t (a Int32 DEFAULT ?) LIMIT ?", options);
    assert_eq!(query.yql(), "CREATE TABLE t (a Int32 DEFAULT $jp1) LIMIT $jp2");
    assert_eq!(query.statements()[0].params()[1], ParamFactory::simple("$jp2"));
}

#[test]
fn test_many_placeholders_with_taken_names() {
    let mut sql = String::from("SELECT $jp12 AS x");
    for _ in 0..20_000 {
        sql.push_str(", a + ?");
    }
    let query = parse(&sql);
    let names = generated_names(query.yql());
    assert_eq!(names.len(), 20_001);
    assert_eq!(names[0], "$jp12");
    assert_eq!(names[1], "$jp2");
    assert!(!names[1..].iter().any(|n| n == "$jp1" || n == "$jp12"));
    assert_eq!(names[20_000], "$jp20002");
}
