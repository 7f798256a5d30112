#![allow(dead_code)]

use std::sync::Arc;

use oxide_yql_core::{
    BatchPattern, DefaultTypeLookup, ParserOptions, QueryError, QueryParams, YqlQuery,
};
use regex::Regex;

pub fn parse(sql: &str) -> YqlQuery {
    parse_with(sql, ParserOptions::default())
}

pub fn parse_with(sql: &str, options: ParserOptions) -> YqlQuery {
    YqlQuery::parse(sql, options).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> QueryError {
    YqlQuery::parse(sql, ParserOptions::default())
        .expect_err(&format!("Expected parse error for: {sql}"))
}

/// Returns the rewritten text of `sql` with default options.
pub fn rewrite(sql: &str) -> String {
    parse(sql).yql().to_string()
}

/// Returns the generated parameter names occurring in `yql`.
pub fn generated_names(yql: &str) -> Vec<String> {
    let re = Regex::new(r"\$jp\d+").unwrap();
    re.find_iter(yql).map(|m| m.as_str().to_string()).collect()
}

pub fn new_params(query: &YqlQuery) -> QueryParams {
    query.new_params(Arc::new(DefaultTypeLookup::new()))
}

pub fn batch_of(sql: &str) -> BatchPattern {
    parse(sql)
        .batch()
        .cloned()
        .unwrap_or_else(|| panic!("Expected a batch shape for: {sql}"))
}

pub fn assert_not_batchable(sql: &str) {
    let query = parse(sql);
    assert!(
        query.batch().is_none(),
        "Expected no batch shape for: {sql}, got {:?}",
        query.batch()
    );
}
