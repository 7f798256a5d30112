//! The result of parsing a query.

use std::sync::Arc;

use serde::Serialize;

use super::{BatchPattern, QueryParser, QueryStatement, QueryType};
use crate::error::{QueryError, Result};
use crate::options::ParserOptions;
use crate::params::{BatchedQuery, ParamFactory, Params, QueryParams, TypeLookup};

/// A parsed and rewritten query.
///
/// Parsing is deterministic, so callers may cache a `YqlQuery` per query
/// text and create fresh [`QueryParams`] for every execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YqlQuery {
    original: String,
    yql: String,
    query_type: QueryType,
    statements: Vec<QueryStatement>,
    batch: Option<BatchPattern>,
    #[serde(skip)]
    options: ParserOptions,
}

impl YqlQuery {
    /// Parses `sql` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MixedQueryTypes`] if the statements of `sql`
    /// need different execution modes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxide_yql_core::{ParserOptions, QueryType, YqlQuery};
    ///
    /// let query = YqlQuery::parse("SELECT * FROM t WHERE id = ?", ParserOptions::default())?;
    /// assert_eq!(query.yql(), "SELECT * FROM t WHERE id = $jp1");
    /// assert_eq!(query.query_type(), QueryType::Data);
    /// # Ok::<(), oxide_yql_core::QueryError>(())
    /// ```
    pub fn parse(sql: &str, options: ParserOptions) -> Result<Self> {
        QueryParser::new(sql, options).parse()
    }

    pub(crate) const fn from_parts(
        original: String,
        yql: String,
        query_type: QueryType,
        statements: Vec<QueryStatement>,
        batch: Option<BatchPattern>,
        options: ParserOptions,
    ) -> Self {
        Self {
            original,
            yql,
            query_type,
            statements,
            batch,
            options,
        }
    }

    /// Returns the text the query was parsed from.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns the rewritten text, without parameter declarations.
    #[must_use]
    pub fn yql(&self) -> &str {
        &self.yql
    }

    /// Returns the execution mode of the whole query.
    #[must_use]
    pub const fn query_type(&self) -> QueryType {
        self.query_type
    }

    /// Returns the statements in source order.
    #[must_use]
    pub fn statements(&self) -> &[QueryStatement] {
        &self.statements
    }

    /// Returns the bulk shape if the query is a single batchable statement.
    #[must_use]
    pub const fn batch(&self) -> Option<&BatchPattern> {
        self.batch.as_ref()
    }

    /// Returns the options the query was parsed with.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Iterates over the generated parameters of all statements.
    pub fn params(&self) -> impl Iterator<Item = &ParamFactory> {
        self.statements.iter().flat_map(|s| s.params().iter())
    }

    /// Returns the number of positional placeholders the caller binds.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.statements.iter().map(QueryStatement::slot_count).sum()
    }

    /// Creates an empty value container for one execution.
    #[must_use]
    pub fn new_params(&self, lookup: Arc<dyn TypeLookup>) -> QueryParams {
        QueryParams::new(self.params(), lookup)
    }

    /// Returns the text to execute with `params`.
    ///
    /// When parameter declarations are enabled, every generated parameter
    /// present in `params` is declared first, one `DECLARE` per line.
    #[must_use]
    pub fn yql_text(&self, params: &Params) -> String {
        if !self.options.declare_jdbc_parameters {
            return self.yql.clone();
        }
        let mut text: String = self
            .params()
            .filter_map(|factory| {
                let value = params.get(factory.name())?;
                Some(format!("DECLARE {} AS {};\n", factory.name(), value.yql_type()))
            })
            .collect();
        text.push_str(&self.yql);
        text
    }

    /// Creates an empty bulk batch for this query.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotBatchable`] if the query has no bulk shape.
    pub fn batched(&self) -> Result<BatchedQuery> {
        self.batch
            .clone()
            .map(BatchedQuery::new)
            .ok_or(QueryError::NotBatchable)
    }
}
