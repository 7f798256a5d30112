//! Per-statement classification result.

use serde::Serialize;

use super::{QueryCommand, QueryType};
use crate::lexer::Span;
use crate::params::ParamFactory;

/// One semicolon-delimited statement of a parsed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryStatement {
    query_type: QueryType,
    command: QueryCommand,
    params: Vec<ParamFactory>,
    has_returning: bool,
    /// True if the type came from a SCAN/EXPLAIN/BULK prefix.
    forced: bool,
    span: Span,
}

impl QueryStatement {
    /// Creates a statement starting at `start`.
    #[must_use]
    pub const fn new(query_type: QueryType, command: QueryCommand, start: usize) -> Self {
        Self {
            query_type,
            command,
            params: Vec::new(),
            has_returning: false,
            forced: false,
            span: Span::new(start, start),
        }
    }

    /// Returns the execution mode.
    #[must_use]
    pub const fn query_type(&self) -> QueryType {
        self.query_type
    }

    /// Returns the command kind.
    #[must_use]
    pub const fn command(&self) -> QueryCommand {
        self.command
    }

    /// Returns the generated parameters, in source order.
    #[must_use]
    pub fn params(&self) -> &[ParamFactory] {
        &self.params
    }

    /// Returns true if a top-level RETURNING clause was seen.
    #[must_use]
    pub const fn has_returning(&self) -> bool {
        self.has_returning
    }

    /// Returns true if the type was forced by a mode prefix.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.forced
    }

    /// Returns the location of the statement in the source text.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns true if executing the statement yields rows.
    #[must_use]
    pub const fn has_result_set(&self) -> bool {
        matches!(self.command, QueryCommand::Select) || self.has_returning
    }

    /// Returns true if executing the statement yields an update count.
    #[must_use]
    pub const fn has_update_count(&self) -> bool {
        matches!(self.command, QueryCommand::Dml | QueryCommand::Batch) && !self.has_returning
    }

    /// Returns the number of positional placeholders the statement replaced.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.params.iter().map(ParamFactory::slots).sum()
    }

    pub(crate) fn force_type(&mut self, query_type: QueryType) {
        self.query_type = query_type;
        self.forced = true;
    }

    pub(crate) fn add_param(&mut self, param: ParamFactory) {
        self.params.push(param);
    }

    pub(crate) fn set_returning(&mut self) {
        self.has_returning = true;
    }

    pub(crate) fn extend_to(&mut self, end: usize) {
        self.span.end = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_predicates() {
        let select = QueryStatement::new(QueryType::Data, QueryCommand::Select, 0);
        assert!(select.has_result_set());
        assert!(!select.has_update_count());

        let mut insert = QueryStatement::new(QueryType::Data, QueryCommand::Dml, 0);
        assert!(!insert.has_result_set());
        assert!(insert.has_update_count());
        insert.set_returning();
        assert!(insert.has_result_set());
        assert!(!insert.has_update_count());

        let ddl = QueryStatement::new(QueryType::Scheme, QueryCommand::Ddl, 0);
        assert!(!ddl.has_result_set());
        assert!(!ddl.has_update_count());
    }

    #[test]
    fn test_slot_count() {
        let mut st = QueryStatement::new(QueryType::Data, QueryCommand::Select, 0);
        st.add_param(ParamFactory::simple("$jp1"));
        st.add_param(ParamFactory::InList {
            name: String::from("$jp2"),
            list_size: 3,
            tuple_size: 2,
        });
        assert_eq!(st.slot_count(), 7);
    }

    #[test]
    fn test_forced_type() {
        let mut st = QueryStatement::new(QueryType::Data, QueryCommand::Select, 5);
        st.force_type(QueryType::Scan);
        assert_eq!(st.query_type(), QueryType::Scan);
        assert!(st.is_forced());
        st.extend_to(9);
        assert_eq!(st.span(), Span::new(5, 9));
    }
}
