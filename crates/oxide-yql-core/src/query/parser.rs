//! Single-pass statement classifier and placeholder rewriter.

use tracing::{debug, trace};

use super::batcher::{BatchCommand, BatchEvent, YqlBatcher};
use super::list::{parse_in_list, parse_table_list};
use super::{ParamNamer, QueryCommand, QueryStatement, QueryType, YqlQuery};
use crate::error::{QueryError, Result};
use crate::lexer::Keyword;
use crate::lexer::scanner::{
    identifier_end, is_block_comment, is_identifier_start, is_line_comment, skip_backticks,
    skip_block_comment, skip_double_quotes, skip_line_comment, skip_single_quotes,
    skip_whitespace_and_comments,
};
use crate::options::ParserOptions;
use crate::params::{ParamFactory, YqlType};

/// The statement currently being scanned.
struct OpenStatement {
    statement: QueryStatement,
    /// Whether `?` placeholders of this statement are rewritten.
    rewrite_params: bool,
    /// Position of a `?` right after OFFSET or LIMIT.
    uint64_param_at: Option<usize>,
}

/// Classifies a query text and rewrites its placeholders.
///
/// A parser holds the scratch state of one parse and is consumed by
/// [`QueryParser::parse`]. Parsing is a single left-to-right pass over the
/// bytes: literals and comments are skipped whole, identifiers are matched
/// against keywords, and everything outside rewritten regions is copied to
/// the output unchanged.
pub struct QueryParser<'a> {
    sql: &'a str,
    bytes: &'a [u8],
    options: ParserOptions,
    namer: ParamNamer,
    batcher: YqlBatcher,
    output: String,
    /// Start of the source region not yet copied to `output`.
    fragment_start: usize,
    paren_level: usize,
    current: Option<OpenStatement>,
    /// Forced type and start offset of a stripped SCAN/EXPLAIN/BULK prefix.
    pending_mode: Option<(QueryType, usize)>,
    statements: Vec<QueryStatement>,
}

impl<'a> QueryParser<'a> {
    /// Creates a parser for `sql`.
    #[must_use]
    pub fn new(sql: &'a str, options: ParserOptions) -> Self {
        let mut batcher = YqlBatcher::new();
        if !options.detect_query_type {
            batcher.invalidate();
        }
        Self {
            sql,
            bytes: sql.as_bytes(),
            options,
            namer: ParamNamer::new(sql),
            batcher,
            output: String::with_capacity(sql.len()),
            fragment_start: 0,
            paren_level: 0,
            current: None,
            pending_mode: None,
            statements: Vec::new(),
        }
    }

    /// Runs the parse.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MixedQueryTypes`] if two statements resolve to
    /// different execution modes.
    pub fn parse(mut self) -> Result<YqlQuery> {
        let len = self.bytes.len();
        let mut pos = 0;
        while pos < len {
            let b = self.bytes[pos];
            if !self.options.detect_query_type && self.current.is_none() {
                self.open_untyped(pos);
            }
            pos = match b {
                b'\'' => {
                    self.batcher.read(BatchEvent::Other);
                    skip_single_quotes(self.bytes, pos) + 1
                }
                b'"' => {
                    self.batcher.read(BatchEvent::Other);
                    skip_double_quotes(self.bytes, pos) + 1
                }
                b'`' => self.on_backticks(pos),
                b'-' if is_line_comment(self.bytes, pos) => skip_line_comment(self.bytes, pos) + 1,
                b'/' if is_block_comment(self.bytes, pos) => {
                    skip_block_comment(self.bytes, pos) + 1
                }
                b'?' => self.on_placeholder(pos),
                b'(' => {
                    self.paren_level += 1;
                    self.batcher.read(BatchEvent::OpenParen);
                    pos + 1
                }
                b')' => {
                    self.paren_level = self.paren_level.saturating_sub(1);
                    self.batcher.read(BatchEvent::CloseParen);
                    pos + 1
                }
                b',' => {
                    self.batcher.read(BatchEvent::Comma);
                    pos + 1
                }
                b'=' => {
                    self.batcher.read(BatchEvent::Equal);
                    pos + 1
                }
                b'.' => {
                    self.batcher.read(BatchEvent::Dot);
                    pos + 1
                }
                b';' => {
                    self.batcher.read(BatchEvent::Semicolon);
                    if self.paren_level == 0 {
                        self.close_statement(pos + 1);
                    }
                    pos + 1
                }
                b if is_identifier_start(b) => {
                    let end = identifier_end(self.bytes, pos);
                    self.on_identifier(pos, end)
                }
                b if b.is_ascii_whitespace() => pos + 1,
                _ => {
                    self.batcher.read(BatchEvent::Other);
                    pos + 1
                }
            };
        }
        self.finish()
    }

    /// Copies the pending source region up to `end` into the output.
    fn flush(&mut self, end: usize) {
        if end > self.fragment_start {
            self.output.push_str(&self.sql[self.fragment_start..end]);
        }
        self.fragment_start = self.fragment_start.max(end);
    }

    fn on_backticks(&mut self, start: usize) -> usize {
        let close = skip_backticks(self.bytes, start);
        if self.current.is_some() {
            let inner = if close > start && self.bytes[close] == b'`' {
                &self.sql[start + 1..close]
            } else {
                &self.sql[start + 1..]
            };
            self.batcher.read(BatchEvent::Quoted(inner));
        } else {
            self.batcher.read(BatchEvent::Other);
        }
        close + 1
    }

    fn on_placeholder(&mut self, pos: usize) -> usize {
        let Some(open) = self.current.as_mut().filter(|open| open.rewrite_params) else {
            self.batcher.read(BatchEvent::Other);
            return pos + 1;
        };
        let typed = open.uint64_param_at == Some(pos);

        if self.bytes.get(pos + 1) == Some(&b'?') {
            self.flush(pos);
            self.output.push('?');
            self.fragment_start = pos + 2;
            self.batcher.read(BatchEvent::Other);
            return pos + 2;
        }

        let name = self.namer.next_name();
        let factory = if typed {
            ParamFactory::typed(name.as_str(), YqlType::Uint64)
        } else {
            ParamFactory::simple(name.as_str())
        };
        open.statement.add_param(factory);
        self.flush(pos);
        self.output.push_str(&name);
        self.fragment_start = pos + 1;
        self.batcher.read(BatchEvent::Parameter(&name));
        trace!(name = %name, offset = pos, typed, "Rewrote placeholder");
        pos + 1
    }

    fn on_identifier(&mut self, start: usize, end: usize) -> usize {
        let (sql, bytes) = (self.sql, self.bytes);
        let word = &bytes[start..end];
        let Some(open) = self.current.as_mut() else {
            self.open_statement(start, end);
            return end;
        };

        self.batcher.read(BatchEvent::Word(&sql[start..end]));
        if self.paren_level == 0 && Keyword::Returning.matches(word) {
            open.statement.set_returning();
        }
        if !(open.rewrite_params && self.options.detect_query_type) {
            return end;
        }

        if Keyword::Offset.matches(word) || Keyword::Limit.matches(word) {
            let next = skip_whitespace_and_comments(bytes, end);
            if bytes.get(next) == Some(&b'?') && bytes.get(next + 1) != Some(&b'?') {
                open.uint64_param_at = Some(next);
            }
            end
        } else if self.options.replace_in_by_list && Keyword::In.matches(word) {
            self.rewrite_in_list(end)
        } else if Keyword::JdbcTable.matches(word) {
            self.rewrite_table_list(start, end)
        } else {
            end
        }
    }

    fn rewrite_in_list(&mut self, end: usize) -> usize {
        let Some(region) = parse_in_list(self.bytes, end) else {
            trace!(offset = end, "IN list left as separate placeholders");
            return end;
        };
        let name = self.namer.next_name();
        self.flush(region.open);
        self.output.push(' ');
        self.output.push_str(&name);
        self.fragment_start = region.end;
        debug!(
            name = %name,
            list_size = region.list_size,
            tuple_size = region.tuple_size,
            "Rewrote IN list"
        );
        self.push_list_param(ParamFactory::InList {
            name,
            list_size: region.list_size,
            tuple_size: region.tuple_size,
        });
        region.end
    }

    fn rewrite_table_list(&mut self, start: usize, end: usize) -> usize {
        let Some(region) = parse_table_list(self.bytes, end) else {
            trace!(offset = start, "JDBC_TABLE arguments left as separate placeholders");
            return end;
        };
        let name = self.namer.next_name();
        self.flush(start);
        self.output.push_str("AS_TABLE(");
        self.output.push_str(&name);
        self.output.push(')');
        self.fragment_start = region.end;
        debug!(name = %name, list_size = region.list_size, "Rewrote JDBC_TABLE");
        self.push_list_param(ParamFactory::TableList {
            name,
            list_size: region.list_size,
        });
        region.end
    }

    fn push_list_param(&mut self, factory: ParamFactory) {
        // A collapsed list never fits a bulk shape.
        self.batcher.invalidate();
        if let Some(open) = self.current.as_mut() {
            open.statement.add_param(factory);
        }
    }

    /// Opens a statement (or strips a mode prefix) at the first word.
    fn open_statement(&mut self, start: usize, end: usize) {
        let (sql, bytes) = (self.sql, self.bytes);
        let word = &bytes[start..end];

        if let Some(prefix) = Keyword::find(word, &Keyword::MODE_PREFIXES) {
            let forced = match prefix {
                Keyword::Scan => QueryType::Scan,
                Keyword::Explain => QueryType::Explain,
                _ => QueryType::Bulk,
            };
            self.flush(start);
            self.fragment_start = end;
            let prefix_start = self.pending_mode.map_or(start, |(_, at)| at);
            self.pending_mode = Some((forced, prefix_start));
            debug!(prefix = %prefix, offset = start, "Stripped mode prefix");
            return;
        }

        let detect = self.options.detect_jdbc_parameters;
        let forced_params = detect && self.options.force_jdbc_parameters;
        let keyword = Keyword::find(word, &Keyword::COMMANDS);
        let (query_type, command, rewrite_params) = match keyword {
            Some(
                Keyword::Alter | Keyword::Create | Keyword::Drop | Keyword::Grant | Keyword::Revoke,
            ) => (QueryType::Scheme, QueryCommand::Ddl, forced_params),
            Some(Keyword::Select) => (QueryType::Data, QueryCommand::Select, detect),
            Some(Keyword::Declare) => (QueryType::Declare, QueryCommand::Unknown, forced_params),
            Some(_) => (QueryType::Data, QueryCommand::Dml, detect),
            None => (QueryType::Unknown, QueryCommand::Unknown, forced_params),
        };

        let (forced, statement_start) = match self.pending_mode.take() {
            Some((forced, at)) => (Some(forced), at),
            None => (None, start),
        };
        let mut statement = QueryStatement::new(query_type, command, statement_start);
        if let Some(forced) = forced {
            statement.force_type(forced);
        }

        match keyword.and_then(BatchCommand::from_keyword) {
            Some(cmd) => self.batcher.read(BatchEvent::Command(cmd)),
            None => self.batcher.read(BatchEvent::Word(&sql[start..end])),
        }

        debug!(
            query_type = %statement.query_type(),
            command = %command,
            offset = statement_start,
            rewrite_params,
            "Opened statement"
        );
        self.current = Some(OpenStatement {
            statement,
            rewrite_params,
            uint64_param_at: None,
        });
    }

    /// Opens a DATA statement without looking at keywords.
    fn open_untyped(&mut self, start: usize) {
        let b = self.bytes[start];
        if b.is_ascii_whitespace()
            || b == b';'
            || is_line_comment(self.bytes, start)
            || is_block_comment(self.bytes, start)
        {
            return;
        }
        self.current = Some(OpenStatement {
            statement: QueryStatement::new(QueryType::Data, QueryCommand::Unknown, start),
            rewrite_params: self.options.detect_jdbc_parameters,
            uint64_param_at: None,
        });
    }

    fn close_statement(&mut self, end: usize) {
        if let Some(mut open) = self.current.take() {
            open.statement.extend_to(end);
            self.statements.push(open.statement);
        }
        self.pending_mode = None;
    }

    fn finish(mut self) -> Result<YqlQuery> {
        let len = self.bytes.len();
        self.flush(len);
        self.close_statement(len);

        let query_type = resolve_query_type(&self.statements)?;
        let batch = self.batcher.into_pattern();
        if let Some(pattern) = &batch {
            debug!(
                command = pattern.command().as_str(),
                table = pattern.table(),
                columns = pattern.columns().len(),
                keys = pattern.key_columns().len(),
                "Detected batch shape"
            );
        }
        Ok(YqlQuery::from_parts(
            self.sql.to_string(),
            self.output,
            query_type,
            self.statements,
            batch,
            self.options,
        ))
    }
}

/// Checks that statements agree on their execution mode and returns it.
///
/// Statements with a forced type are exempt from the check, and so are
/// DECLARE and unrecognized ones. The first forced type wins, then the first
/// checked type, then DATA.
fn resolve_query_type(statements: &[QueryStatement]) -> Result<QueryType> {
    let mut checked: Option<QueryType> = None;
    for statement in statements {
        let query_type = statement.query_type();
        if statement.is_forced() || !query_type.is_classified() {
            continue;
        }
        match checked {
            None => checked = Some(query_type),
            Some(first) if first != query_type => {
                debug!(%first, second = %query_type, "Mixed query types");
                return Err(QueryError::MixedQueryTypes {
                    first,
                    second: query_type,
                });
            }
            Some(_) => {}
        }
    }
    let forced = statements
        .iter()
        .find(|s| s.is_forced())
        .map(QueryStatement::query_type);
    Ok(forced.or(checked).unwrap_or(QueryType::Data))
}
