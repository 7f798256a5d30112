//! Detection of simple DML shapes that can run as one bulk statement.
//!
//! The recognizer is fed structural events while the classifier scans the
//! text. It accepts exactly:
//!
//! - `INSERT|UPSERT|REPLACE INTO t (c1, c2, ...) VALUES (?, ?, ...)`
//! - `UPDATE t SET c1 = ?, ... WHERE k1 = ? AND ...`
//! - `DELETE FROM t WHERE k1 = ? AND ...`
//!
//! optionally followed by one `;`. Any other event moves it to a terminal
//! error state.

use serde::Serialize;

use crate::lexer::Keyword;

/// Command of a batchable statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchCommand {
    Insert,
    Upsert,
    Replace,
    Update,
    Delete,
}

impl BatchCommand {
    /// Returns the SQL keyword of the command.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Upsert => "UPSERT",
            Self::Replace => "REPLACE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Maps a statement keyword to a command.
    #[must_use]
    pub const fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Insert => Some(Self::Insert),
            Keyword::Upsert => Some(Self::Upsert),
            Keyword::Replace => Some(Self::Replace),
            Keyword::Update => Some(Self::Update),
            Keyword::Delete => Some(Self::Delete),
            _ => None,
        }
    }

    const fn is_insert_like(self) -> bool {
        matches!(self, Self::Insert | Self::Upsert | Self::Replace)
    }
}

/// A lexical event forwarded by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEvent<'a> {
    Command(BatchCommand),
    /// A bare identifier or keyword.
    Word(&'a str),
    /// A backtick-quoted identifier, already unquoted.
    Quoted(&'a str),
    /// A rewritten `?`, carrying its generated name.
    Parameter(&'a str),
    OpenParen,
    CloseParen,
    Comma,
    Equal,
    Dot,
    Semicolon,
    /// Anything else: literals, numbers, operators, unrewritten `?`.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Cmd,
    Into,
    From,
    TableName,
    TableDot,
    Set,
    ColumnsOpenParen,
    ColumnsName,
    ColumnsComma,
    ColumnsCloseParen,
    ColumnsEqual,
    ColumnsValue,
    Values,
    ValuesOpenParen,
    ValuesValue,
    ValuesComma,
    ValuesCloseParen,
    Where,
    WhereTable,
    WhereDot,
    WhereColumn,
    WhereEqual,
    WhereValue,
    WhereAnd,
    Semicolon,
    Error,
}

/// Side effect attached to a transition.
enum Action<'a> {
    None,
    Command(BatchCommand),
    Table(&'a str),
    QualifyTable(&'a str),
    Column(&'a str),
    Value(&'a str),
    KeyColumn(&'a str),
    TableAsKeyColumn,
    KeyValue(&'a str),
}

/// A recognized bulk-eligible statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchPattern {
    command: Option<BatchCommand>,
    table: String,
    columns: Vec<String>,
    values: Vec<String>,
    key_columns: Vec<String>,
    key_values: Vec<String>,
}

impl BatchPattern {
    /// Returns the command.
    #[must_use]
    pub fn command(&self) -> BatchCommand {
        self.command.unwrap_or(BatchCommand::Insert)
    }

    /// Returns the table name, unquoted.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the written (or SET) columns.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the parameter names bound to [`BatchPattern::columns`].
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the WHERE key columns of UPDATE and DELETE.
    #[must_use]
    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    /// Returns the parameter names bound to [`BatchPattern::key_columns`].
    #[must_use]
    pub fn key_values(&self) -> &[String] {
        &self.key_values
    }

    /// Iterates over `(column, parameter)` pairs, data columns first.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .zip(&self.values)
            .chain(self.key_columns.iter().zip(&self.key_values))
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

/// Incremental recognizer of [`BatchPattern`]s.
#[derive(Debug, Clone)]
pub struct YqlBatcher {
    state: State,
    pattern: BatchPattern,
}

impl Default for YqlBatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl YqlBatcher {
    /// Creates a recognizer in its initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Init,
            pattern: BatchPattern::default(),
        }
    }

    /// Feeds one event.
    pub fn read(&mut self, event: BatchEvent<'_>) {
        if self.state == State::Error {
            return;
        }
        let (next, action) = self.transition(event);
        self.state = next;
        let pattern = &mut self.pattern;
        match action {
            Action::None => {}
            Action::Command(command) => pattern.command = Some(command),
            Action::Table(name) => pattern.table = name.to_string(),
            Action::QualifyTable(name) => {
                pattern.table.push('.');
                pattern.table.push_str(name);
            }
            Action::Column(name) => pattern.columns.push(name.to_string()),
            Action::Value(name) => pattern.values.push(name.to_string()),
            Action::KeyColumn(name) => pattern.key_columns.push(name.to_string()),
            Action::TableAsKeyColumn => pattern.key_columns.push(pattern.table.clone()),
            Action::KeyValue(name) => pattern.key_values.push(name.to_string()),
        }
    }

    /// Marks the statement as not batchable.
    pub fn invalidate(&mut self) {
        self.state = State::Error;
    }

    fn transition<'a>(&self, event: BatchEvent<'a>) -> (State, Action<'a>) {
        use BatchEvent as E;

        let command = self.pattern.command;
        let insert_like = command.is_some_and(BatchCommand::is_insert_like);
        let is = |cmd: BatchCommand| command == Some(cmd);
        let word = |kw: Keyword| matches!(event, E::Word(w) if kw.matches(w.as_bytes()));
        let name = match event {
            E::Word(n) | E::Quoted(n) => Some(n),
            _ => None,
        };

        match (self.state, event) {
            (State::Init, E::Command(cmd)) => (State::Cmd, Action::Command(cmd)),
            (State::Cmd, _) if insert_like && word(Keyword::Into) => (State::Into, Action::None),
            (State::Cmd, _) if is(BatchCommand::Delete) && word(Keyword::From) => {
                (State::From, Action::None)
            }
            (State::Cmd, _) if is(BatchCommand::Update) => match name {
                Some(n) => (State::TableName, Action::Table(n)),
                None => (State::Error, Action::None),
            },
            (State::Into | State::From, _) => match name {
                Some(n) => (State::TableName, Action::Table(n)),
                None => (State::Error, Action::None),
            },
            (State::TableName, E::Dot) => (State::TableDot, Action::None),
            (State::TableDot, _) => match name {
                Some(n) => (State::TableName, Action::QualifyTable(n)),
                None => (State::Error, Action::None),
            },
            (State::TableName, E::OpenParen) if insert_like => {
                (State::ColumnsOpenParen, Action::None)
            }
            (State::TableName, _) if is(BatchCommand::Update) && word(Keyword::Set) => {
                (State::Set, Action::None)
            }
            (State::TableName, _) if is(BatchCommand::Delete) && word(Keyword::Where) => {
                (State::Where, Action::None)
            }
            (State::ColumnsOpenParen | State::Set | State::ColumnsComma, _) => match name {
                Some(n) => (State::ColumnsName, Action::Column(n)),
                None => (State::Error, Action::None),
            },
            (State::ColumnsName, E::Comma) if insert_like => (State::ColumnsComma, Action::None),
            (State::ColumnsName, E::CloseParen) if insert_like => {
                (State::ColumnsCloseParen, Action::None)
            }
            (State::ColumnsName, E::Equal) if is(BatchCommand::Update) => {
                (State::ColumnsEqual, Action::None)
            }
            (State::ColumnsEqual, E::Parameter(p)) => (State::ColumnsValue, Action::Value(p)),
            (State::ColumnsValue, E::Comma) => (State::ColumnsComma, Action::None),
            (State::ColumnsValue, _) if word(Keyword::Where) => (State::Where, Action::None),
            (State::ColumnsCloseParen, _) if word(Keyword::Values) => (State::Values, Action::None),
            (State::Values, E::OpenParen) => (State::ValuesOpenParen, Action::None),
            (State::ValuesOpenParen | State::ValuesComma, E::Parameter(p)) => {
                (State::ValuesValue, Action::Value(p))
            }
            (State::ValuesValue, E::Comma) => (State::ValuesComma, Action::None),
            (State::ValuesValue, E::CloseParen) => (State::ValuesCloseParen, Action::None),
            (State::ValuesCloseParen | State::WhereValue, E::Semicolon) => {
                (State::Semicolon, Action::None)
            }
            (State::Where | State::WhereAnd, _) => match name {
                Some(n) if n == self.pattern.table => (State::WhereTable, Action::None),
                Some(n) => (State::WhereColumn, Action::KeyColumn(n)),
                None => (State::Error, Action::None),
            },
            (State::WhereTable, E::Dot) => (State::WhereDot, Action::None),
            (State::WhereTable, E::Equal) => (State::WhereEqual, Action::TableAsKeyColumn),
            (State::WhereDot, _) => match name {
                Some(n) => (State::WhereColumn, Action::KeyColumn(n)),
                None => (State::Error, Action::None),
            },
            (State::WhereColumn, E::Equal) => (State::WhereEqual, Action::None),
            (State::WhereEqual, E::Parameter(p)) => (State::WhereValue, Action::KeyValue(p)),
            (State::WhereValue, _) if word(Keyword::And) => (State::WhereAnd, Action::None),
            _ => (State::Error, Action::None),
        }
    }

    /// Returns true if the events seen so far form a complete batch shape.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let p = &self.pattern;
        let Some(command) = p.command else {
            return false;
        };
        if p.table.is_empty()
            || p.columns.len() != p.values.len()
            || p.key_columns.len() != p.key_values.len()
        {
            return false;
        }
        match command {
            BatchCommand::Insert | BatchCommand::Upsert | BatchCommand::Replace => {
                p.key_columns.is_empty()
                    && !p.columns.is_empty()
                    && matches!(self.state, State::ValuesCloseParen | State::Semicolon)
            }
            BatchCommand::Update => {
                !p.key_columns.is_empty()
                    && !p.columns.is_empty()
                    && matches!(self.state, State::WhereValue | State::Semicolon)
            }
            BatchCommand::Delete => {
                !p.key_columns.is_empty()
                    && p.columns.is_empty()
                    && matches!(self.state, State::WhereValue | State::Semicolon)
            }
        }
    }

    /// Returns the recognized pattern if it is valid.
    #[must_use]
    pub fn into_pattern(self) -> Option<BatchPattern> {
        if self.is_valid() {
            Some(self.pattern)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BatchEvent as E;

    fn feed(events: &[BatchEvent<'_>]) -> YqlBatcher {
        let mut batcher = YqlBatcher::new();
        for &event in events {
            batcher.read(event);
        }
        batcher
    }

    #[test]
    fn test_insert() {
        let batcher = feed(&[
            E::Command(BatchCommand::Insert),
            E::Word("into"),
            E::Word("t"),
            E::OpenParen,
            E::Word("c1"),
            E::Comma,
            E::Quoted("c 2"),
            E::CloseParen,
            E::Word("VALUES"),
            E::OpenParen,
            E::Parameter("$jp1"),
            E::Comma,
            E::Parameter("$jp2"),
            E::CloseParen,
        ]);
        let pattern = batcher.into_pattern().expect("valid insert");
        assert_eq!(pattern.command(), BatchCommand::Insert);
        assert_eq!(pattern.table(), "t");
        assert_eq!(pattern.columns(), ["c1", "c 2"]);
        assert_eq!(pattern.values(), ["$jp1", "$jp2"]);
        assert!(pattern.key_columns().is_empty());
    }

    #[test]
    fn test_insert_count_mismatch() {
        let batcher = feed(&[
            E::Command(BatchCommand::Upsert),
            E::Word("INTO"),
            E::Word("t"),
            E::OpenParen,
            E::Word("a"),
            E::Comma,
            E::Word("b"),
            E::CloseParen,
            E::Word("VALUES"),
            E::OpenParen,
            E::Parameter("$jp1"),
            E::CloseParen,
        ]);
        assert!(!batcher.is_valid());
    }

    #[test]
    fn test_insert_with_literal_is_error() {
        let batcher = feed(&[
            E::Command(BatchCommand::Insert),
            E::Word("INTO"),
            E::Word("t"),
            E::OpenParen,
            E::Word("a"),
            E::CloseParen,
            E::Word("VALUES"),
            E::OpenParen,
            E::Other,
            E::CloseParen,
        ]);
        assert!(!batcher.is_valid());
    }

    #[test]
    fn test_update_with_qualified_key() {
        let batcher = feed(&[
            E::Command(BatchCommand::Update),
            E::Word("t"),
            E::Word("SET"),
            E::Word("c1"),
            E::Equal,
            E::Parameter("$jp1"),
            E::Word("WHERE"),
            E::Word("t"),
            E::Dot,
            E::Word("k1"),
            E::Equal,
            E::Parameter("$jp2"),
            E::Semicolon,
        ]);
        let pattern = batcher.into_pattern().expect("valid update");
        assert_eq!(pattern.columns(), ["c1"]);
        assert_eq!(pattern.key_columns(), ["k1"]);
        assert_eq!(pattern.key_values(), ["$jp2"]);
    }

    #[test]
    fn test_where_table_name_as_column() {
        let batcher = feed(&[
            E::Command(BatchCommand::Delete),
            E::Word("FROM"),
            E::Word("id"),
            E::Word("WHERE"),
            E::Word("id"),
            E::Equal,
            E::Parameter("$jp1"),
            E::Word("and"),
            E::Word("v"),
            E::Equal,
            E::Parameter("$jp2"),
        ]);
        let pattern = batcher.into_pattern().expect("valid delete");
        assert_eq!(pattern.table(), "id");
        assert_eq!(pattern.key_columns(), ["id", "v"]);
        let bindings: Vec<_> = pattern.bindings().collect();
        assert_eq!(bindings, vec![("id", "$jp1"), ("v", "$jp2")]);
    }

    #[test]
    fn test_delete_without_where_is_invalid() {
        let batcher = feed(&[
            E::Command(BatchCommand::Delete),
            E::Word("FROM"),
            E::Word("t"),
        ]);
        assert!(!batcher.is_valid());
    }

    #[test]
    fn test_error_is_terminal() {
        let mut batcher = feed(&[E::Word("SELECT")]);
        batcher.read(E::Command(BatchCommand::Insert));
        assert!(!batcher.is_valid());
    }

    #[test]
    fn test_second_statement_is_error() {
        let batcher = feed(&[
            E::Command(BatchCommand::Delete),
            E::Word("FROM"),
            E::Word("t"),
            E::Word("WHERE"),
            E::Word("k"),
            E::Equal,
            E::Parameter("$jp1"),
            E::Semicolon,
            E::Command(BatchCommand::Delete),
        ]);
        assert!(!batcher.is_valid());
    }

    #[test]
    fn test_qualified_table_name() {
        let batcher = feed(&[
            E::Command(BatchCommand::Replace),
            E::Word("INTO"),
            E::Word("db"),
            E::Dot,
            E::Word("t"),
            E::OpenParen,
            E::Word("a"),
            E::CloseParen,
            E::Word("VALUES"),
            E::OpenParen,
            E::Parameter("$jp1"),
            E::CloseParen,
            E::Semicolon,
        ]);
        let pattern = batcher.into_pattern().expect("valid replace");
        assert_eq!(pattern.table(), "db.t");
    }
}
