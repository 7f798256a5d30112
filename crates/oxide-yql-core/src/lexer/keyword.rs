//! Keywords the classifier reacts to.
//!
//! Only a handful of words matter for classification and rewriting, so there
//! is no general keyword table: callers test a candidate identifier against
//! the keywords they care about, in their own precedence order.

/// SQL keywords recognized by the classifier and the batch recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Statement commands
    Select,
    Insert,
    Upsert,
    Update,
    Delete,
    Replace,
    Alter,
    Create,
    Drop,
    Grant,
    Revoke,
    Declare,

    // Execution mode prefixes
    Scan,
    Explain,
    Bulk,

    // Clauses
    Where,
    From,
    Into,
    Set,
    Values,
    Returning,
    Offset,
    Limit,
    In,
    And,

    /// Pseudo table function rewritten into `AS_TABLE($param)`.
    JdbcTable,
}

impl Keyword {
    /// Prefixes that force the execution mode of the following statement.
    pub const MODE_PREFIXES: [Self; 3] = [Self::Scan, Self::Explain, Self::Bulk];

    /// Words that open a statement, in the order they are tested.
    pub const COMMANDS: [Self; 12] = [
        Self::Alter,
        Self::Create,
        Self::Drop,
        Self::Grant,
        Self::Revoke,
        Self::Select,
        Self::Insert,
        Self::Upsert,
        Self::Update,
        Self::Replace,
        Self::Delete,
        Self::Declare,
    ];

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Upsert => "UPSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Replace => "REPLACE",
            Self::Alter => "ALTER",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Grant => "GRANT",
            Self::Revoke => "REVOKE",
            Self::Declare => "DECLARE",
            Self::Scan => "SCAN",
            Self::Explain => "EXPLAIN",
            Self::Bulk => "BULK",
            Self::Where => "WHERE",
            Self::From => "FROM",
            Self::Into => "INTO",
            Self::Set => "SET",
            Self::Values => "VALUES",
            Self::Returning => "RETURNING",
            Self::Offset => "OFFSET",
            Self::Limit => "LIMIT",
            Self::In => "IN",
            Self::And => "AND",
            Self::JdbcTable => "JDBC_TABLE",
        }
    }

    /// Returns true if `word` is exactly this keyword, ignoring ASCII case.
    ///
    /// Only ASCII letters are folded; digits, underscores and non-ASCII bytes
    /// must match exactly, so `SELECT1` or a UTF-8 look-alike never match.
    #[must_use]
    pub fn matches(self, word: &[u8]) -> bool {
        let keyword = self.as_str().as_bytes();
        word.len() == keyword.len() && word.eq_ignore_ascii_case(keyword)
    }

    /// Returns the first keyword of `candidates` that `word` matches.
    #[must_use]
    pub fn find(word: &[u8], candidates: &[Self]) -> Option<Self> {
        candidates.iter().copied().find(|kw| kw.matches(word))
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
