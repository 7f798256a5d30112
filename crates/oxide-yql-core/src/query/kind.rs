//! Execution mode and command classification.

use std::fmt;

use serde::Serialize;

/// Execution mode of a statement, deciding which engine call runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    Unknown,
    Declare,
    /// DDL, executed through the scheme API.
    Scheme,
    /// Regular reads and writes.
    Data,
    /// Streaming read.
    Scan,
    Explain,
    /// Bulk upsert.
    Bulk,
}

impl QueryType {
    /// Returns the name used in messages, e.g. `SCHEME_QUERY`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Declare => "DECLARE",
            Self::Scheme => "SCHEME_QUERY",
            Self::Data => "DATA_QUERY",
            Self::Scan => "SCAN_QUERY",
            Self::Explain => "EXPLAIN_QUERY",
            Self::Bulk => "BULK_QUERY",
        }
    }

    /// Returns true for types that take part in the mixed-type check.
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        !matches!(self, Self::Unknown | Self::Declare)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a statement does, deciding what it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryCommand {
    Unknown,
    Select,
    /// CREATE, ALTER, DROP, GRANT or REVOKE.
    Ddl,
    /// INSERT, UPSERT, UPDATE, REPLACE or DELETE.
    Dml,
    /// A generated bulk statement over a list of rows.
    Batch,
}

impl fmt::Display for QueryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "UNKNOWN",
            Self::Select => "SELECT",
            Self::Ddl => "DDL",
            Self::Dml => "DML",
            Self::Batch => "BATCH",
        };
        f.write_str(name)
    }
}
