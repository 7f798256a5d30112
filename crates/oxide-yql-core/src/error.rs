//! Error types for query parsing and parameter binding.

use crate::params::YqlType;
use crate::query::QueryType;

/// Errors reported by the query front end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Statements of one query resolve to incompatible execution modes.
    #[error("Query cannot contain expressions with different types: {first}, {second}")]
    MixedQueryTypes {
        /// The type seen first.
        first: QueryType,
        /// The conflicting type.
        second: QueryType,
    },

    /// No type could be determined for a parameter.
    #[error("Type of parameter {0} is unknown")]
    ParameterTypeUnknown(String),

    /// A parameter was never bound before execution.
    #[error("Missing value for parameter: {0}")]
    MissingValue(String),

    /// A bound value cannot be represented as the requested engine type.
    #[error("Cannot cast value of parameter {name} to {expected}: {reason}")]
    InvalidValue {
        /// Display name of the parameter.
        name: String,
        /// Target type.
        expected: YqlType,
        /// Why the conversion failed.
        reason: String,
    },

    /// Values that must share a type do not.
    #[error("Parameter {name} expects values of type {expected}, got {found}")]
    TypeMismatch {
        /// Display name of the parameter or column.
        name: String,
        /// Type established by earlier values.
        expected: YqlType,
        /// Type of the offending value.
        found: YqlType,
    },

    /// A positional index outside `1..=count` was used.
    #[error("Parameter index {index} out of range, query has {count} parameters")]
    ParameterIndexOutOfRange {
        /// The requested 1-based index.
        index: usize,
        /// Number of positional slots.
        count: usize,
    },

    /// Bulk execution was requested for a query without a batchable shape.
    #[error("Query is not a single INSERT, UPSERT, REPLACE, UPDATE or DELETE with bound values")]
    NotBatchable,

    /// A bulk query was executed without any accumulated rows.
    #[error("Batch is empty")]
    EmptyBatch,
}

/// Result type for query front end operations.
pub type Result<T> = std::result::Result<T, QueryError>;
