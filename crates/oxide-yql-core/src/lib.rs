//! # oxide-yql-core
//!
//! A SQL front end that turns JDBC-style query text into YQL.
//!
//! This crate provides:
//! - A byte-level scanner for literals, quoted identifiers and nested comments
//! - A single-pass classifier that splits a script into statements and
//!   decides their execution mode (scheme, data, scan, explain, bulk)
//! - Rewriting of positional `?` placeholders into named `$jpN` parameters,
//!   including `IN (?, ...)` lists and `JDBC_TABLE(?, ...)` tables
//! - Detection of simple INSERT/UPSERT/REPLACE/UPDATE/DELETE shapes that can
//!   run as one bulk statement
//! - A parameter binding model producing typed engine values
//!
//! ## Rewriting a query
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_yql_core::{DefaultTypeLookup, ParserOptions, YqlQuery};
//!
//! let query = YqlQuery::parse(
//!     "SELECT * FROM users WHERE id IN (?, ?) LIMIT ?",
//!     ParserOptions::default(),
//! )?;
//! assert_eq!(query.yql(), "SELECT * FROM users WHERE id IN  $jp1 LIMIT $jp2");
//!
//! let mut params = query.new_params(Arc::new(DefaultTypeLookup::new()));
//! params.set(1, 10_i64)?;
//! params.set(2, 20_i64)?;
//! params.set(3, 100_u32)?;
//!
//! let text = query.yql_text(&params.to_params()?);
//! assert!(text.starts_with("DECLARE $jp1 AS List<Int64>;\nDECLARE $jp2 AS Uint64;\n"));
//! # Ok::<(), oxide_yql_core::QueryError>(())
//! ```

pub mod error;
pub mod lexer;
pub mod options;
pub mod params;
pub mod query;

pub use error::{QueryError, Result};
pub use options::ParserOptions;
pub use params::{
    BatchedQuery, DefaultTypeLookup, HostValue, ParamDescription, ParamFactory, Params,
    QueryParams, ToHostValue, TypeLookup, YqlType, YqlValue,
};
pub use query::{
    BatchCommand, BatchPattern, QueryCommand, QueryParser, QueryStatement, QueryType, YqlQuery,
};
