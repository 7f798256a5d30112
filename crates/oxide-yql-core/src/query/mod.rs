//! Statement classification and placeholder rewriting.

mod batcher;
mod kind;
mod list;
mod namer;
mod parser;
mod statement;
mod yql;

pub use batcher::{BatchCommand, BatchEvent, BatchPattern, YqlBatcher};
pub use kind::{QueryCommand, QueryType};
pub use list::{ListRegion, parse_in_list, parse_table_list};
pub use namer::{PARAM_PREFIX, ParamNamer};
pub use parser::QueryParser;
pub use statement::QueryStatement;
pub use yql::YqlQuery;
