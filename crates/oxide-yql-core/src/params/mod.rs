//! Parameter binding model.
//!
//! A parsed query describes its generated parameters with [`ParamFactory`]
//! values. For every execution the caller creates a [`QueryParams`]
//! container, binds host values by position and turns it into the engine
//! parameter map ([`Params`]). Host values are mapped to engine types by a
//! [`TypeLookup`].

mod batch;
mod binding;
mod factory;
mod host;
mod lookup;
mod query_params;
mod types;
mod value;

pub use batch::{BATCH_PARAM, BatchedQuery};
pub use factory::{ParamDescription, ParamFactory, TABLE_COLUMN};
pub use host::{HostValue, ToHostValue};
pub use lookup::{DefaultTypeLookup, TypeLookup};
pub use query_params::QueryParams;
pub use types::YqlType;
pub use value::{Params, YqlValue};
