//! Prepare-time descriptions of the parameters a statement needs.

use serde::Serialize;

use super::YqlType;

/// Member name of the single-column structs built for `JDBC_TABLE(...)`.
pub const TABLE_COLUMN: &str = "x";

/// One generated parameter of a rewritten query.
///
/// A factory owns one name in the rewritten text but may cover several
/// positional `?` slots of the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamFactory {
    /// A single placeholder. `declared` is fixed at prepare time, e.g.
    /// `Uint64` for `LIMIT ?`; otherwise the type comes from the bound value.
    Simple {
        name: String,
        declared: Option<YqlType>,
    },
    /// `IN (?, ...)` or `IN ((?, ?), ...)` collapsed into one list.
    InList {
        name: String,
        list_size: usize,
        tuple_size: usize,
    },
    /// `JDBC_TABLE(?, ...)` collapsed into a list of structs.
    TableList { name: String, list_size: usize },
}

impl ParamFactory {
    /// Creates a simple parameter with a type taken from its value.
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple {
            name: name.into(),
            declared: None,
        }
    }

    /// Creates a simple parameter with a prepare-time type.
    #[must_use]
    pub fn typed(name: impl Into<String>, ty: YqlType) -> Self {
        Self::Simple {
            name: name.into(),
            declared: Some(ty),
        }
    }

    /// Returns the generated parameter name, e.g. `$jp1`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple { name, .. } | Self::InList { name, .. } | Self::TableList { name, .. } => {
                name
            }
        }
    }

    /// Returns the number of positional placeholders this parameter covers.
    #[must_use]
    pub const fn slots(&self) -> usize {
        match self {
            Self::Simple { .. } => 1,
            Self::InList {
                list_size,
                tuple_size,
                ..
            } => *list_size * *tuple_size,
            Self::TableList { list_size, .. } => *list_size,
        }
    }

    /// Returns the display name of the `slot`-th placeholder covered.
    #[must_use]
    pub fn display_name(&self, slot: usize) -> String {
        match self {
            Self::Simple { name, .. } => name.clone(),
            Self::InList {
                name, tuple_size, ..
            } if *tuple_size > 1 => {
                format!("{name}[{}][{}]", slot / tuple_size, slot % tuple_size)
            }
            Self::InList { name, .. } | Self::TableList { name, .. } => format!("{name}[{slot}]"),
        }
    }
}

/// Describes one positional placeholder to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDescription {
    /// Name of the engine parameter the placeholder feeds.
    pub name: String,
    /// Name used in error messages.
    pub display_name: String,
    /// Type, if known yet.
    #[serde(rename = "type")]
    pub ty: Option<YqlType>,
}
