//! Typed values of the query engine and the parameter map they travel in.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::YqlType;

/// A value of a [`YqlType`].
#[derive(Debug, Clone, PartialEq)]
pub enum YqlValue {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    Text(String),
    Json(String),
    Date(NaiveDate),
    Datetime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Interval(chrono::Duration),
    /// A nullable value; `value` is `None` for NULL.
    Optional {
        item: YqlType,
        value: Option<Box<YqlValue>>,
    },
    List {
        item: YqlType,
        items: Vec<YqlValue>,
    },
    Tuple(Vec<YqlValue>),
    Struct(Vec<(String, YqlValue)>),
}

impl YqlValue {
    /// Creates a NULL of the given type.
    #[must_use]
    pub fn null(ty: &YqlType) -> Self {
        Self::Optional {
            item: ty.unwrap_optional().clone(),
            value: None,
        }
    }

    /// Returns true if this is a NULL optional.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Optional { value: None, .. })
    }

    /// Wraps the value into `Optional`, unless it already is one.
    #[must_use]
    pub fn into_optional(self) -> Self {
        match self {
            Self::Optional { .. } => self,
            other => Self::Optional {
                item: other.yql_type(),
                value: Some(Box::new(other)),
            },
        }
    }

    /// Returns the type of this value.
    #[must_use]
    pub fn yql_type(&self) -> YqlType {
        match self {
            Self::Bool(_) => YqlType::Bool,
            Self::Int8(_) => YqlType::Int8,
            Self::Int16(_) => YqlType::Int16,
            Self::Int32(_) => YqlType::Int32,
            Self::Int64(_) => YqlType::Int64,
            Self::Uint8(_) => YqlType::Uint8,
            Self::Uint16(_) => YqlType::Uint16,
            Self::Uint32(_) => YqlType::Uint32,
            Self::Uint64(_) => YqlType::Uint64,
            Self::Float(_) => YqlType::Float,
            Self::Double(_) => YqlType::Double,
            Self::Bytes(_) => YqlType::Bytes,
            Self::Text(_) => YqlType::Text,
            Self::Json(_) => YqlType::Json,
            Self::Date(_) => YqlType::Date,
            Self::Datetime(_) => YqlType::Datetime,
            Self::Timestamp(_) => YqlType::Timestamp,
            Self::Interval(_) => YqlType::Interval,
            Self::Optional { item, .. } => YqlType::Optional(Box::new(item.clone())),
            Self::List { item, .. } => YqlType::List(Box::new(item.clone())),
            Self::Tuple(items) => YqlType::Tuple(items.iter().map(Self::yql_type).collect()),
            Self::Struct(members) => YqlType::Struct(
                members
                    .iter()
                    .map(|(name, value)| (name.clone(), value.yql_type()))
                    .collect(),
            ),
        }
    }
}

/// Named parameters passed to the engine along with the query text.
///
/// Keeps insertion order, which is also the order of `DECLARE` lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Vec<(String, YqlValue)>,
}

impl Params {
    /// Creates an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Sets a parameter, replacing any previous value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: YqlValue) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&YqlValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &YqlValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
