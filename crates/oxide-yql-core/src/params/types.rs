//! Semantic types of the query engine.

use std::fmt;

use serde::{Serialize, Serializer};

/// A YQL type as used in `DECLARE` statements and parameter maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum YqlType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
    /// Arbitrary bytes (`String` in older YQL).
    Bytes,
    /// UTF-8 text (`Utf8` in older YQL).
    Text,
    Json,
    Date,
    Datetime,
    Timestamp,
    Interval,
    /// A nullable value of the inner type.
    Optional(Box<YqlType>),
    List(Box<YqlType>),
    Tuple(Vec<YqlType>),
    /// Named members, in declaration order.
    Struct(Vec<(String, YqlType)>),
}

impl YqlType {
    /// Wraps this type into `Optional`, unless it already is one.
    #[must_use]
    pub fn optional(self) -> Self {
        match self {
            Self::Optional(_) => self,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Creates a list type.
    #[must_use]
    pub fn list(item: Self) -> Self {
        Self::List(Box::new(item))
    }

    /// Returns true if this is an `Optional` type.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the type with one level of `Optional` removed.
    #[must_use]
    pub fn unwrap_optional(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for YqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("Bool"),
            Self::Int8 => f.write_str("Int8"),
            Self::Int16 => f.write_str("Int16"),
            Self::Int32 => f.write_str("Int32"),
            Self::Int64 => f.write_str("Int64"),
            Self::Uint8 => f.write_str("Uint8"),
            Self::Uint16 => f.write_str("Uint16"),
            Self::Uint32 => f.write_str("Uint32"),
            Self::Uint64 => f.write_str("Uint64"),
            Self::Float => f.write_str("Float"),
            Self::Double => f.write_str("Double"),
            Self::Bytes => f.write_str("Bytes"),
            Self::Text => f.write_str("Text"),
            Self::Json => f.write_str("Json"),
            Self::Date => f.write_str("Date"),
            Self::Datetime => f.write_str("Datetime"),
            Self::Timestamp => f.write_str("Timestamp"),
            Self::Interval => f.write_str("Interval"),
            Self::Optional(inner) => write!(f, "Optional<{inner}>"),
            Self::List(item) => write!(f, "List<{item}>"),
            Self::Tuple(items) => {
                f.write_str("Tuple<")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(">")
            }
            Self::Struct(members) => {
                f.write_str("Struct<")?;
                for (i, (name, ty)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{name}:{ty}")?;
                }
                f.write_str(">")
            }
        }
    }
}

impl Serialize for YqlType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_primitives() {
        assert_eq!(YqlType::Uint64.to_string(), "Uint64");
        assert_eq!(YqlType::Text.to_string(), "Text");
        assert_eq!(YqlType::Timestamp.to_string(), "Timestamp");
    }

    #[test]
    fn test_display_containers() {
        let ty = YqlType::list(YqlType::Tuple(vec![
            YqlType::Int32,
            YqlType::Text.optional(),
        ]));
        assert_eq!(ty.to_string(), "List<Tuple<Int32,Optional<Text>>>");

        let ty = YqlType::list(YqlType::Struct(vec![
            (String::from("id"), YqlType::Int64),
            (String::from("name"), YqlType::Text),
        ]));
        assert_eq!(ty.to_string(), "List<Struct<id:Int64,name:Text>>");
    }

    #[test]
    fn test_optional_is_idempotent() {
        let ty = YqlType::Int32.optional().optional();
        assert_eq!(ty, YqlType::Optional(Box::new(YqlType::Int32)));
        assert!(ty.is_optional());
        assert_eq!(ty.unwrap_optional(), &YqlType::Int32);
        assert_eq!(YqlType::Bool.unwrap_optional(), &YqlType::Bool);
    }
}
