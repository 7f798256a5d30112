//! Values supplied by the caller for positional parameters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::YqlValue;

/// A caller-side value bound to a `?` placeholder.
///
/// Host values carry no engine type; a [`TypeLookup`](super::TypeLookup)
/// decides which [`YqlType`](super::YqlType) they become.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary value.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time without zone.
    DateTime(NaiveDateTime),
    /// Point in time.
    Timestamp(DateTime<Utc>),
    /// Time interval.
    Duration(chrono::Duration),
    /// A value already in engine form; passed through unchanged.
    Native(YqlValue),
}

impl HostValue {
    /// Returns true for [`HostValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Trait for types that can be bound to a placeholder.
pub trait ToHostValue {
    /// Converts the value to a `HostValue`.
    fn to_host_value(self) -> HostValue;
}

impl ToHostValue for HostValue {
    fn to_host_value(self) -> HostValue {
        self
    }
}

impl ToHostValue for YqlValue {
    fn to_host_value(self) -> HostValue {
        HostValue::Native(self)
    }
}

impl ToHostValue for bool {
    fn to_host_value(self) -> HostValue {
        HostValue::Bool(self)
    }
}

impl ToHostValue for i64 {
    fn to_host_value(self) -> HostValue {
        HostValue::Int(self)
    }
}

impl ToHostValue for i32 {
    fn to_host_value(self) -> HostValue {
        HostValue::Int(i64::from(self))
    }
}

impl ToHostValue for i16 {
    fn to_host_value(self) -> HostValue {
        HostValue::Int(i64::from(self))
    }
}

impl ToHostValue for i8 {
    fn to_host_value(self) -> HostValue {
        HostValue::Int(i64::from(self))
    }
}

impl ToHostValue for u64 {
    fn to_host_value(self) -> HostValue {
        HostValue::UInt(self)
    }
}

impl ToHostValue for u32 {
    fn to_host_value(self) -> HostValue {
        HostValue::UInt(u64::from(self))
    }
}

impl ToHostValue for u16 {
    fn to_host_value(self) -> HostValue {
        HostValue::UInt(u64::from(self))
    }
}

impl ToHostValue for u8 {
    fn to_host_value(self) -> HostValue {
        HostValue::UInt(u64::from(self))
    }
}

impl ToHostValue for f64 {
    fn to_host_value(self) -> HostValue {
        HostValue::Float(self)
    }
}

impl ToHostValue for f32 {
    fn to_host_value(self) -> HostValue {
        HostValue::Float(f64::from(self))
    }
}

impl ToHostValue for String {
    fn to_host_value(self) -> HostValue {
        HostValue::Text(self)
    }
}

impl ToHostValue for &str {
    fn to_host_value(self) -> HostValue {
        HostValue::Text(String::from(self))
    }
}

impl ToHostValue for Vec<u8> {
    fn to_host_value(self) -> HostValue {
        HostValue::Bytes(self)
    }
}

impl ToHostValue for &[u8] {
    fn to_host_value(self) -> HostValue {
        HostValue::Bytes(self.to_vec())
    }
}

impl ToHostValue for NaiveDate {
    fn to_host_value(self) -> HostValue {
        HostValue::Date(self)
    }
}

impl ToHostValue for NaiveDateTime {
    fn to_host_value(self) -> HostValue {
        HostValue::DateTime(self)
    }
}

impl ToHostValue for DateTime<Utc> {
    fn to_host_value(self) -> HostValue {
        HostValue::Timestamp(self)
    }
}

impl ToHostValue for chrono::Duration {
    fn to_host_value(self) -> HostValue {
        HostValue::Duration(self)
    }
}

impl<T: ToHostValue> ToHostValue for Option<T> {
    fn to_host_value(self) -> HostValue {
        match self {
            Some(v) => v.to_host_value(),
            None => HostValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_widen() {
        assert_eq!(7_i8.to_host_value(), HostValue::Int(7));
        assert_eq!((-3_i32).to_host_value(), HostValue::Int(-3));
        assert_eq!(9_u16.to_host_value(), HostValue::UInt(9));
        assert_eq!(u64::MAX.to_host_value(), HostValue::UInt(u64::MAX));
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(None::<i32>.to_host_value(), HostValue::Null);
        assert!(None::<&str>.to_host_value().is_null());
        assert_eq!(
            Some("a").to_host_value(),
            HostValue::Text(String::from("a"))
        );
    }

    #[test]
    fn test_native_passthrough() {
        assert_eq!(
            YqlValue::Json(String::from("{}")).to_host_value(),
            HostValue::Native(YqlValue::Json(String::from("{}")))
        );
    }
}
