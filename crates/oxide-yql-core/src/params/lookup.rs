//! Mapping of caller values onto engine types.

use super::{HostValue, YqlType, YqlValue};

/// Resolves engine types for host values and converts between them.
///
/// Implementations must be stateless with respect to a single parse or
/// execution; one lookup is shared by every parameter container of a query.
pub trait TypeLookup: Send + Sync {
    /// Returns the engine type a value should be bound as.
    ///
    /// An explicit `hint` wins over the natural type of the value. `None`
    /// means the type is unknown, e.g. for an untyped NULL.
    fn find_type(&self, value: &HostValue, hint: Option<&YqlType>) -> Option<YqlType>;

    /// Converts a non-null value to the given type.
    ///
    /// # Errors
    ///
    /// Returns a human readable reason if the value cannot be represented.
    fn convert(&self, value: HostValue, ty: &YqlType) -> Result<YqlValue, String>;
}

/// The default mapping between host values and YQL types.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTypeLookup;

impl DefaultTypeLookup {
    /// Creates the default lookup.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn natural_type(value: &HostValue) -> Option<YqlType> {
        match value {
            HostValue::Null => None,
            HostValue::Bool(_) => Some(YqlType::Bool),
            HostValue::Int(_) => Some(YqlType::Int64),
            HostValue::UInt(_) => Some(YqlType::Uint64),
            HostValue::Float(_) => Some(YqlType::Double),
            HostValue::Text(_) => Some(YqlType::Text),
            HostValue::Bytes(_) => Some(YqlType::Bytes),
            HostValue::Date(_) => Some(YqlType::Date),
            HostValue::DateTime(_) => Some(YqlType::Datetime),
            HostValue::Timestamp(_) => Some(YqlType::Timestamp),
            HostValue::Duration(_) => Some(YqlType::Interval),
            HostValue::Native(v) => Some(v.yql_type()),
        }
    }
}

fn out_of_range(value: impl std::fmt::Display) -> String {
    format!("value {value} is out of range")
}

fn unsupported(value: &HostValue) -> String {
    format!("unsupported value {value:?}")
}

fn convert_signed(v: i64, ty: &YqlType) -> Result<YqlValue, String> {
    let value = match ty {
        YqlType::Int8 => YqlValue::Int8(i8::try_from(v).map_err(|_| out_of_range(v))?),
        YqlType::Int16 => YqlValue::Int16(i16::try_from(v).map_err(|_| out_of_range(v))?),
        YqlType::Int32 => YqlValue::Int32(i32::try_from(v).map_err(|_| out_of_range(v))?),
        YqlType::Int64 => YqlValue::Int64(v),
        YqlType::Uint8 => YqlValue::Uint8(u8::try_from(v).map_err(|_| out_of_range(v))?),
        YqlType::Uint16 => YqlValue::Uint16(u16::try_from(v).map_err(|_| out_of_range(v))?),
        YqlType::Uint32 => YqlValue::Uint32(u32::try_from(v).map_err(|_| out_of_range(v))?),
        YqlType::Uint64 => YqlValue::Uint64(u64::try_from(v).map_err(|_| out_of_range(v))?),
        #[allow(clippy::cast_precision_loss)]
        YqlType::Double => YqlValue::Double(v as f64),
        YqlType::Text => YqlValue::Text(v.to_string()),
        YqlType::Interval => YqlValue::Interval(chrono::Duration::microseconds(v)),
        _ => return Err(unsupported(&HostValue::Int(v))),
    };
    Ok(value)
}

fn convert_unsigned(v: u64, ty: &YqlType) -> Result<YqlValue, String> {
    match ty {
        YqlType::Uint64 => Ok(YqlValue::Uint64(v)),
        YqlType::Text => Ok(YqlValue::Text(v.to_string())),
        _ => {
            let signed = i64::try_from(v).map_err(|_| out_of_range(v))?;
            convert_signed(signed, ty)
        }
    }
}

impl TypeLookup for DefaultTypeLookup {
    fn find_type(&self, value: &HostValue, hint: Option<&YqlType>) -> Option<YqlType> {
        hint.cloned().or_else(|| Self::natural_type(value))
    }

    fn convert(&self, value: HostValue, ty: &YqlType) -> Result<YqlValue, String> {
        if let HostValue::Native(v) = &value {
            if &v.yql_type() == ty {
                return Ok(v.clone());
            }
        }
        if let YqlType::Optional(inner) = ty {
            return self.convert(value, inner).map(YqlValue::into_optional);
        }
        match (value, ty) {
            (HostValue::Native(v), _) => Err(format!("value of type {} given", v.yql_type())),
            (HostValue::Bool(b), YqlType::Bool) => Ok(YqlValue::Bool(b)),
            (HostValue::Int(v), ty) => convert_signed(v, ty),
            (HostValue::UInt(v), ty) => convert_unsigned(v, ty),
            #[allow(clippy::cast_possible_truncation)]
            (HostValue::Float(v), YqlType::Float) => Ok(YqlValue::Float(v as f32)),
            (HostValue::Float(v), YqlType::Double) => Ok(YqlValue::Double(v)),
            (HostValue::Text(s), YqlType::Text) => Ok(YqlValue::Text(s)),
            (HostValue::Text(s), YqlType::Json) => Ok(YqlValue::Json(s)),
            (HostValue::Text(s), YqlType::Bytes) => Ok(YqlValue::Bytes(s.into_bytes())),
            (HostValue::Bytes(b), YqlType::Bytes) => Ok(YqlValue::Bytes(b)),
            (HostValue::Bytes(b), YqlType::Text) => String::from_utf8(b)
                .map(YqlValue::Text)
                .map_err(|e| e.to_string()),
            (HostValue::Date(d), YqlType::Date) => Ok(YqlValue::Date(d)),
            (HostValue::Date(d), YqlType::Datetime) => {
                Ok(YqlValue::Datetime(d.and_hms_opt(0, 0, 0).unwrap_or_default()))
            }
            (HostValue::DateTime(dt), YqlType::Datetime) => Ok(YqlValue::Datetime(dt)),
            (HostValue::DateTime(dt), YqlType::Date) => Ok(YqlValue::Date(dt.date())),
            (HostValue::DateTime(dt), YqlType::Timestamp) => {
                Ok(YqlValue::Timestamp(dt.and_utc()))
            }
            (HostValue::Timestamp(ts), YqlType::Timestamp) => Ok(YqlValue::Timestamp(ts)),
            (HostValue::Timestamp(ts), YqlType::Datetime) => {
                Ok(YqlValue::Datetime(ts.naive_utc()))
            }
            (HostValue::Duration(d), YqlType::Interval) => Ok(YqlValue::Interval(d)),
            (value, _) => Err(unsupported(&value)),
        }
    }
}
