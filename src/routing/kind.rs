//! Variable kinds and typed values.
//!
//! # Responsibilities
//! - Resolve a type tag (`int16`, `STRING`, ...) to a [`Kind`]
//! - Cast a raw path segment to a [`Value`] of that kind
//!
//! # Design Decisions
//! - Tags are case-insensitive; unknown tags resolve to `Generic`, never an error
//! - Integer casts honour the declared width exactly (`int8` rejects `128`)
//! - A failed cast is reported as `None`; bindings surface it as [`Value::Uncastable`]

use std::fmt;

use serde::{Serialize, Serializer};

/// The declared type of a path variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// Untagged variables default to `String`.
    #[default]
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Int,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint,
    /// Unrecognized tag; the raw text is passed through.
    Generic,
}

impl Kind {
    /// Resolve a type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "string" => Kind::String,
            "int8" => Kind::Int8,
            "int16" => Kind::Int16,
            "int32" => Kind::Int32,
            "int64" => Kind::Int64,
            "int" => Kind::Int,
            "uint8" => Kind::Uint8,
            "uint16" => Kind::Uint16,
            "uint32" => Kind::Uint32,
            "uint64" => Kind::Uint64,
            "uint" => Kind::Uint,
            _ => Kind::Generic,
        }
    }

    /// The canonical lowercase tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Int => "int",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Uint => "uint",
            Kind::Generic => "generic",
        }
    }

    /// Cast a raw segment to this kind.
    ///
    /// Returns `None` when an integer kind cannot parse `raw` as a base-10
    /// number within its bit width.
    pub fn cast(self, raw: &str) -> Option<Value> {
        match self {
            Kind::String | Kind::Generic => Some(Value::Str(raw.to_string())),
            Kind::Int8 => raw.parse().ok().map(Value::I8),
            Kind::Int16 => raw.parse().ok().map(Value::I16),
            Kind::Int32 => raw.parse().ok().map(Value::I32),
            Kind::Int64 => raw.parse().ok().map(Value::I64),
            Kind::Int => raw.parse().ok().map(Value::Int),
            Kind::Uint8 => raw.parse().ok().map(Value::U8),
            Kind::Uint16 => raw.parse().ok().map(Value::U16),
            Kind::Uint32 => raw.parse().ok().map(Value::U32),
            Kind::Uint64 => raw.parse().ok().map(Value::U64),
            Kind::Uint => raw.parse().ok().map(Value::Uint),
        }
    }

    /// Cast `raw`, falling back to [`Value::Uncastable`] on failure.
    pub fn bind(self, raw: &str) -> Value {
        self.cast(raw)
            .unwrap_or_else(|| Value::Uncastable(raw.to_string()))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A typed path variable value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Str(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Int(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Uint(usize),
    /// The variable matched but its text does not fit the declared kind.
    Uncastable(String),
}

impl Value {
    /// The string payload of `Str` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Any signed integer value, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(v) => Some(v.into()),
            Value::I16(v) => Some(v.into()),
            Value::I32(v) => Some(v.into()),
            Value::I64(v) => Some(v),
            Value::Int(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Any unsigned integer value, widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U8(v) => Some(v.into()),
            Value::U16(v) => Some(v.into()),
            Value::U32(v) => Some(v.into()),
            Value::U64(v) => Some(v),
            Value::Uint(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn is_uncastable(&self) -> bool {
        matches!(self, Value::Uncastable(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) | Value::Uncastable(s) => f.write_str(s),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
        }
    }
}

// Uncastable values serialize as `null`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::Int(v) => serializer.serialize_i64(*v as i64),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v as u64),
            Value::Uncastable(_) => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_resolution() {
        assert_eq!(Kind::from_tag("string"), Kind::String);
        assert_eq!(Kind::from_tag(" StRiNg "), Kind::String);
        assert_eq!(Kind::from_tag("INT"), Kind::Int);
        assert_eq!(Kind::from_tag("uint64"), Kind::Uint64);
        assert_eq!(Kind::from_tag("float"), Kind::Generic);
        assert_eq!(Kind::from_tag(""), Kind::Generic);
        assert_eq!(Kind::default(), Kind::String);
    }

    #[test]
    fn test_int16_width() {
        assert_eq!(Kind::Int16.cast("1234"), Some(Value::I16(1234)));
        assert_eq!(Kind::Int16.cast("99999"), None);
        assert_eq!(Kind::Int16.cast("-32768"), Some(Value::I16(-32768)));
    }

    #[test]
    fn test_no_wraparound() {
        assert_eq!(Kind::Int8.cast("127"), Some(Value::I8(127)));
        assert_eq!(Kind::Int8.cast("128"), None);
        assert_eq!(Kind::Int8.cast("-129"), None);
        assert_eq!(Kind::Uint8.cast("256"), None);
        assert_eq!(Kind::Uint.cast("-1"), None);
        assert_eq!(Kind::Int.cast("abc"), None);
    }

    #[test]
    fn test_passthrough_kinds() {
        assert_eq!(Kind::String.cast("darwin"), Some(Value::Str("darwin".into())));
        assert_eq!(Kind::Generic.cast("42"), Some(Value::Str("42".into())));
    }

    #[test]
    fn test_bind_sentinel() {
        let value = Kind::Uint16.bind("lots");
        assert!(value.is_uncastable());
        assert_eq!(value.to_string(), "lots");
        assert_eq!(Kind::Uint16.bind("80"), Value::U16(80));
    }

    #[test]
    fn test_widening_accessors() {
        assert_eq!(Value::I8(-5).as_i64(), Some(-5));
        assert_eq!(Value::Int(42).as_i64(), Some(42));
        assert_eq!(Value::U32(7).as_u64(), Some(7));
        assert_eq!(Value::Str("7".into()).as_u64(), None);
        assert_eq!(Value::Str("x".into()).as_str(), Some("x"));
    }

    #[test]
    fn test_serialize() {
        let values = vec![
            Value::Str("d".into()),
            Value::Int(1),
            Value::Uncastable("x".into()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["d",1,null]"#);
    }
}
