//! AMF0 value types
//!
//! Decoded script data is a tree of [`AmfValue`]. Keyed containers keep the
//! order in which their properties appeared on the wire.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Ordered property map used by Object, ECMA Array and Typed Object values
pub type Properties = IndexMap<String, AmfValue>;

/// Decoded AMF0 value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AmfValue {
    /// IEEE 754 double-precision floating point (0x00)
    Number(f64),

    /// Boolean value (0x01)
    Boolean(bool),

    /// UTF-8 string, short (0x02) or long (0x0C)
    String(String),

    /// Anonymous key-value object (0x03)
    Object(Properties),

    /// Null value (0x05)
    Null,

    /// Undefined value (0x06), also produced for skipped unsupported markers
    #[default]
    Undefined,

    /// Associative array (0x08); the wire count hint is not kept
    EcmaArray(Properties),

    /// Dense array (0x0A)
    StrictArray(Vec<AmfValue>),

    /// Date (0x0B)
    Date(AmfDate),

    /// XML document (0x0F)
    Xml(String),

    /// Typed object with class name (0x10)
    TypedObject {
        class_name: String,
        properties: Properties,
    },
}

/// UTC instant decoded from an AMF0 Date
///
/// The wire format carries a millisecond timestamp plus a signed minute
/// offset; the offset is already folded into `millis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmfDate {
    /// Milliseconds since the Unix epoch, UTC
    pub millis: f64,
}

impl AmfDate {
    pub fn new(timestamp_millis: f64, local_offset_minutes: i16) -> Self {
        Self {
            millis: timestamp_millis + f64::from(local_offset_minutes) * 60_000.0,
        }
    }

    /// Convert to a chrono timestamp, truncating sub-millisecond precision.
    ///
    /// Returns `None` for non-finite or out-of-range values.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.millis.is_finite() || self.millis.abs() > i64::MAX as f64 {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(self.millis.trunc() as i64)
    }
}

impl AmfValue {
    /// Try to get this value as a string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AmfValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AmfValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get this value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AmfValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<AmfDate> {
        match self {
            AmfValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get the properties of any keyed container
    pub fn as_object(&self) -> Option<&Properties> {
        match self {
            AmfValue::Object(m) => Some(m),
            AmfValue::EcmaArray(m) => Some(m),
            AmfValue::TypedObject { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Try to get this value as an array reference
    pub fn as_array(&self) -> Option<&[AmfValue]> {
        match self {
            AmfValue::StrictArray(a) => Some(a),
            _ => None,
        }
    }

    /// Check if this value is null or undefined
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, AmfValue::Null | AmfValue::Undefined)
    }

    /// Get a property from a keyed container
    pub fn get(&self, key: &str) -> Option<&AmfValue> {
        self.as_object()?.get(key)
    }

    /// Get a string property from a keyed container
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Get a number property from a keyed container
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_number()
    }
}

impl From<bool> for AmfValue {
    fn from(v: bool) -> Self {
        AmfValue::Boolean(v)
    }
}

impl From<f64> for AmfValue {
    fn from(v: f64) -> Self {
        AmfValue::Number(v)
    }
}

impl From<String> for AmfValue {
    fn from(v: String) -> Self {
        AmfValue::String(v)
    }
}

impl From<&str> for AmfValue {
    fn from(v: &str) -> Self {
        AmfValue::String(v.to_string())
    }
}

impl From<AmfDate> for AmfValue {
    fn from(v: AmfDate) -> Self {
        AmfValue::Date(v)
    }
}

impl<V: Into<AmfValue>> From<Vec<V>> for AmfValue {
    fn from(v: Vec<V>) -> Self {
        AmfValue::StrictArray(v.into_iter().map(|x| x.into()).collect())
    }
}
