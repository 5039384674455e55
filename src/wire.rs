//! Wire-level values exchanged with the configuration system.

use crate::number::Number;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// The type of a known wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    String,
    Number,
    Bool,
    List,
    Map,
    Object,
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireType::String => "string",
            WireType::Number => "number",
            WireType::Bool => "bool",
            WireType::List => "list",
            WireType::Map => "map",
            WireType::Object => "object",
        };
        f.write_str(name)
    }
}

/// A value as carried by the configuration system before it is decoded into
/// an attribute value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WireValue {
    #[default]
    Null,
    /// Not known until apply.
    Unknown,
    String(String),
    Number(Number),
    Bool(bool),
    List(Vec<WireValue>),
    Map(BTreeMap<String, WireValue>),
    Object(BTreeMap<String, WireValue>),
}

impl WireValue {
    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, WireValue::Unknown)
    }

    /// Returns the wire type of a known value, or `None` for null and
    /// unknown values.
    pub fn wire_type(&self) -> Option<WireType> {
        match self {
            WireValue::Null | WireValue::Unknown => None,
            WireValue::String(_) => Some(WireType::String),
            WireValue::Number(_) => Some(WireType::Number),
            WireValue::Bool(_) => Some(WireType::Bool),
            WireValue::List(_) => Some(WireType::List),
            WireValue::Map(_) => Some(WireType::Map),
            WireValue::Object(_) => Some(WireType::Object),
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::String(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::String(value)
    }
}

impl From<Number> for WireValue {
    fn from(value: Number) -> Self {
        WireValue::Number(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Number(Number::from(value))
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Bool(value)
    }
}

impl TryFrom<serde_json::Value> for WireValue {
    type Error = Error;

    /// JSON objects decode as `Object` and arrays as `List`.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => WireValue::Null,
            Value::Bool(b) => WireValue::Bool(b),
            Value::Number(n) => WireValue::Number(Number::try_from(&n)?),
            Value::String(s) => WireValue::String(s),
            Value::Array(items) => WireValue::List(
                items
                    .into_iter()
                    .map(WireValue::try_from)
                    .collect::<Result<_>>()?,
            ),
            Value::Object(fields) => WireValue::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| Ok((k, WireValue::try_from(v)?)))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}
