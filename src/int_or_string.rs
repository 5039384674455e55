//! The int-or-string attribute type and value.
//!
//! Kubernetes fields such as `targetPort` or `maxUnavailable` accept either an
//! integer or a string. [`IntOrStringValue`] carries such a field through
//! configuration, and [`IntOrStringValue::to_external_scalar`] produces the
//! bare scalar Kubernetes expects in a manifest.
//!
//! ```
//! use kube_int_or_string::{ExternalScalar, IntOrStringValue};
//!
//! let port = IntOrStringValue::string("8080");
//! assert_eq!(port.to_external_scalar().unwrap(), ExternalScalar::Integer(8080));
//!
//! let named = IntOrStringValue::string("http");
//! assert_eq!(
//!     named.to_external_scalar().unwrap(),
//!     ExternalScalar::String("http".to_string())
//! );
//! ```

use crate::attr::{AttributeType, AttributeValue};
use crate::diagnostics::{AttributePath, Diagnostic, DiagnosticKind, Diagnostics};
use crate::number::Number;
use crate::wire::{WireType, WireValue};
use crate::{Error, Result};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use schemars::gen::SchemaGenerator;
use schemars::schema::{Metadata, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::fmt;
use tracing::{debug, trace};

/// Type descriptor for [`IntOrStringValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntOrStringType;

impl IntOrStringType {
    pub const NAME: &'static str = "IntOrStringType";

    /// Decode a wire value.
    ///
    /// Only null, unknown, string and number values convert. Anything else
    /// is rejected by `validate` first, so an error here means the value was
    /// never validated.
    pub fn convert(&self, value: &WireValue) -> Result<IntOrStringValue> {
        trace!("Converting wire value into {}: {:?}", Self::NAME, value);
        let Some(wire_type) = value.wire_type() else {
            return Ok(if value.is_unknown() {
                IntOrStringValue::Unknown
            } else {
                IntOrStringValue::Null
            });
        };
        match value {
            WireValue::String(s) => Ok(IntOrStringValue::string(s.clone())),
            WireValue::Number(n) => Ok(IntOrStringValue::number(n.clone())),
            _ => Err(Error::Conversion { wire_type }),
        }
    }
}

impl AttributeType for IntOrStringType {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn equal(&self, other: &dyn AttributeType) -> bool {
        other.as_any().is::<IntOrStringType>()
    }

    fn validate(&self, value: &WireValue, path: &AttributePath) -> Diagnostics {
        let mut diags = Diagnostics::new();
        match value.wire_type() {
            None | Some(WireType::String) | Some(WireType::Number) => {}
            Some(other) => {
                debug!("Rejecting {} value at {} for {}", other, path, Self::NAME);
                diags.push(Diagnostic::new(
                    DiagnosticKind::InvalidValueType,
                    path.clone(),
                    "Invalid value type",
                    format!(
                        "Expected a string or number for {} at {}, received a {} value",
                        Self::NAME,
                        path,
                        other
                    ),
                ));
            }
        }
        diags
    }

    fn value_from_wire(&self, value: &WireValue) -> Result<Box<dyn AttributeValue>> {
        Ok(Box::new(self.convert(value)?))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value that is null, unknown, or a known string or number.
///
/// Values are immutable. Equality requires the same state and, for known
/// values, the same scalar kind and value: `"1"` and `1` are not equal even
/// though both render as `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum IntOrStringValue {
    #[default]
    Null,
    Unknown,
    Known(Scalar),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    String(String),
    Number(Number),
}

/// A scalar as it appears in a serialized manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalScalar {
    Absent,
    Integer(i64),
    String(String),
}

impl ExternalScalar {
    pub fn is_absent(&self) -> bool {
        matches!(self, ExternalScalar::Absent)
    }
}

impl IntOrStringValue {
    pub fn null() -> Self {
        IntOrStringValue::Null
    }

    pub fn unknown() -> Self {
        IntOrStringValue::Unknown
    }

    pub fn string(value: impl Into<String>) -> Self {
        IntOrStringValue::Known(Scalar::String(value.into()))
    }

    pub fn number(value: impl Into<Number>) -> Self {
        IntOrStringValue::Known(Scalar::Number(value.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, IntOrStringValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, IntOrStringValue::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, IntOrStringValue::Known(_))
    }

    /// True for null and unknown values, which render as nothing.
    ///
    /// Intended for `#[serde(skip_serializing_if = "IntOrStringValue::is_absent")]`.
    pub fn is_absent(&self) -> bool {
        !self.is_known()
    }

    pub fn scalar(&self) -> Option<&Scalar> {
        match self {
            IntOrStringValue::Known(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn to_wire_value(&self) -> WireValue {
        match self {
            IntOrStringValue::Null => WireValue::Null,
            IntOrStringValue::Unknown => WireValue::Unknown,
            IntOrStringValue::Known(Scalar::String(s)) => WireValue::String(s.clone()),
            IntOrStringValue::Known(Scalar::Number(n)) => WireValue::Number(n.clone()),
        }
    }

    /// Produce the scalar to embed in a manifest.
    ///
    /// Strings that parse as base-10 integers become integers, matching how
    /// Kubernetes' `IntOrString` prefers the numeric form. Other strings are
    /// kept as they are. Numbers must be exact integers; a fractional value
    /// is an error and is never truncated.
    pub fn to_external_scalar(&self) -> Result<ExternalScalar> {
        match self {
            IntOrStringValue::Null | IntOrStringValue::Unknown => Ok(ExternalScalar::Absent),
            IntOrStringValue::Known(Scalar::String(s)) => Ok(match s.parse::<i64>() {
                Ok(i) => ExternalScalar::Integer(i),
                Err(_) => ExternalScalar::String(s.clone()),
            }),
            IntOrStringValue::Known(Scalar::Number(n)) => n
                .to_i64()
                .map(ExternalScalar::Integer)
                .ok_or_else(|| Error::NonIntegerNumber {
                    value: n.to_string(),
                }),
        }
    }

    /// Convert into the `k8s-openapi` representation.
    ///
    /// Absent values map to `None`. Kubernetes integers are 32-bit, so larger
    /// integers fail with [`Error::IntegerOutOfRange`].
    pub fn to_k8s(&self) -> Result<Option<IntOrString>> {
        Ok(match self.to_external_scalar()? {
            ExternalScalar::Absent => None,
            ExternalScalar::Integer(i) => Some(IntOrString::Int(
                i32::try_from(i).map_err(|_| Error::IntegerOutOfRange { value: i })?,
            )),
            ExternalScalar::String(s) => Some(IntOrString::String(s)),
        })
    }
}

impl AttributeValue for IntOrStringValue {
    fn attribute_type(&self) -> Box<dyn AttributeType> {
        Box::new(IntOrStringType)
    }

    fn is_null(&self) -> bool {
        matches!(self, IntOrStringValue::Null)
    }

    fn is_unknown(&self) -> bool {
        matches!(self, IntOrStringValue::Unknown)
    }

    fn equal(&self, other: &dyn AttributeValue) -> bool {
        other
            .as_any()
            .downcast_ref::<IntOrStringValue>()
            .is_some_and(|other| self == other)
    }

    fn to_wire_value(&self) -> WireValue {
        IntOrStringValue::to_wire_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for IntOrStringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntOrStringValue::Null => f.write_str("<null>"),
            IntOrStringValue::Unknown => f.write_str("<unknown>"),
            IntOrStringValue::Known(Scalar::String(s)) => write!(f, "{:?}", s),
            IntOrStringValue::Known(Scalar::Number(n)) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for IntOrStringValue {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for IntOrStringValue {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<i64> for IntOrStringValue {
    fn from(value: i64) -> Self {
        Self::number(value)
    }
}

impl From<i32> for IntOrStringValue {
    fn from(value: i32) -> Self {
        Self::number(value)
    }
}

impl From<Number> for IntOrStringValue {
    fn from(value: Number) -> Self {
        Self::number(value)
    }
}

impl From<IntOrString> for IntOrStringValue {
    fn from(value: IntOrString) -> Self {
        match value {
            IntOrString::Int(i) => Self::number(i),
            IntOrString::String(s) => Self::string(s),
        }
    }
}

impl Serialize for ExternalScalar {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ExternalScalar::Absent => serializer.serialize_none(),
            ExternalScalar::Integer(i) => serializer.serialize_i64(*i),
            ExternalScalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for IntOrStringValue {
    /// Serializes the external scalar; absent values serialize as `null`.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_external_scalar() {
            Ok(scalar) => scalar.serialize(serializer),
            Err(e) => Err(<S::Error as ser::Error>::custom(e)),
        }
    }
}

impl<'de> Deserialize<'de> for IntOrStringValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(IntOrStringVisitor)
    }
}

struct IntOrStringVisitor;

impl<'de> Visitor<'de> for IntOrStringVisitor {
    type Value = IntOrStringValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string, a number or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<IntOrStringValue, E> {
        Ok(IntOrStringValue::string(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<IntOrStringValue, E> {
        Ok(IntOrStringValue::string(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<IntOrStringValue, E> {
        Ok(IntOrStringValue::number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<IntOrStringValue, E> {
        Ok(IntOrStringValue::number(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> std::result::Result<IntOrStringValue, E> {
        v.to_string()
            .parse::<Number>()
            .map(IntOrStringValue::number)
            .map_err(E::custom)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<IntOrStringValue, E> {
        v.to_string()
            .parse::<Number>()
            .map(IntOrStringValue::number)
            .map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<IntOrStringValue, E> {
        Number::try_from(v)
            .map(IntOrStringValue::number)
            .map_err(E::custom)
    }

    fn visit_map<A>(self, map: A) -> std::result::Result<IntOrStringValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        Number::deserialize(MapAccessDeserializer::new(map)).map(IntOrStringValue::number)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<IntOrStringValue, E> {
        Ok(IntOrStringValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<IntOrStringValue, E> {
        Ok(IntOrStringValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<IntOrStringValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl JsonSchema for IntOrStringValue {
    fn schema_name() -> String {
        "IntOrString".to_string()
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        Schema::Object(SchemaObject {
            metadata: Some(Box::new(Metadata {
                description: Some(
                    "An integer or a string. Strings holding a base-10 integer are emitted as integers."
                        .to_string(),
                ),
                ..Default::default()
            })),
            extensions: [(
                "x-kubernetes-int-or-string".to_string(),
                serde_json::Value::Bool(true),
            )]
            .into_iter()
            .collect(),
            ..Default::default()
        })
    }
}
