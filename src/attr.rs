use crate::diagnostics::{AttributePath, Diagnostics};
use crate::wire::WireValue;
use crate::Result;
use std::any::Any;
use std::fmt;

/// Type identity and wire decoding for a kind of attribute value.
pub trait AttributeType: fmt::Debug + Send + Sync {
    /// Stable human-readable name used in diagnostics and logs.
    fn name(&self) -> &'static str;

    /// Type identity is nominal: it does not depend on any particular value.
    fn equal(&self, other: &dyn AttributeType) -> bool;

    /// Check that a wire value can be decoded into this type.
    ///
    /// `path` is only used for messages.
    fn validate(&self, value: &WireValue, path: &AttributePath) -> Diagnostics;

    fn value_from_wire(&self, value: &WireValue) -> Result<Box<dyn AttributeValue>>;

    fn as_any(&self) -> &dyn Any;
}

/// A decoded attribute value.
pub trait AttributeValue: fmt::Debug + Send + Sync {
    fn attribute_type(&self) -> Box<dyn AttributeType>;

    fn is_null(&self) -> bool;

    fn is_unknown(&self) -> bool;

    /// Values of a different concrete type compare unequal.
    fn equal(&self, other: &dyn AttributeValue) -> bool;

    fn to_wire_value(&self) -> WireValue;

    fn as_any(&self) -> &dyn Any;
}

/// Validate and convert a wire value, recording any problems in `diags`.
///
/// Returns `None` when validation or conversion failed.
pub fn decode_attribute(
    attribute_type: &dyn AttributeType,
    value: &WireValue,
    path: &AttributePath,
    diags: &mut Diagnostics,
) -> Option<Box<dyn AttributeValue>> {
    let found = attribute_type.validate(value, path);
    let failed = !found.is_empty();
    diags.extend(found);
    if failed {
        return None;
    }

    match attribute_type.value_from_wire(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            diags.push_error(&e, path);
            None
        }
    }
}
