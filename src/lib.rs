//! Int-or-string attribute values for generated Kubernetes manifests.
//!
//! Many Kubernetes fields (`targetPort`, `maxUnavailable`, health-check ports) accept
//! either an integer or a string. [`IntOrStringValue`] holds such a field in a
//! configuration system that also knows about null and not-yet-known values,
//! and renders it the way Kubernetes' own `IntOrString` does.
//!
//! # Examples
//!
//! ## Decoding a wire value
//!
//! ```rust
//! use kube_int_or_string::{AttributePath, AttributeType, IntOrStringType, WireValue};
//!
//! let path = AttributePath::root().attribute("spec").attribute("max_unavailable");
//! let wire = WireValue::from("25%");
//!
//! assert!(IntOrStringType.validate(&wire, &path).is_empty());
//! let value = IntOrStringType.convert(&wire).unwrap();
//! assert_eq!(value.to_string(), "\"25%\"");
//! ```
//!
//! ## Rendering a manifest
//!
//! ```rust
//! use kube_int_or_string::{IntOrStringValue, Manifest, RenderOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct BudgetSpec {
//!     #[serde(skip_serializing_if = "IntOrStringValue::is_absent")]
//!     min_available: IntOrStringValue,
//! }
//!
//! let manifest = Manifest::new(
//!     "policy/v1",
//!     "PodDisruptionBudget",
//!     "web",
//!     BudgetSpec { min_available: IntOrStringValue::string("2") },
//! );
//!
//! let yaml = manifest.render(&RenderOptions::new()).unwrap();
//! assert!(yaml.contains("minAvailable: 2"));
//! ```

mod attr;
mod diagnostics;
mod error;
mod int_or_string;
mod manifest;
mod number;
mod render;
mod wire;
mod yaml;

#[cfg(test)]
mod diagnostics_test;
#[cfg(test)]
mod manifest_test;

pub use attr::{decode_attribute, AttributeType, AttributeValue};
pub use diagnostics::{AttributePath, Diagnostic, DiagnosticKind, Diagnostics, PathStep};
pub use error::{Error, Result};
pub use int_or_string::{ExternalScalar, IntOrStringType, IntOrStringValue, Scalar};
pub use manifest::{load_manifests, Manifest};
pub use number::Number;
pub use render::{AbsentPolicy, OutputFormat, RenderOptions};
pub use wire::{WireType, WireValue};
