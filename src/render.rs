//! Options controlling how manifests are serialized.

use crate::yaml::to_yaml_value;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// What to do with fields whose value is absent (null or unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentPolicy {
    /// Drop the field from the document.
    #[default]
    Omit,
    /// Keep the field with an explicit `null`.
    EmitNull,
}

/// Rendering configuration
///
/// Defaults to YAML output with absent fields omitted, which is what
/// `kubectl apply` expects.
///
/// # Example
///
/// ```rust
/// use kube_int_or_string::{AbsentPolicy, OutputFormat, RenderOptions};
/// use serde_json::json;
///
/// let options = RenderOptions::new()
///     .with_format(OutputFormat::Json)
///     .with_absent_policy(AbsentPolicy::EmitNull)
///     .with_compact_json();
///
/// let rendered = options.render(&json!({"port": null})).unwrap();
/// assert_eq!(rendered, r#"{"port":null}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    format: OutputFormat,
    absent: AbsentPolicy,
    pretty: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self {
            format: OutputFormat::Yaml,
            absent: AbsentPolicy::Omit,
            pretty: true,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_absent_policy(mut self, absent: AbsentPolicy) -> Self {
        self.absent = absent;
        self
    }

    /// Emit JSON on a single line. Has no effect on YAML output.
    pub fn with_compact_json(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn absent_policy(&self) -> AbsentPolicy {
        self.absent
    }

    /// Serialize `value` into a JSON tree with the absent policy applied.
    ///
    /// A non-integer number in an int-or-string field fails with
    /// [`Error::NonIntegerNumber`].
    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        let mut tree = serde_json::to_value(value).map_err(Error::from_serialization)?;
        if self.absent == AbsentPolicy::Omit {
            prune_absent(&mut tree);
        }
        Ok(tree)
    }

    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let tree = self.to_value(value)?;
        let rendered = match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(&to_yaml_value(tree))?,
            OutputFormat::Json if self.pretty => serde_json::to_string_pretty(&tree)?,
            OutputFormat::Json => serde_json::to_string(&tree)?,
        };
        Ok(rendered)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove null fields from every object in the tree.
///
/// Nulls inside arrays are kept so element positions do not shift.
pub(crate) fn prune_absent(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            fields.retain(|_, v| !v.is_null());
            fields.values_mut().for_each(prune_absent);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_absent),
        _ => {}
    }
}
