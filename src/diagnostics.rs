//! Attribute paths and path-qualified diagnostics.
//!
//! Diagnostics are collected across many attributes before being reported,
//! so each one carries its own path and message context.

use crate::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Attribute(String),
    Index(usize),
    Key(String),
}

/// Location of an attribute within a configuration tree.
///
/// Paths are immutable; the builder methods return extended copies.
///
/// ```
/// use kube_int_or_string::AttributePath;
///
/// let path = AttributePath::root().attribute("spec").attribute("ports").index(0);
/// assert_eq!(path.to_string(), "spec.ports[0]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.with_step(PathStep::Attribute(name.into()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.with_step(PathStep::Index(index))
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with_step(PathStep::Key(key.into()))
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if i == 0 => write!(f, "{}", name)?,
                PathStep::Attribute(name) => write!(f, ".{}", name)?,
                PathStep::Index(index) => write!(f, "[{}]", index)?,
                PathStep::Key(key) => write!(f, "[{:?}]", key)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The wire value has a type the attribute cannot hold.
    InvalidValueType,
    Conversion,
    NonIntegerNumber,
    /// An integer that does not fit the Kubernetes 32-bit representation.
    IntegerOutOfRange,
}

/// A path-qualified error found while decoding or rendering a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: AttributePath,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.summary, self.path, self.detail)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Record a crate error as an error diagnostic at `path`.
    pub fn push_error(&mut self, error: &Error, path: &AttributePath) {
        let (kind, summary) = match error {
            Error::NonIntegerNumber { .. } => {
                (DiagnosticKind::NonIntegerNumber, "Invalid integer value")
            }
            Error::IntegerOutOfRange { .. } => {
                (DiagnosticKind::IntegerOutOfRange, "Integer out of range")
            }
            _ => (DiagnosticKind::Conversion, "Value conversion error"),
        };
        self.push(Diagnostic::new(
            kind,
            path.clone(),
            summary,
            error.to_string(),
        ));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
