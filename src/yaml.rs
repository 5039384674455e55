//! YAML reading and writing that keeps numbers exact.
//!
//! serde_yaml resolves every non-integer scalar through `f64`, so
//! `80.0000000000000001` would arrive as `80.0`. Loading therefore runs in two
//! passes: the first builds the document tree as usual, the second re-reads
//! the scalars that the first pass turned into inexact numbers and keeps
//! their source text.

use crate::number::Number;
use crate::Result;
use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::trace;

/// Parse a multi-document YAML stream into JSON trees, one per document.
pub(crate) fn load_documents(content: &str) -> Result<Vec<Value>> {
    let mut shapes = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        shapes.push(Value::deserialize(document)?);
    }

    let mut documents = Vec::with_capacity(shapes.len());
    for (document, shape) in serde_yaml::Deserializer::from_str(content).zip(&shapes) {
        documents.push(ExactSeed(shape).deserialize(document)?);
    }
    Ok(documents)
}

/// Convert a JSON tree into a YAML tree for emission.
///
/// Integers stay integers. Other numbers become YAML floats.
pub(crate) fn to_yaml_value(value: Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                serde_yaml::Value::Number(u.into())
            } else if let Some(i) = n.as_i64() {
                serde_yaml::Value::Number(i.into())
            } else if let Some(f) = n.as_f64() {
                serde_yaml::Value::Number(f.into())
            } else {
                serde_yaml::Value::String(n.to_string())
            }
        }
        Value::String(s) => serde_yaml::Value::String(s),
        Value::Array(items) => {
            serde_yaml::Value::Sequence(items.into_iter().map(to_yaml_value).collect())
        }
        Value::Object(fields) => serde_yaml::Value::Mapping(
            fields
                .into_iter()
                .map(|(k, v)| (serde_yaml::Value::String(k), to_yaml_value(v)))
                .collect(),
        ),
    }
}

/// Text of `raw` as an exact JSON number, if it is a decimal literal.
fn exact_number(raw: &str) -> Option<serde_json::Number> {
    let number = raw.parse::<Number>().ok()?;
    number.to_string().parse().ok()
}

/// Re-reads a document guided by the tree the first pass produced.
struct ExactSeed<'a>(&'a Value);

impl<'de> DeserializeSeed<'de> for ExactSeed<'_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self.0 {
            Value::Number(n) if !n.is_u64() && !n.is_i64() => {
                let raw = String::deserialize(deserializer)?;
                trace!("Re-reading number {} from source text {:?}", n, raw);
                Ok(exact_number(&raw)
                    .map(Value::Number)
                    .unwrap_or_else(|| self.0.clone()))
            }
            Value::Array(items) => deserializer.deserialize_seq(ExactSeqVisitor(items)),
            Value::Object(fields) => deserializer.deserialize_map(ExactMapVisitor(fields)),
            other => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(other.clone())
            }
        }
    }
}

struct ExactSeqVisitor<'a>(&'a [Value]);

impl<'de> Visitor<'de> for ExactSeqVisitor<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(self.0.len());
        for shape in self.0 {
            match seq.next_element_seed(ExactSeed(shape))? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Value::Array(items))
    }
}

struct ExactMapVisitor<'a>(&'a Map<String, Value>);

impl<'de> Visitor<'de> for ExactMapVisitor<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = match self.0.get(&key) {
                Some(shape) => map.next_value_seed(ExactSeed(shape))?,
                None => map.next_value::<Value>()?,
            };
            fields.insert(key, value);
        }
        Ok(Value::Object(fields))
    }
}
