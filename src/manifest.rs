//! Typed Kubernetes manifests.
//!
//! A [`Manifest`] pairs the standard `apiVersion`/`kind`/`metadata` header
//! with a typed `spec`. Specs use [`IntOrStringValue`](crate::IntOrStringValue)
//! for int-or-string fields, so rendering follows Kubernetes' scalar
//! conventions.

use crate::render::{prune_absent, AbsentPolicy, RenderOptions};
use crate::yaml::load_documents;
use crate::{Error, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<S> {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: S,
}

impl<S> Manifest<S> {
    pub fn new(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        spec: S,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            metadata: ObjectMeta {
                name: Some(name.into()),
                ..Default::default()
            },
            spec,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata.namespace = Some(namespace.into());
        self
    }

    /// Group, version and kind of the manifest. Core resources have an empty group.
    pub fn gvk(&self) -> Result<GroupVersionKind> {
        if self.api_version.is_empty() {
            return Err(Error::InvalidManifest("Missing apiVersion".to_string()));
        }
        if self.kind.is_empty() {
            return Err(Error::InvalidManifest("Missing kind".to_string()));
        }

        let (group, version) = self
            .api_version
            .split_once('/')
            .unwrap_or(("", self.api_version.as_str()));

        Ok(GroupVersionKind::gvk(group, version, &self.kind))
    }
}

impl<S: Serialize> Manifest<S> {
    /// Render the manifest as a YAML or JSON document.
    ///
    /// Fails if any int-or-string field holds a non-integer number; no partial
    /// document is produced.
    pub fn render(&self, options: &RenderOptions) -> Result<String> {
        let rendered = options.render(self)?;
        debug!(
            "Rendered manifest: {} {}",
            self.kind,
            self.metadata.name.as_deref().unwrap_or_default()
        );
        Ok(rendered)
    }

    /// Convert into the representation used by kube's dynamic API.
    pub fn to_dynamic_object(&self) -> Result<DynamicObject> {
        let gvk = self.gvk()?;
        let name = self
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| Error::InvalidManifest("Missing metadata.name".to_string()))?;

        let mut spec = serde_json::to_value(&self.spec).map_err(Error::from_serialization)?;
        prune_absent(&mut spec);

        let resource = ApiResource::from_gvk(&gvk);
        let mut object = DynamicObject::new(name, &resource).data(json!({ "spec": spec }));
        object.metadata = self.metadata.clone();
        Ok(object)
    }

    /// Serialize into a JSON tree, applying `absent`.
    pub fn to_value(&self, absent: AbsentPolicy) -> Result<Value> {
        RenderOptions::new().with_absent_policy(absent).to_value(self)
    }
}

impl<S: DeserializeOwned> Manifest<S> {
    /// Read a manifest back from a live dynamic object.
    pub fn from_dynamic_object(object: &DynamicObject) -> Result<Self> {
        let types = object
            .types
            .as_ref()
            .ok_or_else(|| Error::InvalidManifest("Missing apiVersion and kind".to_string()))?;

        let spec = object
            .data
            .get("spec")
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));

        Ok(Self {
            api_version: types.api_version.clone(),
            kind: types.kind.clone(),
            metadata: object.metadata.clone(),
            spec: serde_json::from_value(spec)?,
        })
    }
}

/// Parse a multi-document YAML stream into manifests.
///
/// Empty documents are skipped. Numbers keep their full source precision.
pub fn load_manifests<S: DeserializeOwned>(content: &str) -> Result<Vec<Manifest<S>>> {
    let mut manifests = Vec::new();

    for value in load_documents(content)? {
        if value.is_null() {
            continue;
        }

        let manifest: Manifest<S> = serde_json::from_value(value)?;
        manifest.gvk()?;
        manifests.push(manifest);
    }

    debug!("Loaded {} manifests", manifests.len());
    Ok(manifests)
}
