#[cfg(test)]
mod tests {
    use crate::manifest::{load_manifests, Manifest};
    use crate::render::{AbsentPolicy, OutputFormat, RenderOptions};
    use crate::diagnostics::{AttributePath, DiagnosticKind, Diagnostics};
    use crate::{Error, IntOrStringValue, Number};
    use kube::core::{DynamicObject, TypeMeta};
    use kube::{CustomResource, CustomResourceExt};
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};
    use serde_json::{json, Value};

    #[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
    #[kube(group = "policy.example.com", version = "v1", kind = "Budget", namespaced)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetSpec {
        #[serde(default, skip_serializing_if = "IntOrStringValue::is_absent")]
        pub min_available: IntOrStringValue,
        #[serde(default, skip_serializing_if = "IntOrStringValue::is_absent")]
        pub max_unavailable: IntOrStringValue,
    }

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct PortSpec {
        #[serde(default)]
        target_port: IntOrStringValue,
    }

    fn budget(min_available: IntOrStringValue) -> Manifest<BudgetSpec> {
        Manifest::new(
            "policy.example.com/v1",
            "Budget",
            "web",
            BudgetSpec {
                min_available,
                max_unavailable: IntOrStringValue::unknown(),
            },
        )
        .with_namespace("default")
    }

    #[test]
    fn test_gvk() {
        let gvk = budget(IntOrStringValue::null()).gvk().unwrap();
        assert_eq!(gvk.group, "policy.example.com");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.kind, "Budget");

        let core = Manifest::new("v1", "Service", "web", ()).gvk().unwrap();
        assert_eq!(core.group, "");
        assert_eq!(core.version, "v1");
    }

    #[test]
    fn test_gvk_requires_header() {
        let missing_kind = Manifest::new("v1", "", "web", ());
        assert!(matches!(missing_kind.gvk(), Err(Error::InvalidManifest(_))));

        let missing_version = Manifest::new("", "Service", "web", ());
        assert!(matches!(missing_version.gvk(), Err(Error::InvalidManifest(_))));
    }

    #[test]
    fn test_render_yaml_promotes_integer_strings() {
        let rendered = budget(IntOrStringValue::string("2"))
            .render(&RenderOptions::new())
            .unwrap();

        let parsed: Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed["apiVersion"], json!("policy.example.com/v1"));
        assert_eq!(parsed["kind"], json!("Budget"));
        assert_eq!(parsed["metadata"]["name"], json!("web"));
        assert_eq!(parsed["metadata"]["namespace"], json!("default"));
        assert_eq!(parsed["spec"], json!({"minAvailable": 2}));
        assert!(rendered.contains("minAvailable: 2"));
    }

    #[test]
    fn test_render_keeps_non_integer_strings() {
        let rendered = budget(IntOrStringValue::string("50%"))
            .render(&RenderOptions::new().with_format(OutputFormat::Json))
            .unwrap();

        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["spec"], json!({"minAvailable": "50%"}));
    }

    #[test]
    fn test_render_absent_policy() {
        let manifest = Manifest::new(
            "v1",
            "Service",
            "web",
            PortSpec {
                target_port: IntOrStringValue::unknown(),
            },
        );

        let omitted = manifest.to_value(AbsentPolicy::Omit).unwrap();
        assert_eq!(omitted["spec"], json!({}));

        let emitted = manifest.to_value(AbsentPolicy::EmitNull).unwrap();
        assert_eq!(emitted["spec"], json!({"targetPort": null}));

        let rendered = manifest
            .render(&RenderOptions::new().with_absent_policy(AbsentPolicy::EmitNull))
            .unwrap();
        assert!(rendered.contains("targetPort: null"));
    }

    #[test]
    fn test_render_fails_on_non_integer_number() {
        let number: Number = "2.5".parse().unwrap();
        let result = budget(IntOrStringValue::number(number)).render(&RenderOptions::new());

        match result {
            Err(Error::NonIntegerNumber { value }) => assert_eq!(value, "2.5"),
            other => panic!("expected a non-integer number error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_error_maps_to_non_integer_diagnostic() {
        let number: Number = "2.5".parse().unwrap();
        let manifest = budget(IntOrStringValue::number(number));

        let err = manifest.to_dynamic_object().unwrap_err();
        assert!(matches!(err, Error::NonIntegerNumber { .. }));

        let path = AttributePath::root().attribute("spec").attribute("min_available");
        let mut diags = Diagnostics::new();
        diags.push_error(&err, &path);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::NonIntegerNumber);
        assert_eq!(diag.detail, "Expected an exact integer, got 2.5");
    }

    #[test]
    fn test_dynamic_object_round_trip() {
        let manifest = budget(IntOrStringValue::string("2"));
        let object = manifest.to_dynamic_object().unwrap();

        let types = object.types.as_ref().unwrap();
        assert_eq!(types.api_version, "policy.example.com/v1");
        assert_eq!(types.kind, "Budget");
        assert_eq!(object.metadata.name.as_deref(), Some("web"));
        assert_eq!(object.metadata.namespace.as_deref(), Some("default"));
        assert_eq!(object.data, json!({"spec": {"minAvailable": 2}}));

        let read: Manifest<BudgetSpec> = Manifest::from_dynamic_object(&object).unwrap();
        assert_eq!(read.api_version, manifest.api_version);
        assert_eq!(read.metadata, manifest.metadata);
        // The promoted string comes back as a number, unknown comes back as null.
        assert_eq!(read.spec.min_available, IntOrStringValue::number(2i64));
        assert_eq!(read.spec.max_unavailable, IntOrStringValue::null());
    }

    #[test]
    fn test_dynamic_object_requires_name() {
        let mut manifest = budget(IntOrStringValue::null());
        manifest.metadata.name = None;
        assert!(matches!(
            manifest.to_dynamic_object(),
            Err(Error::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_from_dynamic_object_requires_types() {
        let object = DynamicObject {
            types: None,
            metadata: Default::default(),
            data: json!({"spec": {}}),
        };
        let result: crate::Result<Manifest<BudgetSpec>> = Manifest::from_dynamic_object(&object);
        assert!(matches!(result, Err(Error::InvalidManifest(_))));
    }

    #[test]
    fn test_load_manifests() {
        let content = r#"
apiVersion: v1
kind: Service
metadata:
  name: web
spec:
  targetPort: http
---
---
apiVersion: v1
kind: Service
metadata:
  name: api
spec:
  targetPort: 8080
"#;

        let manifests: Vec<Manifest<PortSpec>> = load_manifests(content).unwrap();
        assert_eq!(manifests.len(), 2);
        assert_eq!(manifests[0].metadata.name.as_deref(), Some("web"));
        assert_eq!(manifests[0].spec.target_port, IntOrStringValue::string("http"));
        assert_eq!(manifests[1].spec.target_port, IntOrStringValue::number(8080i64));
    }

    #[test]
    fn test_load_manifests_keeps_number_precision() {
        let content = r#"
apiVersion: v1
kind: Service
metadata:
  name: web
spec:
  targetPort: 80.0000000000000001
---
apiVersion: v1
kind: Service
metadata:
  name: api
spec:
  targetPort: 80.0
"#;

        let manifests: Vec<Manifest<PortSpec>> = load_manifests(content).unwrap();
        assert_eq!(manifests.len(), 2);

        let exact: Number = "80.0000000000000001".parse().unwrap();
        assert_eq!(manifests[0].spec.target_port, IntOrStringValue::number(exact));
        match manifests[0].render(&RenderOptions::new()) {
            Err(Error::NonIntegerNumber { value }) => assert_eq!(value, "80.0000000000000001"),
            other => panic!("expected a non-integer number error, got {:?}", other),
        }

        assert_eq!(manifests[1].spec.target_port, IntOrStringValue::number(80i64));
        let rendered = manifests[1].render(&RenderOptions::new()).unwrap();
        assert!(rendered.contains("targetPort: 80\n"));
    }

    #[test]
    fn test_from_dynamic_object_keeps_number_precision() {
        let object = DynamicObject {
            types: Some(TypeMeta {
                api_version: "v1".to_string(),
                kind: "Service".to_string(),
            }),
            metadata: Default::default(),
            data: serde_json::from_str(r#"{"spec": {"targetPort": 80.0000000000000001}}"#).unwrap(),
        };

        let manifest: Manifest<PortSpec> = Manifest::from_dynamic_object(&object).unwrap();
        assert!(matches!(
            manifest.spec.target_port.to_external_scalar(),
            Err(Error::NonIntegerNumber { .. })
        ));
    }

    #[test]
    fn test_load_manifests_rejects_bad_documents() {
        let content = "apiVersion: v1\nkind: Service\nspec:\n  targetPort: true\n";
        let result: crate::Result<Vec<Manifest<PortSpec>>> = load_manifests(content);
        assert!(matches!(result, Err(Error::SerializationError(_))));

        let content = "apiVersion: v1\nkind: ''\nspec: {}\n";
        let result: crate::Result<Vec<Manifest<PortSpec>>> = load_manifests(content);
        assert!(matches!(result, Err(Error::InvalidManifest(_))));
    }

    #[test]
    fn test_crd_schema_marks_int_or_string() {
        let crd = serde_json::to_value(Budget::crd()).unwrap();
        let spec = &crd["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]["spec"];

        let min_available = &spec["properties"]["minAvailable"];
        assert_eq!(min_available["x-kubernetes-int-or-string"], json!(true));
        assert!(min_available.get("type").is_none());
    }
}
