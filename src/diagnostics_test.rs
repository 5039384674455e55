#[cfg(test)]
mod tests {
    use crate::diagnostics::*;
    use crate::number::Number;
    use crate::Error;

    #[test]
    fn test_path_display() {
        assert_eq!(AttributePath::root().to_string(), "<root>");

        let path = AttributePath::root()
            .attribute("spec")
            .attribute("ports")
            .index(1)
            .key("http")
            .attribute("target_port");
        assert_eq!(path.to_string(), r#"spec.ports[1]["http"].target_port"#);
    }

    #[test]
    fn test_path_is_immutable() {
        let spec = AttributePath::root().attribute("spec");
        let left = spec.attribute("a");
        let right = spec.attribute("b");

        assert_eq!(spec.steps().len(), 1);
        assert_eq!(left.steps()[1], PathStep::Attribute("a".to_string()));
        assert_eq!(right.steps()[1], PathStep::Attribute("b".to_string()));
        assert!(!spec.is_root());
    }

    #[test]
    fn test_push_error_kinds() {
        let path = AttributePath::root().attribute("port");
        let mut diags = Diagnostics::new();

        let non_integer = Error::NonIntegerNumber {
            value: "1.5".parse::<Number>().unwrap().to_string(),
        };
        diags.push_error(&non_integer, &path);
        diags.push_error(&Error::InvalidNumber("x".to_string()), &path);

        let kinds: Vec<_> = diags.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::NonIntegerNumber, DiagnosticKind::Conversion]
        );
        assert_eq!(diags.len(), 2);

        let first = diags.iter().next().unwrap();
        assert!(first.detail.contains("1.5"));
        assert_eq!(
            first.to_string(),
            "Invalid integer value at port: Expected an exact integer, got 1.5"
        );
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut all = Diagnostics::new();
        assert!(all.is_empty());

        let mut first = Diagnostics::new();
        first.push(Diagnostic::new(
            DiagnosticKind::InvalidValueType,
            AttributePath::root().attribute("a"),
            "one",
            "",
        ));
        let mut second = Diagnostics::new();
        second.push(Diagnostic {
            kind: DiagnosticKind::Conversion,
            path: AttributePath::root().attribute("b"),
            summary: "two".to_string(),
            detail: String::new(),
        });

        all.extend(first);
        all.extend(second);

        let summaries: Vec<_> = (&all).into_iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, vec!["one", "two"]);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_push_error_out_of_range() {
        let path = AttributePath::root().attribute("spec").attribute("port");
        let mut diags = Diagnostics::new();
        diags.push_error(&Error::IntegerOutOfRange { value: 1 << 40 }, &path);

        let diag = diags.into_iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::IntegerOutOfRange);
        assert_eq!(diag.summary, "Integer out of range");
        assert_eq!(diag.path, path);
    }
}
