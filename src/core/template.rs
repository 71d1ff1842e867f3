use crate::utils::error::{GenError, Result};

pub const DEFAULT_PLACEHOLDER: &str = "{{SERVICES}}";

pub const DEFAULT_TEMPLATE: &str = "const services = [\n{{SERVICES}}\n];\n\nexport default services;\n";

/// 將序列化片段替換進模板中的佔位符
pub fn splice(template: &str, placeholder: &str, fragment: &str) -> Result<String> {
    if placeholder.is_empty() {
        return Err(GenError::TemplateError {
            message: "Placeholder token cannot be empty".to_string(),
        });
    }
    if !template.contains(placeholder) {
        return Err(GenError::TemplateError {
            message: format!("Template does not contain placeholder '{}'", placeholder),
        });
    }
    Ok(template.replace(placeholder, fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_default_template() {
        let out = splice(
            DEFAULT_TEMPLATE,
            DEFAULT_PLACEHOLDER,
            r#"  { name: "github", tld: "com" }"#,
        )
        .unwrap();
        assert!(out.starts_with("const services = [\n  { name: \"github\""));
        assert!(!out.contains(DEFAULT_PLACEHOLDER));
    }

    #[test]
    fn test_splice_requires_placeholder() {
        let err = splice("no token here", DEFAULT_PLACEHOLDER, "x").unwrap_err();
        assert!(matches!(err, GenError::TemplateError { .. }));
        assert!(splice("abc", "", "x").is_err());
    }
}
