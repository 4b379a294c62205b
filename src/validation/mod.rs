use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ApiError;

/// Field content constraint beyond presence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Declarative payload schema: which fields a resource accepts, which are
/// required, and the basic shape each must have.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

const ARTICLE_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "heading", kind: FieldKind::Text, required: true },
    FieldSpec { name: "content", kind: FieldKind::Text, required: true },
    FieldSpec { name: "image", kind: FieldKind::Text, required: false },
];

const QUERY_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", kind: FieldKind::Text, required: true },
    FieldSpec { name: "email", kind: FieldKind::Email, required: true },
    FieldSpec { name: "subject", kind: FieldKind::Text, required: true },
    FieldSpec { name: "message", kind: FieldKind::Text, required: true },
];

static REGISTRY: Lazy<HashMap<&'static str, Schema>> = Lazy::new(|| {
    let mut schemas = HashMap::new();
    schemas.insert("article", Schema { name: "article", fields: ARTICLE_FIELDS });
    schemas.insert("query", Schema { name: "query", fields: QUERY_FIELDS });
    schemas
});

pub fn schema(name: &str) -> &'static Schema {
    REGISTRY
        .get(name)
        .unwrap_or_else(|| panic!("unknown schema: {}", name))
}

/// Check a payload against a schema. Collects every violated field so the
/// client sees all problems at once, not just the first.
pub fn validate(schema: &Schema, payload: &Value) -> Result<(), ApiError> {
    let mut field_errors: HashMap<String, String> = HashMap::new();

    for field in schema.fields {
        match payload.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    field_errors
                        .insert(field.name.to_string(), "This field is required".to_string());
                }
            }
            Some(Value::String(s)) => {
                if s.trim().is_empty() {
                    field_errors
                        .insert(field.name.to_string(), "This field must not be empty".to_string());
                } else if field.kind == FieldKind::Email && !is_email_shaped(s) {
                    field_errors
                        .insert(field.name.to_string(), "This field must be a valid email".to_string());
                }
            }
            Some(_) => {
                field_errors.insert(field.name.to_string(), "This field must be a string".to_string());
            }
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Validation failed", Some(field_errors)))
    }
}

// local-part@domain with a dot somewhere in the domain
fn is_email_shaped(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_article_passes() {
        let payload = json!({"heading": "H", "content": "C", "image": "pic.png"});
        assert!(validate(schema("article"), &payload).is_ok());
    }

    #[test]
    fn article_image_is_optional() {
        let payload = json!({"heading": "H", "content": "C"});
        assert!(validate(schema("article"), &payload).is_ok());
    }

    #[test]
    fn reports_all_missing_fields_at_once() {
        let payload = json!({"name": "Gafuku Ramos", "message": "hello"});
        let err = validate(schema("query"), &payload).unwrap_err();

        match err {
            ApiError::ValidationError { field_errors: Some(fields), .. } => {
                assert_eq!(fields.len(), 2);
                assert!(fields.contains_key("email"));
                assert!(fields.contains_key("subject"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_required_string() {
        let payload = json!({"heading": "  ", "content": "C"});
        assert!(validate(schema("article"), &payload).is_err());
    }

    #[test]
    fn rejects_non_string_field() {
        let payload = json!({"heading": 7, "content": "C"});
        assert!(validate(schema("article"), &payload).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(is_email_shaped("gafuku@gmail.com"));
        assert!(!is_email_shaped("gafuku"));
        assert!(!is_email_shaped("gafuku@"));
        assert!(!is_email_shaped("@gmail.com"));
        assert!(!is_email_shaped("gafuku@gmail"));
        assert!(!is_email_shaped("gafuku@.com"));
    }
}
