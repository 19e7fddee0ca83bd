//! JSON Schema Validator - structural validation of tool payloads.
//!
//! Supports the subset of JSON Schema that tool parameter schemas use:
//! `type`, `enum`, `const`, `required`, `properties`,
//! `additionalProperties`, `minLength`, `maxLength`, `pattern`,
//! `minimum`, `maximum`, `items`, `minItems` and `maxItems`.
//! Unknown keywords are ignored. All violations are collected rather than
//! stopping at the first one.

use regex::Regex;
use serde_json::{Map, Value};

use crate::ports::{SchemaValidationError, ToolSchemaValidator};

const ROOT: &str = "(root)";

/// Validator for the supported JSON Schema subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, value: &Value, schema: &Value, path: &str, errors: &mut Vec<SchemaValidationError>) {
        let schema = match schema.as_object() {
            Some(schema) => schema,
            // `true`, `{}` and anything non-object accept every value.
            None => {
                if schema == &Value::Bool(false) {
                    errors.push(SchemaValidationError::Generic {
                        message: format!("{} is not allowed", Self::display_path(path)),
                    });
                }
                return;
            }
        };

        if let Some(expected) = schema.get("type") {
            if !Self::matches_type(value, expected) {
                errors.push(SchemaValidationError::InvalidType {
                    field: Self::display_path(path),
                    expected: Self::expected_types(expected),
                    actual: Self::type_name(value).to_string(),
                });
                return;
            }
        }

        if let Some(Value::Array(allowed)) = schema.get("enum") {
            if !allowed.contains(value) {
                errors.push(SchemaValidationError::Generic {
                    message: format!(
                        "{} must be one of: {}, got {}",
                        Self::display_path(path),
                        Value::Array(allowed.clone()),
                        value
                    ),
                });
            }
        }

        if let Some(constant) = schema.get("const") {
            if constant != value {
                errors.push(SchemaValidationError::Generic {
                    message: format!("{} must equal {}", Self::display_path(path), constant),
                });
            }
        }

        match value {
            Value::Object(obj) => self.check_object(obj, schema, path, errors),
            Value::String(s) => self.check_string(s, schema, path, errors),
            Value::Number(_) => self.check_number(value, schema, path, errors),
            Value::Array(items) => self.check_array(items, schema, path, errors),
            _ => {}
        }
    }

    fn check_object(
        &self,
        obj: &Map<String, Value>,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        if let Some(Value::Array(required)) = schema.get("required") {
            for field in required.iter().filter_map(Value::as_str) {
                if !obj.contains_key(field) {
                    errors.push(SchemaValidationError::MissingRequired {
                        field: Self::child_path(path, field),
                    });
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);

        for (name, child) in obj {
            let child_path = Self::child_path(path, name);
            match properties.and_then(|props| props.get(name)) {
                Some(child_schema) => self.check(child, child_schema, &child_path, errors),
                None => match schema.get("additionalProperties") {
                    Some(Value::Bool(false)) => {
                        errors.push(SchemaValidationError::UnexpectedField { field: child_path });
                    }
                    Some(extra @ Value::Object(_)) => self.check(child, extra, &child_path, errors),
                    _ => {}
                },
            }
        }
    }

    fn check_string(
        &self,
        s: &str,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        let len = s.chars().count() as u64;

        if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
            if len < min {
                errors.push(SchemaValidationError::Generic {
                    message: format!(
                        "{} must be at least {} characters, got {}",
                        Self::display_path(path),
                        min,
                        len
                    ),
                });
            }
        }

        if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
            if len > max {
                errors.push(SchemaValidationError::Generic {
                    message: format!(
                        "{} must be at most {} characters, got {}",
                        Self::display_path(path),
                        max,
                        len
                    ),
                });
            }
        }

        if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
            match Regex::new(pattern) {
                Ok(re) if !re.is_match(s) => errors.push(SchemaValidationError::InvalidFormat {
                    field: Self::display_path(path),
                    format: pattern.to_string(),
                }),
                Ok(_) => {}
                Err(e) => errors.push(SchemaValidationError::Generic {
                    message: format!("invalid pattern for {}: {}", Self::display_path(path), e),
                }),
            }
        }
    }

    fn check_number(
        &self,
        value: &Value,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        let Some(n) = value.as_f64() else {
            return;
        };
        let min = schema.get("minimum").and_then(Value::as_f64);
        let max = schema.get("maximum").and_then(Value::as_f64);

        let below = min.is_some_and(|m| n < m);
        let above = max.is_some_and(|m| n > m);
        if below || above {
            errors.push(SchemaValidationError::OutOfRange {
                field: Self::display_path(path),
                value: value.to_string(),
                min: min.map(|m| m.to_string()).unwrap_or_else(|| "-inf".to_string()),
                max: max.map(|m| m.to_string()).unwrap_or_else(|| "inf".to_string()),
            });
        }
    }

    fn check_array(
        &self,
        items: &[Value],
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        let len = items.len() as u64;
        if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
            if len < min {
                errors.push(SchemaValidationError::Generic {
                    message: format!(
                        "{} requires at least {} items, got {}",
                        Self::display_path(path),
                        min,
                        len
                    ),
                });
            }
        }
        if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
            if len > max {
                errors.push(SchemaValidationError::Generic {
                    message: format!(
                        "{} allows at most {} items, got {}",
                        Self::display_path(path),
                        max,
                        len
                    ),
                });
            }
        }
        if let Some(item_schema) = schema.get("items") {
            for (i, item) in items.iter().enumerate() {
                self.check(item, item_schema, &format!("{}[{}]", path, i), errors);
            }
        }
    }

    fn matches_type(value: &Value, expected: &Value) -> bool {
        match expected {
            Value::String(name) => Self::is_type(value, name),
            Value::Array(names) => names
                .iter()
                .filter_map(Value::as_str)
                .any(|name| Self::is_type(value, name)),
            _ => true,
        }
    }

    fn is_type(value: &Value, name: &str) -> bool {
        match name {
            "null" => value.is_null(),
            "boolean" => value.is_boolean(),
            "object" => value.is_object(),
            "array" => value.is_array(),
            "string" => value.is_string(),
            "number" => value.is_number(),
            "integer" => value.is_i64() || value.is_u64(),
            _ => true,
        }
    }

    fn expected_types(expected: &Value) -> String {
        match expected {
            Value::Array(names) => names
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(" or "),
            Value::String(name) => name.clone(),
            other => other.to_string(),
        }
    }

    fn type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn child_path(parent: &str, field: &str) -> String {
        if parent.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", parent, field)
        }
    }

    fn display_path(path: &str) -> String {
        if path.is_empty() {
            ROOT.to_string()
        } else {
            path.to_string()
        }
    }
}

impl ToolSchemaValidator for JsonSchemaValidator {
    fn validate(&self, payload: &Value, schema: &Value) -> Result<(), SchemaValidationError> {
        let mut errors = Vec::new();
        self.check(payload, schema, "", &mut errors);
        match SchemaValidationError::from_errors(errors) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> JsonSchemaValidator {
        JsonSchemaValidator::new()
    }

    fn order_schema() -> Value {
        json!({
            "type": "object",
            "required": ["tool", "params"],
            "additionalProperties": false,
            "properties": {
                "tool": { "type": "string", "enum": ["queryOrder"] },
                "params": {
                    "type": "object",
                    "required": ["orderId"],
                    "additionalProperties": false,
                    "properties": {
                        "orderId": { "type": "string", "minLength": 1 }
                    }
                }
            }
        })
    }

    #[test]
    fn valid_envelope_passes() {
        let payload = json!({"tool": "queryOrder", "params": {"orderId": "OP12345"}});
        assert!(validator().validate(&payload, &order_schema()).is_ok());
    }

    #[test]
    fn missing_nested_field_is_reported_with_path() {
        let payload = json!({"tool": "queryOrder", "params": {}});
        let err = validator().validate(&payload, &order_schema()).unwrap_err();
        assert_eq!(
            err,
            SchemaValidationError::MissingRequired {
                field: "params.orderId".to_string()
            }
        );
    }

    #[test]
    fn wrong_type_is_reported() {
        let payload = json!({"tool": "queryOrder", "params": {"orderId": 12345}});
        match validator().validate(&payload, &order_schema()).unwrap_err() {
            SchemaValidationError::InvalidType { field, expected, actual } => {
                assert_eq!(field, "params.orderId");
                assert_eq!(expected, "string");
                assert_eq!(actual, "number");
            }
            other => panic!("Expected InvalidType, got {:?}", other),
        }
    }

    #[test]
    fn unexpected_field_is_rejected_when_closed() {
        let payload = json!({"tool": "queryOrder", "params": {"orderId": "1", "extra": true}});
        let err = validator().validate(&payload, &order_schema()).unwrap_err();
        assert_eq!(
            err,
            SchemaValidationError::UnexpectedField {
                field: "params.extra".to_string()
            }
        );
    }

    #[test]
    fn enum_mismatch_is_reported() {
        let payload = json!({"tool": "deleteOrder", "params": {"orderId": "1"}});
        let err = validator().validate(&payload, &order_schema()).unwrap_err();
        assert!(err.to_string().contains("tool must be one of"));
    }

    #[test]
    fn empty_string_fails_min_length() {
        let payload = json!({"tool": "queryOrder", "params": {"orderId": ""}});
        let err = validator().validate(&payload, &order_schema()).unwrap_err();
        assert!(err.to_string().contains("at least 1 characters"));
    }

    #[test]
    fn multiple_violations_are_collected() {
        let payload = json!({"params": {"orderId": 1}, "x": 1});
        let err = validator().validate(&payload, &order_schema()).unwrap_err();
        assert_eq!(err.error_count(), 3);
    }

    #[test]
    fn root_type_mismatch_uses_root_label() {
        let err = validator().validate(&json!([1, 2]), &order_schema()).unwrap_err();
        assert!(err.to_string().contains("(root)"));
    }

    #[test]
    fn pattern_is_enforced() {
        let schema = json!({"type": "string", "pattern": "^OP\\d{5}$"});
        assert!(validator().validate(&json!("OP12345"), &schema).is_ok());
        assert!(matches!(
            validator().validate(&json!("12345"), &schema),
            Err(SchemaValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn numeric_bounds_are_enforced() {
        let schema = json!({"type": "integer", "minimum": 1, "maximum": 10});
        assert!(validator().validate(&json!(5), &schema).is_ok());
        assert!(matches!(
            validator().validate(&json!(11), &schema),
            Err(SchemaValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validator().validate(&json!(2.5), &schema),
            Err(SchemaValidationError::InvalidType { .. })
        ));
    }

    #[test]
    fn array_items_are_validated() {
        let schema = json!({"type": "array", "minItems": 1, "items": {"type": "string"}});
        assert!(validator().validate(&json!(["a"]), &schema).is_ok());
        assert!(validator().validate(&json!([]), &schema).is_err());
        let err = validator().validate(&json!(["a", 2]), &schema).unwrap_err();
        assert!(err.to_string().contains("[1]"));
    }

    #[test]
    fn open_objects_accept_extra_fields() {
        let schema = json!({"type": "object", "properties": {"a": {"type": "string"}}});
        assert!(validator().validate(&json!({"a": "x", "b": 1}), &schema).is_ok());
    }

    #[test]
    fn empty_schema_accepts_anything() {
        assert!(validator().validate(&json!({"anything": [1, 2]}), &json!({})).is_ok());
    }
}
