//! Validate tool call arguments against JSON Schema before execution.

use serde_json::{Map, Value};

/// Validate tool arguments against a JSON Schema and apply defaults.
///
/// Checks the top-level shape, unknown fields (when the schema sets
/// `additionalProperties: false`), required field presence, property types,
/// enumerated values (including array items), numeric bounds, and minimum
/// string/array sizes. Absent or `null` optional fields are filled from their
/// declared `default`.
///
/// Returns the normalized argument object, or a message describing the
/// first violation found.
pub fn validate_arguments(args: &Value, schema: &Value) -> Result<Value, String> {
    let expects_object = schema.get("type").and_then(Value::as_str) == Some("object");

    let mut obj = match args {
        Value::Object(obj) => obj.clone(),
        Value::Null if expects_object => Map::new(),
        Value::Null => return Ok(Value::Null),
        other if expects_object => {
            return Err(format!(
                "expected object arguments, got {}",
                json_type_name(other)
            ))
        }
        other => return Ok(other.clone()),
    };

    // Explicit nulls are treated as "not provided".
    obj.retain(|_, v| !v.is_null());

    let properties = schema.get("properties").and_then(Value::as_object);

    if schema.get("additionalProperties") == Some(&Value::Bool(false)) {
        let known = |key: &str| properties.is_some_and(|p| p.contains_key(key));
        let mut unknown: Vec<&String> = obj.keys().filter(|k| !known(k)).collect();
        unknown.sort();
        if let Some(name) = unknown.first() {
            return Err(format!("unknown field '{name}'"));
        }
    }

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !obj.contains_key(name) {
                return Err(format!("missing required field '{name}'"));
            }
        }
    }

    if let Some(properties) = properties {
        for (key, value) in &obj {
            if let Some(prop_schema) = properties.get(key) {
                check_value(key, value, prop_schema)?;
            }
        }

        for (key, prop_schema) in properties {
            if obj.contains_key(key) {
                continue;
            }
            if let Some(default) = prop_schema.get("default") {
                obj.insert(key.clone(), default.clone());
            }
        }
    }

    Ok(Value::Object(obj))
}

fn check_value(field: &str, value: &Value, schema: &Value) -> Result<(), String> {
    if let Some(expected_type) = schema.get("type").and_then(Value::as_str) {
        if !value_matches_type(value, expected_type) {
            return Err(format!(
                "field '{}' expected type '{}', got {}",
                field,
                expected_type,
                json_type_name(value)
            ));
        }
    }

    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            return Err(format!(
                "field '{}' must be one of {}, got {}",
                field,
                render_allowed(allowed),
                value
            ));
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
            if n < min {
                return Err(format!("field '{field}' must be >= {min}, got {value}"));
            }
        }
        if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
            if n > max {
                return Err(format!("field '{field}' must be <= {max}, got {value}"));
            }
        }
    }

    if let (Some(s), Some(min)) = (value.as_str(), schema.get("minLength").and_then(Value::as_u64)) {
        if (s.trim().chars().count() as u64) < min {
            return Err(format!("field '{field}' must not be empty"));
        }
    }

    if let Some(items) = value.as_array() {
        if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                return Err(format!("field '{field}' needs at least {min} item(s)"));
            }
        }
        if let Some(item_schema) = schema.get("items") {
            for (idx, item) in items.iter().enumerate() {
                check_value(&format!("{field}[{idx}]"), item, item_schema)?;
            }
        }
    }

    Ok(())
}

fn render_allowed(allowed: &[Value]) -> String {
    allowed
        .iter()
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
        .collect::<Vec<_>>()
        .join("|")
}

fn value_matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_args_when_schema_expects_object() {
        let schema = json!({ "type": "object", "properties": {}, "required": [] });
        let args = json!("not an object");

        let result = validate_arguments(&args, &schema);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("expected object"));
    }

    #[test]
    fn null_args_become_empty_object() {
        let schema = json!({
            "type": "object",
            "properties": { "stream": { "type": "boolean", "default": true } },
            "required": [],
        });

        let result = validate_arguments(&Value::Null, &schema).unwrap();

        assert_eq!(result, json!({ "stream": true }));
    }

    #[test]
    fn rejects_missing_required_field() {
        let schema = json!({
            "type": "object",
            "properties": { "sourceCode": { "type": "string" } },
            "required": ["sourceCode"],
        });
        let args = json!({});

        let result = validate_arguments(&args, &schema);

        assert!(result
            .unwrap_err()
            .contains("missing required field 'sourceCode'"));
    }

    #[test]
    fn explicit_null_counts_as_missing() {
        let schema = json!({
            "type": "object",
            "properties": { "sourceCode": { "type": "string" } },
            "required": ["sourceCode"],
        });

        let result = validate_arguments(&json!({ "sourceCode": null }), &schema);

        assert!(result.unwrap_err().contains("'sourceCode'"));
    }

    #[test]
    fn rejects_when_any_required_field_is_absent() {
        let schema = json!({
            "type": "object",
            "properties": {
                "componentName": { "type": "string" },
                "themeDescription": { "type": "string" },
            },
            "required": ["componentName", "themeDescription"],
        });
        let args = json!({ "componentName": "Button" });

        let result = validate_arguments(&args, &schema);

        assert!(result
            .unwrap_err()
            .contains("missing required field 'themeDescription'"));
    }

    #[test]
    fn accepts_valid_args_with_all_required_fields() {
        let schema = json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "required": ["path"],
        });
        let args = json!({ "path": "test.txt" });

        assert_eq!(validate_arguments(&args, &schema).unwrap(), args);
    }

    #[test]
    fn accepts_any_args_when_schema_is_empty_object() {
        let schema = json!({});
        let args = json!({ "anything": 42 });

        let result = validate_arguments(&args, &schema);

        assert!(result.is_ok());
    }

    #[test]
    fn rejects_field_with_wrong_type() {
        let schema = json!({
            "type": "object",
            "properties": { "count": { "type": "integer" } },
            "required": ["count"],
        });
        let args = json!({ "count": "not a number" });

        let err = validate_arguments(&args, &schema).unwrap_err();

        assert!(err.contains("field 'count'"));
        assert!(err.contains("expected type 'integer'"));
    }

    #[test]
    fn accepts_extra_fields_when_schema_allows_them() {
        let schema = json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "required": ["path"],
        });
        let args = json!({ "path": "test.txt", "extra": true });

        assert!(validate_arguments(&args, &schema).is_ok());
    }

    #[test]
    fn rejects_unknown_fields_when_schema_is_closed() {
        let schema = json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "required": ["path"],
            "additionalProperties": false,
        });
        let args = json!({ "path": "test.txt", "colour": "red" });

        let err = validate_arguments(&args, &schema).unwrap_err();

        assert_eq!(err, "unknown field 'colour'");
    }

    #[test]
    fn rejects_value_outside_enum() {
        let schema = json!({
            "type": "object",
            "properties": {
                "stylingSystem": { "type": "string", "enum": ["tailwind", "emotion"] }
            },
        });

        let err = validate_arguments(&json!({ "stylingSystem": "bootstrap" }), &schema).unwrap_err();

        assert!(err.contains("must be one of tailwind|emotion"));
    }

    #[test]
    fn rejects_array_item_outside_enum() {
        let schema = json!({
            "type": "object",
            "properties": {
                "goals": {
                    "type": "array",
                    "items": { "type": "string", "enum": ["performance"] }
                }
            },
        });

        let err = validate_arguments(&json!({ "goals": ["performance", "speed"] }), &schema)
            .unwrap_err();

        assert!(err.contains("goals[1]"));
    }

    #[test]
    fn enforces_integer_minimum() {
        let schema = json!({
            "type": "object",
            "properties": { "maxTokens": { "type": "integer", "minimum": 1 } },
        });

        assert!(validate_arguments(&json!({ "maxTokens": 0 }), &schema).is_err());
        assert!(validate_arguments(&json!({ "maxTokens": -5 }), &schema).is_err());
        assert!(validate_arguments(&json!({ "maxTokens": 1 }), &schema).is_ok());
    }

    #[test]
    fn blank_required_string_fails_min_length() {
        let schema = json!({
            "type": "object",
            "properties": { "name": { "type": "string", "minLength": 1 } },
            "required": ["name"],
        });

        let err = validate_arguments(&json!({ "name": "   " }), &schema).unwrap_err();

        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn applies_defaults_for_absent_fields_only() {
        let schema = json!({
            "type": "object",
            "properties": {
                "stream": { "type": "boolean", "default": true },
                "props": { "type": "array", "items": { "type": "string" }, "default": [] },
            },
        });

        let result = validate_arguments(&json!({ "stream": false }), &schema).unwrap();

        assert_eq!(result, json!({ "stream": false, "props": [] }));
    }

    #[test]
    fn validates_boolean_type_correctly() {
        let schema = json!({
            "type": "object",
            "properties": { "flag": { "type": "boolean" } },
            "required": ["flag"],
        });

        assert!(validate_arguments(&json!({ "flag": true }), &schema).is_ok());
        assert!(validate_arguments(&json!({ "flag": "yes" }), &schema).is_err());
    }

    #[test]
    fn accepts_null_args_when_schema_has_no_type() {
        let schema = json!({});

        let result = validate_arguments(&Value::Null, &schema);

        assert_eq!(result.unwrap(), Value::Null);
    }
}
