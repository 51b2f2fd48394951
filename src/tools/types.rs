//! Tool parameter schemas.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// JSON Schema-based parameter definition for a tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolParameters {
    /// JSON Schema object describing the parameters.
    pub schema: Value,
}

impl ToolParameters {
    /// Create from a raw JSON Schema value.
    pub fn from_schema(schema: Value) -> Self {
        Self { schema }
    }

    /// Create an empty parameter schema (no parameters).
    pub fn empty() -> Self {
        Self {
            schema: json!({
                "type": "object",
                "properties": {},
                "required": [],
                "additionalProperties": false,
            }),
        }
    }

    /// Builder: create an object schema with properties.
    pub fn object() -> ParameterBuilder {
        ParameterBuilder {
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    /// The schema as a JSON object map.
    pub fn as_object(&self) -> Map<String, Value> {
        self.schema.as_object().cloned().unwrap_or_default()
    }

    /// Names of required properties, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Builder for constructing tool parameter schemas.
///
/// Built schemas reject unknown properties.
pub struct ParameterBuilder {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl ParameterBuilder {
    fn property(mut self, name: impl Into<String>, schema: Value, required: bool) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), schema);
        if required {
            self.required.push(name);
        }
        self
    }

    /// Add a string property. Required strings must be non-empty.
    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let mut schema = json!({
            "type": "string",
            "description": description.into(),
        });
        if required {
            schema["minLength"] = json!(1);
        }
        self.property(name, schema, required)
    }

    /// Add an integer property with optional inclusive bounds.
    pub fn integer(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        minimum: Option<i64>,
        maximum: Option<i64>,
        required: bool,
    ) -> Self {
        let mut schema = json!({
            "type": "integer",
            "description": description.into(),
        });
        if let Some(min) = minimum {
            schema["minimum"] = json!(min);
        }
        if let Some(max) = maximum {
            schema["maximum"] = json!(max);
        }
        self.property(name, schema, required)
    }

    /// Add a boolean property.
    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let schema = json!({
            "type": "boolean",
            "description": description.into(),
        });
        self.property(name, schema, required)
    }

    /// Add an enum (string) property.
    pub fn string_enum(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let schema = json!({
            "type": "string",
            "description": description.into(),
            "enum": values,
        });
        self.property(name, schema, required)
    }

    /// Add a list of free-form strings.
    pub fn string_list(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let mut schema = json!({
            "type": "array",
            "description": description.into(),
            "items": { "type": "string" },
        });
        if required {
            schema["minItems"] = json!(1);
        }
        self.property(name, schema, required)
    }

    /// Add a list whose items come from a fixed set of strings.
    pub fn enum_list(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let schema = json!({
            "type": "array",
            "description": description.into(),
            "items": { "type": "string", "enum": values },
        });
        self.property(name, schema, required)
    }

    /// Attach a default to an already declared property.
    ///
    /// Has no effect when `name` has not been declared.
    pub fn default_value(mut self, name: &str, value: Value) -> Self {
        if let Some(Value::Object(prop)) = self.properties.get_mut(name) {
            prop.insert("default".into(), value);
        }
        self
    }

    /// Build into ToolParameters.
    pub fn build(self) -> ToolParameters {
        ToolParameters {
            schema: json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
                "additionalProperties": false,
            }),
        }
    }
}
