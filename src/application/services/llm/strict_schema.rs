//! Strict output-schema adaptation
//!
//! Strict structured-output providers reject object schemas that allow extra
//! keys or leave any declared property optional. The document model keeps
//! its optional and defaulted fields; this module rewrites a copy of the
//! generated schema so every object node with declared properties forbids
//! additional properties and requires all of them.
//!
//! Object schemas nest under `properties`, `items`, `definitions`/`$defs`
//! and `anyOf`/`oneOf`/`allOf`, so the walk visits every value of every
//! object and every element of every array.

use schemars::JsonSchema;
use serde_json::{Map, Value};

/// Return a strict copy of `schema`. The input is left untouched.
pub fn to_strict_schema(schema: &Value) -> Value {
    let mut strict = schema.clone();
    enforce_strict(&mut strict);
    strict
}

/// Introspect `T` as a plain JSON Schema value
pub fn schema_for<T: JsonSchema>() -> Value {
    let root = schemars::schema_for!(T);
    // RootSchema is plain data; serialization cannot fail
    serde_json::to_value(root).unwrap_or(Value::Null)
}

fn enforce_strict(node: &mut Value) {
    match node {
        Value::Object(map) => {
            if declares_object_properties(map) {
                lock_object_node(map);
            }
            for child in map.values_mut() {
                enforce_strict(child);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                enforce_strict(item);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn declares_object_properties(map: &Map<String, Value>) -> bool {
    let is_object = match map.get("type") {
        Some(Value::String(t)) => t == "object",
        _ => false,
    };
    let has_properties = matches!(map.get("properties"), Some(Value::Object(p)) if !p.is_empty());
    is_object && has_properties
}

fn lock_object_node(map: &mut Map<String, Value>) {
    let mut required: Vec<String> = match map.get("properties") {
        Some(Value::Object(properties)) => properties.keys().cloned().collect(),
        _ => return,
    };
    required.sort();

    map.insert("additionalProperties".to_string(), Value::Bool(false));
    map.insert(
        "required".to_string(),
        Value::Array(required.into_iter().map(Value::String).collect()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        AdventureOutline, DetailedAdventureOutline, ExpandedSceneGuide, OutlineResponse,
    };
    use serde_json::json;

    /// Assert every object node with properties is locked down
    fn assert_strict(node: &Value, path: &str) {
        match node {
            Value::Object(map) => {
                if declares_object_properties(map) {
                    assert_eq!(
                        map.get("additionalProperties"),
                        Some(&Value::Bool(false)),
                        "additionalProperties at {}",
                        path
                    );
                    let mut keys: Vec<&String> = map["properties"]
                        .as_object()
                        .map(|p| p.keys().collect())
                        .unwrap_or_default();
                    keys.sort();
                    let required: Vec<&str> = map["required"]
                        .as_array()
                        .unwrap()
                        .iter()
                        .map(|v| v.as_str().unwrap())
                        .collect();
                    let keys: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
                    assert_eq!(required, keys, "required at {}", path);
                }
                for (key, child) in map {
                    assert_strict(child, &format!("{}/{}", path, key));
                }
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    assert_strict(item, &format!("{}[{}]", path, idx));
                }
            }
            _ => {}
        }
    }

    fn count_locked_nodes(node: &Value) -> usize {
        match node {
            Value::Object(map) => {
                let own = usize::from(declares_object_properties(map));
                own + map.values().map(count_locked_nodes).sum::<usize>()
            }
            Value::Array(items) => items.iter().map(count_locked_nodes).sum(),
            _ => 0,
        }
    }

    #[test]
    fn test_model_schemas_become_strict() {
        for schema in [
            schema_for::<AdventureOutline>(),
            schema_for::<DetailedAdventureOutline>(),
            schema_for::<ExpandedSceneGuide>(),
            schema_for::<OutlineResponse>(),
        ] {
            let strict = to_strict_schema(&schema);
            assert_strict(&strict, "#");
            // nested definitions are visited too
            assert!(count_locked_nodes(&strict) > 1);
        }
    }

    #[test]
    fn test_defaulted_fields_become_required() {
        let plain = schema_for::<AdventureOutline>();
        let plain_required = plain["required"].as_array().unwrap();
        assert!(!plain_required.contains(&json!("continuity_promises")));

        let strict = to_strict_schema(&schema_for::<AdventureOutline>());
        let strict_required = strict["required"].as_array().unwrap();
        assert!(strict_required.contains(&json!("continuity_promises")));
    }

    #[test]
    fn test_adaptation_is_idempotent() {
        let once = to_strict_schema(&schema_for::<DetailedAdventureOutline>());
        let twice = to_strict_schema(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_not_mutated() {
        let schema = json!({
            "type": "object",
            "properties": {"b": {"type": "string"}, "a": {"type": "integer"}},
            "required": ["b"]
        });
        let before = schema.clone();
        let strict = to_strict_schema(&schema);
        assert_eq!(schema, before);
        assert_eq!(strict["required"], json!(["a", "b"]));
        assert_eq!(strict["additionalProperties"], json!(false));
    }

    #[test]
    fn test_nested_branches() {
        let schema = json!({
            "$defs": {
                "Inner": {
                    "type": "object",
                    "properties": {"z": {"type": "string"}, "y": {"type": "string"}}
                }
            },
            "anyOf": [
                {"type": "object", "properties": {"k": {"type": "boolean"}}},
                {"type": "null"}
            ],
            "items": {"type": "object", "properties": {"x": {"type": "number"}}}
        });
        let strict = to_strict_schema(&schema);
        assert_eq!(strict["$defs"]["Inner"]["required"], json!(["y", "z"]));
        assert_eq!(strict["anyOf"][0]["additionalProperties"], json!(false));
        assert_eq!(strict["items"]["required"], json!(["x"]));
        // the root has no "type": "object", so it is left alone
        assert!(strict.get("additionalProperties").is_none());
    }

    #[test]
    fn test_non_object_and_empty_nodes_pass_through() {
        let schema = json!({
            "type": "object",
            "properties": {},
            "description": "no properties"
        });
        assert_eq!(to_strict_schema(&schema), schema);

        let scalar = json!({"type": "string", "enum": ["a", "b"]});
        assert_eq!(to_strict_schema(&scalar), scalar);
        assert_eq!(to_strict_schema(&json!(42)), json!(42));
    }
}
