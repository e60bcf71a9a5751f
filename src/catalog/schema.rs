use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CATALOG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": {
            "type": "array",
            "items": { "$ref": "#/definitions/control" }
        },
        "definitions": {
            "control": {
                "type": "object",
                "required": ["ControlID"],
                "properties": {
                    "ControlID": { "type": "string", "minLength": 1 },
                    "Description": { "type": "string" },
                    "Section": { "type": "string" },
                    "Topic": { "type": "string" },
                    "AlignedTopics": { "type": "string" },
                    "BlueprintArea": { "type": "string" }
                }
            }
        }
    })
});
