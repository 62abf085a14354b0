use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "provider": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "api_key": { "type": "string" },
                    "api_url": { "type": "string", "format": "uri" },
                    "model": { "type": "string", "minLength": 1 }
                }
            },
            "explorer": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "base_url": { "type": "string", "format": "uri" },
                    "events_limit": { "type": "integer", "minimum": 1, "maximum": 50 }
                }
            },
            "server": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                    "api_token": { "type": "string" }
                }
            },
            "prompts": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "directory": { "type": "string" }
                }
            }
        }
    })
});
