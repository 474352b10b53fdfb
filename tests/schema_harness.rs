use mcp_redis_server::handlers::query::tool_definition;
use mcp_redis_server::schema::{validate_json, validate_value};

#[test]
fn json_schema_harness_validates_instance() {
    let schema = r#"{
      "$schema": "https://json-schema.org/draft/2020-12/schema",
      "type": "object",
      "required": ["key", "type"],
      "properties": {
        "key": { "type": "string" },
        "type": { "type": "string" },
        "fields": { "type": "object", "additionalProperties": { "type": "string" } }
      }
    }"#;

    let instance = r#"{
      "key": "settings",
      "type": "hash",
      "fields": { "a": "1", "b": "2" }
    }"#;

    validate_json(schema, instance).expect("schema validation failed");
}

#[test]
fn query_tool_input_schema_compiles_and_discriminates() {
    let definition = tool_definition();
    let input_schema = &definition["inputSchema"];

    validate_value(input_schema, &serde_json::json!({ "command": "get mykey" }))
        .expect("a string command must validate");

    assert!(
        validate_value(input_schema, &serde_json::json!({})).is_err(),
        "command is required"
    );
    assert!(
        validate_value(input_schema, &serde_json::json!({ "command": 5 })).is_err(),
        "command must be a string"
    );
}
