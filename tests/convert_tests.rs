//! RESP-to-JSON conversion tests for raw query replies.

use redis::Value;
use serde_json::json;

use mcp_redis_server::convert::value_to_json;

#[test]
fn scalars_convert() {
    assert_eq!(value_to_json(&Value::Nil), json!(null));
    assert_eq!(value_to_json(&Value::Int(42)), json!(42));
    assert_eq!(value_to_json(&Value::Boolean(true)), json!(true));
    assert_eq!(value_to_json(&Value::Okay), json!("OK"));
    assert_eq!(
        value_to_json(&Value::SimpleString("PONG".into())),
        json!("PONG")
    );
    assert_eq!(
        value_to_json(&Value::BulkString(b"hello".to_vec())),
        json!("hello")
    );
}

#[test]
fn nested_arrays_convert() {
    let reply = Value::Array(vec![
        Value::BulkString(b"a".to_vec()),
        Value::Int(1),
        Value::Array(vec![Value::Nil]),
    ]);

    assert_eq!(value_to_json(&reply), json!(["a", 1, [null]]));
}

#[test]
fn maps_convert_to_objects_with_string_keys() {
    let reply = Value::Map(vec![
        (Value::BulkString(b"a".to_vec()), Value::BulkString(b"1".to_vec())),
        (Value::SimpleString("b".into()), Value::Int(2)),
    ]);

    assert_eq!(value_to_json(&reply), json!({ "a": "1", "b": 2 }));
}

#[test]
fn invalid_utf8_is_rendered_lossily() {
    let reply = Value::BulkString(vec![0x66, 0x6f, 0xff]);
    let converted = value_to_json(&reply);
    let text = converted.as_str().unwrap();
    assert!(text.starts_with("fo"));
}
