//! Conversion of raw RESP replies into JSON.
//!
//! The `query` tool forwards commands verbatim and returns whatever the
//! store replies, so every RESP2/RESP3 variant needs a JSON rendering.

use redis::{RedisError, Value};
use serde_json::{json, Map, Value as Json};

/// Render a raw reply as JSON.
///
/// Binary-unsafe bulk strings are rendered lossily as UTF-8; map keys are
/// stringified. RESP3 attributes are dropped in favor of their payload.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Nil => Json::Null,
        Value::Int(n) => json!(n),
        Value::Double(d) => Json::from(*d),
        Value::Boolean(b) => json!(b),
        Value::BulkString(bytes) => Json::String(String::from_utf8_lossy(bytes).into_owned()),
        Value::SimpleString(s) => Json::String(s.clone()),
        Value::Okay => Json::String("OK".to_string()),
        Value::VerbatimString { text, .. } => Json::String(text.clone()),
        Value::BigNumber(n) => Json::String(n.to_string()),
        Value::Array(items) | Value::Set(items) => {
            Json::Array(items.iter().map(value_to_json).collect())
        }
        Value::Map(pairs) => {
            let mut map = Map::with_capacity(pairs.len());
            for (k, v) in pairs {
                map.insert(map_key(k), value_to_json(v));
            }
            Json::Object(map)
        }
        Value::Attribute { data, .. } => value_to_json(data),
        Value::Push { data, .. } => Json::Array(data.iter().map(value_to_json).collect()),
        Value::ServerError(err) => Json::String(RedisError::from(err.clone()).to_string()),
        _ => Json::Null,
    }
}

fn map_key(value: &Value) -> String {
    match value {
        Value::SimpleString(s) => s.clone(),
        Value::BulkString(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::Int(n) => n.to_string(),
        Value::Double(d) => d.to_string(),
        other => value_to_json(other).to_string(),
    }
}
