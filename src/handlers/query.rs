use serde_json::json;

use crate::convert::value_to_json;
use crate::gateway::Store;
use crate::protocol::{McpErrorCode, McpErrorResponse, QueryParams, ToolResult};

/// Command verbs permitted for forwarding. Closed set: anything else is
/// rejected, regardless of casing or argument shape. This list is the
/// sole guarantee that no forwarded command writes; review it whenever
/// the underlying command surface changes.
pub const READ_ONLY_COMMANDS: &[&str] = &[
    "GET", "MGET", "STRLEN", "HGET", "HGETALL", "HMGET", "HLEN", "HKEYS", "HVALS",
    "LLEN", "LRANGE", "LINDEX", "SISMEMBER", "SMEMBERS", "SCARD", "ZRANGE", "ZRANGEBYSCORE",
    "ZCARD", "ZSCORE", "ZCOUNT", "KEYS", "TYPE", "TTL", "EXISTS", "INFO", "SCAN",
];

/// Allow-list membership, case-insensitive.
pub fn is_read_only(verb: &str) -> bool {
    READ_ONLY_COMMANDS.contains(&verb.to_ascii_uppercase().as_str())
}

/// The `query` tool definition for `tools/list`.
pub fn tool_definition() -> serde_json::Value {
    json!({
        "name": "query",
        "description": "Execute read-only Redis commands",
        "inputSchema": {
            "type": "object",
            "required": ["command"],
            "properties": {
                "command": {
                    "type": "string",
                    "description": "Command line to run, e.g. \"HGETALL myhash\""
                }
            }
        }
    })
}

/// Handle a `query` tool call.
///
/// Parse → validate → forward → return, stateless across calls. A rejected
/// or failed command never reaches the store, so it has no observable side
/// effect there.
pub async fn handle(params: QueryParams, store: &mut dyn Store) -> ToolResult {
    let command = params.command.unwrap_or_default();
    let tokens: Vec<&str> = command.split_whitespace().collect();

    let Some((&verb, rest)) = tokens.split_first() else {
        return McpErrorResponse::new(
            McpErrorCode::CommandRequired,
            "Command parameter is required",
        )
        .into();
    };

    let verb = verb.to_ascii_uppercase();
    if !is_read_only(&verb) {
        return McpErrorResponse::new(
            McpErrorCode::CommandNotAllowed,
            format!("Command \"{verb}\" is not allowed. Only read-only commands are permitted."),
        )
        .into();
    }

    // Forward the normalized verb plus the remaining tokens in their
    // original case.
    let mut forwarded = Vec::with_capacity(tokens.len());
    forwarded.push(verb);
    forwarded.extend(rest.iter().map(|token| token.to_string()));

    match store.raw_command(&forwarded).await {
        Ok(reply) => match serde_json::to_string_pretty(&value_to_json(&reply)) {
            Ok(text) => ToolResult::text(text),
            Err(err) => {
                McpErrorResponse::new(McpErrorCode::InternalError, err.to_string()).into()
            }
        },
        Err(err) => McpErrorResponse::store(&err).into(),
    }
}
