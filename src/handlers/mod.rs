pub mod list_resources;
pub mod query;
pub mod read_resource;

use crate::config::ConnectionDescriptor;
use crate::gateway::Store;
use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorCode, McpErrorResponse, QueryParams,
    ReadResourceParams, ToolCallParams, ToolResult,
};

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(
    req: &JsonRpcRequest,
    descriptor: &ConnectionDescriptor,
    store: &mut dyn Store,
) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "resources": {},
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mcp-redis-server",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "resources/list" => match list_resources::handle(descriptor, store).await {
            Ok(resources) => Some(JsonRpcResponse::success(
                req.id.clone(),
                serde_json::json!({ "resources": resources }),
            )),
            Err(mcp_err) => Some(JsonRpcResponse::error(req.id.clone(), mcp_err.into())),
        },

        "resources/read" => {
            let params: ReadResourceParams = match parse_params(req) {
                Ok(p) => p,
                Err(resp) => return Some(resp),
            };

            match read_resource::handle(&params.uri, store).await {
                Ok(contents) => Some(JsonRpcResponse::success(
                    req.id.clone(),
                    serde_json::json!({ "contents": [contents] }),
                )),
                Err(mcp_err) => Some(JsonRpcResponse::error(req.id.clone(), mcp_err.into())),
            }
        }

        "tools/list" => Some(JsonRpcResponse::success(
            req.id.clone(),
            serde_json::json!({ "tools": [query::tool_definition()] }),
        )),

        "tools/call" => {
            let params: ToolCallParams = match parse_params(req) {
                Ok(p) => p,
                Err(resp) => return Some(resp),
            };

            let tool_result = dispatch_tool_call(&params, store).await;
            let result_json = serde_json::to_value(&tool_result)
                .expect("ToolResult must serialize to JSON Value");
            Some(JsonRpcResponse::success(req.id.clone(), result_json))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, store: &mut dyn Store) -> ToolResult {
    match params.name.as_str() {
        "query" => {
            let query_params: QueryParams = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return ToolResult::error(format!("Invalid arguments for query: {e}"));
                    }
                },
                None => QueryParams { command: None },
            };
            query::handle(query_params, store).await
        }

        other => McpErrorResponse::new(
            McpErrorCode::UnknownTool,
            format!("Unknown tool: {other}"),
        )
        .into(),
    }
}

/// Deserialize `req.params`, mapping absence or mismatch to an
/// invalid-params response for the caller.
fn parse_params<T: serde::de::DeserializeOwned>(
    req: &JsonRpcRequest,
) -> Result<T, JsonRpcResponse> {
    let Some(value) = &req.params else {
        return Err(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::invalid_params(format!("Missing params for {}", req.method)),
        ));
    };

    serde_json::from_value(value.clone()).map_err(|e| {
        JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::invalid_params(format!("Invalid {} params: {e}", req.method)),
        )
    })
}
