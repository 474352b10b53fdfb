pub mod request;
pub mod response;

pub use request::{JsonRpcRequest, QueryParams, ReadResourceParams, RpcId, ToolCallParams};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, Resource,
    ResourceContents, ToolResult, ToolResultContent, MIME_JSON,
};
