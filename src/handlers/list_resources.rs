use crate::config::ConnectionDescriptor;
use crate::gateway::Store;
use crate::protocol::{McpErrorResponse, Resource, MIME_JSON};
use crate::uri;

/// Handle a `resources/list` request.
///
/// Emits one schema resource per key, in the store's scan order (not
/// guaranteed stable across calls), then the synthetic key listing exactly
/// once, last, independent of store contents.
pub async fn handle(
    descriptor: &ConnectionDescriptor,
    store: &mut dyn Store,
) -> Result<Vec<Resource>, McpErrorResponse> {
    let base = descriptor.resource_base();
    let keys = store.keys("*").await.map_err(|e| McpErrorResponse::store(&e))?;

    let mut resources = Vec::with_capacity(keys.len() + 1);
    for key in keys {
        let kind = store
            .key_type(&key)
            .await
            .map_err(|e| McpErrorResponse::store(&e))?;
        resources.push(Resource {
            uri: uri::key_schema_uri(&base, &key),
            mime_type: MIME_JSON.into(),
            name: format!("\"{key}\" ({}) schema", kind.as_str()),
        });
    }

    resources.push(Resource {
        uri: uri::key_listing_uri(&base),
        mime_type: MIME_JSON.into(),
        name: "Redis Keys".into(),
    });

    Ok(resources)
}
