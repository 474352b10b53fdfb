use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as Json;

use crate::gateway::{KeyType, Store};
use crate::protocol::{McpErrorCode, McpErrorResponse, ResourceContents, MIME_JSON};
use crate::uri::{self, ResourcePath};

/// One entry of the global key listing.
#[derive(Debug, Serialize)]
struct KeyListingEntry {
    key: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Type-tagged descriptor of a single key.
///
/// Exactly one of the type-specific fields is populated, matching the
/// reported type; the others never serialize. Unsupported types carry only
/// `key` and `type`.
#[derive(Debug, Serialize)]
struct KeySchemaPayload {
    key: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Json>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    members: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, String>>,
}

/// Handle a `resources/read` request.
pub async fn handle(
    uri: &str,
    store: &mut dyn Store,
) -> Result<ResourceContents, McpErrorResponse> {
    let path = uri::parse(uri).ok_or_else(|| {
        McpErrorResponse::new(McpErrorCode::InvalidResourceUri, "Invalid resource URI")
    })?;

    let text = match path {
        ResourcePath::KeyListing => key_listing(store).await?,
        ResourcePath::KeySchema(key) => key_schema(key, store).await?,
    };

    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: MIME_JSON.into(),
        text,
    })
}

/// Full scan with per-key types. The only read that touches every key.
async fn key_listing(store: &mut dyn Store) -> Result<String, McpErrorResponse> {
    let keys = store.keys("*").await.map_err(|e| McpErrorResponse::store(&e))?;

    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        let kind = store
            .key_type(&key)
            .await
            .map_err(|e| McpErrorResponse::store(&e))?;
        entries.push(KeyListingEntry {
            key,
            kind: kind.as_str().to_string(),
        });
    }

    serialize(&entries)
}

/// Type-dispatch to the matching introspection read.
async fn key_schema(key: String, store: &mut dyn Store) -> Result<String, McpErrorResponse> {
    let kind = store
        .key_type(&key)
        .await
        .map_err(|e| McpErrorResponse::store(&e))?;

    let mut payload = KeySchemaPayload {
        key,
        kind: kind.as_str().to_string(),
        value: None,
        length: None,
        members: None,
        fields: None,
    };

    let store_err = |e: redis::RedisError| McpErrorResponse::store(&e);
    match kind {
        KeyType::String => {
            let value = store.get_value(&payload.key).await.map_err(store_err)?;
            payload.value = Some(value.map_or(Json::Null, Json::String));
        }
        KeyType::List => {
            payload.length = Some(store.list_length(&payload.key).await.map_err(store_err)?);
        }
        KeyType::Set => {
            payload.members = Some(store.set_members(&payload.key).await.map_err(store_err)?);
        }
        KeyType::Hash => {
            payload.fields = Some(store.hash_fields(&payload.key).await.map_err(store_err)?);
        }
        KeyType::SortedSet => {
            payload.length = Some(
                store
                    .sorted_set_cardinality(&payload.key)
                    .await
                    .map_err(store_err)?,
            );
        }
        KeyType::Other(_) => {}
    }

    serialize(&payload)
}

fn serialize<T: Serialize>(payload: &T) -> Result<String, McpErrorResponse> {
    serde_json::to_string_pretty(payload)
        .map_err(|e| McpErrorResponse::new(McpErrorCode::InternalError, e.to_string()))
}
