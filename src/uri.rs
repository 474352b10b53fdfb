//! Resource URI construction and parsing.
//!
//! Two URI shapes exist: `{base}/{key}/schema` for per-key introspection
//! and `{base}/keys` for the synthetic key listing. URIs are derived, not
//! stored: rebuilt from a key name on every listing and parsed back on
//! every read.

/// Trailing path segment for per-key schema resources.
pub const SCHEMA_PATH: &str = "schema";

/// Path of the synthetic key-listing resource.
pub const KEYS_PATH: &str = "keys";

/// A parsed resource URI path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePath {
    /// The global `keys` listing.
    KeyListing,
    /// Schema of a single key.
    KeySchema(String),
}

/// Build the schema URI for a key.
pub fn key_schema_uri(base: &str, key: &str) -> String {
    format!("{base}/{key}/{SCHEMA_PATH}")
}

/// Build the key-listing URI.
pub fn key_listing_uri(base: &str) -> String {
    format!("{base}/{KEYS_PATH}")
}

/// Parse a resource URI into its path shape.
///
/// The authority part is display-only and not verified; the path after it
/// is the identifier. Keys containing `/` are reassembled from all
/// segments preceding the `schema` suffix, though only separator-free keys
/// round-trip through the listing.
///
/// Returns `None` for any path that is neither the key listing nor a
/// non-empty key followed by the schema suffix.
pub fn parse(uri: &str) -> Option<ResourcePath> {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let (_, path) = rest.split_once('/')?;

    if path == KEYS_PATH {
        return Some(ResourcePath::KeyListing);
    }

    let (key, last) = path.rsplit_once('/')?;
    if last == SCHEMA_PATH && !key.is_empty() {
        Some(ResourcePath::KeySchema(key.to_string()))
    } else {
        None
    }
}
