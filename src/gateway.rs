//! Store gateway: the single owned connection to Redis.
//!
//! Every read operation acquires the connection if absent before touching
//! the store. A failed acquisition at that checkpoint is suppressed; the
//! operation proceeds and surfaces "not established" only if the
//! connection is still missing. The very first connect at bootstrap is the
//! caller's responsibility and is fatal there.

use std::collections::BTreeMap;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, ErrorKind, RedisResult, Value};
use tracing::debug;

use crate::config::ConnectionDescriptor;

/// Store-reported key type, as a closed tagged variant.
///
/// `Other` carries the raw tag for types this server does not introspect
/// (`stream`, `none`, modules). Encountering one is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyType {
    String,
    List,
    Set,
    Hash,
    SortedSet,
    Other(String),
}

impl KeyType {
    /// Map a `TYPE` reply tag to a variant.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "list" => Self::List,
            "set" => Self::Set,
            "hash" => Self::Hash,
            "zset" => Self::SortedSet,
            other => Self::Other(other.to_string()),
        }
    }

    /// The store's tag for this type, round-tripping `from_tag`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::Hash => "hash",
            Self::SortedSet => "zset",
            Self::Other(tag) => tag,
        }
    }
}

/// Read operations the handlers depend on.
///
/// `StoreGateway` is the live implementation; tests substitute an
/// in-memory double. No other component holds the underlying transport.
#[async_trait]
pub trait Store: Send {
    /// Key names matching `pattern` (store-defined order).
    async fn keys(&mut self, pattern: &str) -> RedisResult<Vec<String>>;

    /// `TYPE key`.
    async fn key_type(&mut self, key: &str) -> RedisResult<KeyType>;

    /// `GET key`; `None` for a missing key.
    async fn get_value(&mut self, key: &str) -> RedisResult<Option<String>>;

    /// `LLEN key`.
    async fn list_length(&mut self, key: &str) -> RedisResult<u64>;

    /// `SMEMBERS key`.
    async fn set_members(&mut self, key: &str) -> RedisResult<Vec<String>>;

    /// `HGETALL key`.
    async fn hash_fields(&mut self, key: &str) -> RedisResult<BTreeMap<String, String>>;

    /// `ZCARD key`.
    async fn sorted_set_cardinality(&mut self, key: &str) -> RedisResult<u64>;

    /// Forward an already-validated command token-for-token and return the
    /// raw reply. `tokens` must be non-empty.
    async fn raw_command(&mut self, tokens: &[String]) -> RedisResult<Value>;
}

/// The live gateway holding the single multiplexed connection.
pub struct StoreGateway {
    client: redis::Client,
    connection: Option<MultiplexedConnection>,
}

impl StoreGateway {
    pub fn new(descriptor: &ConnectionDescriptor) -> RedisResult<Self> {
        Ok(Self {
            client: redis::Client::open(descriptor.url())?,
            connection: None,
        })
    }

    /// Establish the connection if absent. Idempotent: connecting while
    /// already connected neither fails nor opens a second connection.
    pub async fn connect(&mut self) -> RedisResult<()> {
        if self.connection.is_none() {
            self.connection = Some(self.client.get_multiplexed_async_connection().await?);
        }
        Ok(())
    }

    /// Close the connection for shutdown. Dropping the multiplexed handle
    /// releases the transport.
    pub async fn close(&mut self) {
        if self.connection.take().is_some() {
            debug!("store connection closed");
        }
    }

    /// Acquire-if-absent; transient failures are suppressed here and
    /// surface from the subsequent operation instead.
    async fn ensure_connected(&mut self) {
        if let Err(err) = self.connect().await {
            debug!(%err, "connection attempt failed, proceeding");
        }
    }

    fn conn(&mut self) -> RedisResult<&mut MultiplexedConnection> {
        self.connection
            .as_mut()
            .ok_or_else(|| (ErrorKind::IoError, "store connection is not established").into())
    }
}

#[async_trait]
impl Store for StoreGateway {
    async fn keys(&mut self, pattern: &str) -> RedisResult<Vec<String>> {
        self.ensure_connected().await;
        self.conn()?.keys(pattern).await
    }

    async fn key_type(&mut self, key: &str) -> RedisResult<KeyType> {
        self.ensure_connected().await;
        let tag: String = self.conn()?.key_type(key).await?;
        Ok(KeyType::from_tag(&tag))
    }

    async fn get_value(&mut self, key: &str) -> RedisResult<Option<String>> {
        self.ensure_connected().await;
        self.conn()?.get(key).await
    }

    async fn list_length(&mut self, key: &str) -> RedisResult<u64> {
        self.ensure_connected().await;
        self.conn()?.llen(key).await
    }

    async fn set_members(&mut self, key: &str) -> RedisResult<Vec<String>> {
        self.ensure_connected().await;
        self.conn()?.smembers(key).await
    }

    async fn hash_fields(&mut self, key: &str) -> RedisResult<BTreeMap<String, String>> {
        self.ensure_connected().await;
        self.conn()?.hgetall(key).await
    }

    async fn sorted_set_cardinality(&mut self, key: &str) -> RedisResult<u64> {
        self.ensure_connected().await;
        self.conn()?.zcard(key).await
    }

    async fn raw_command(&mut self, tokens: &[String]) -> RedisResult<Value> {
        self.ensure_connected().await;
        let (verb, args) = tokens
            .split_first()
            .ok_or_else(|| redis::RedisError::from((ErrorKind::ClientError, "empty command")))?;
        let mut cmd = redis::cmd(verb);
        for arg in args {
            cmd.arg(arg);
        }
        let value: Value = cmd.query_async(self.conn()?).await?;
        Ok(value)
    }
}
