use redis::{ConnectionAddr, ConnectionInfo, IntoConnectionInfo};

/// Connection descriptor derived once at startup from the Redis URL.
///
/// Holds the original URL (handed to the client verbatim, credentials
/// included) alongside the pieces needed to build resource URIs. Immutable
/// for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ConnectionDescriptor {
    url: String,
    pub host: String,
    pub port: u16,
    pub db: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid Redis URL: {0}")]
    InvalidUrl(#[from] redis::RedisError),
    #[error("unsupported connection address: {0}")]
    UnsupportedAddress(String),
}

impl ConnectionDescriptor {
    /// Parse a `redis://[[username][:password]@][host][:port][/db]` URL.
    ///
    /// Only TCP (plain or TLS) addresses are supported; Unix socket URLs
    /// are rejected since they carry no host to build resource URIs from.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let info: ConnectionInfo = url.into_connection_info()?;
        match info.addr {
            ConnectionAddr::Tcp(host, port) | ConnectionAddr::TcpTls { host, port, .. } => {
                Ok(Self {
                    url: url.to_string(),
                    host,
                    port,
                    db: info.redis.db,
                })
            }
            other => Err(ConfigError::UnsupportedAddress(other.to_string())),
        }
    }

    /// The URL as given on the command line, for opening the client.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Credential-free base address for resource URIs. The database index
    /// is stripped as well; it is ambient to the connection, not part of a
    /// key's identity.
    pub fn resource_base(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }
}
