use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mcp_redis_server::config::ConnectionDescriptor;
use mcp_redis_server::gateway::StoreGateway;
use mcp_redis_server::server::McpServer;

/// MCP server exposing a Redis database as resources and a read-only
/// query tool.
#[derive(Debug, Parser)]
#[command(name = "mcp-redis-server", version, about)]
struct Cli {
    /// Redis connection URL: redis://[[username][:password]@][host][:port][/db]
    url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the protocol; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let descriptor = match ConnectionDescriptor::parse(&cli.url) {
        Ok(d) => d,
        Err(err) => {
            error!(%err, "invalid Redis URL; expected redis://[[username][:password]@][host][:port][/db]");
            std::process::exit(1);
        }
    };

    let mut gateway = match StoreGateway::new(&descriptor) {
        Ok(g) => g,
        Err(err) => {
            error!(%err, "cannot create Redis client");
            std::process::exit(1);
        }
    };

    // Only this very first attempt is fatal; later reconnect failures are
    // suppressed per request.
    if let Err(err) = gateway.connect().await {
        error!(%err, host = %descriptor.host, port = descriptor.port, "Redis connection error");
        std::process::exit(1);
    }
    info!(
        host = %descriptor.host,
        port = descriptor.port,
        db = descriptor.db,
        "connected to Redis"
    );

    let mut server = McpServer::new(descriptor, gateway);

    tokio::select! {
        result = server.run() => {
            if let Err(err) = result {
                error!(%err, "fatal server error");
                std::process::exit(1);
            }
        }
        _ = shutdown_signal() => {
            info!("termination signal received, shutting down");
        }
    }

    // The run future (and any in-flight request) is dropped by now; close
    // the store connection and exit cleanly.
    server.shutdown().await;
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate()).expect("SIGTERM handler installation failed");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = term.recv() => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
