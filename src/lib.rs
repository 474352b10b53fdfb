//! MCP server for Redis.
//!
//! Exposes every key of a Redis database as an addressable resource (a
//! type-tagged schema descriptor plus one synthetic key listing) and a
//! single `query` tool restricted to read-only commands, over JSON-RPC 2.0
//! stdio transport, compatible with any MCP-aware AI agent.

pub mod config;
pub mod convert;
pub mod gateway;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod uri;

pub mod schema;
