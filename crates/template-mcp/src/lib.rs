//! Template MCP Server library.
//!
//! Discovers YAML document-template definitions in a directory, validates them,
//! and exposes each one as a zero-argument MCP tool through [`server::TemplateMcpServer`].
//! Used by the `template-mcp` binary and available for integration testing.
//!
//! # Modules
//!
//! - [`config`] — CLI/environment settings and `~` path expansion
//! - [`error`] — Fatal startup errors and per-file discovery errors
//! - [`registry`] — Immutable registry of template tools built at startup
//! - [`server`] — MCP `ServerHandler` serving the registry
//! - [`template`] — Definition schema, filename naming, and directory loading

pub mod config;
pub mod error;
pub mod registry;
pub mod server;
pub mod template;
