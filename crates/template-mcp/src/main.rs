//! Template MCP Server
//!
//! Model Context Protocol server exposing YAML document templates from a
//! directory as zero-argument tools. Templates are loaded once at startup;
//! restart the server to pick up changes.

use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use template_mcp::config::ServerConfig;
use template_mcp::server::TemplateMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // stdout carries the MCP stream; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("template_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let server = TemplateMcpServer::bootstrap(&config)?;

    if config.check {
        let diagnostics = server.registry().diagnostics();
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        return Ok(());
    }

    tracing::info!(
        tools = server.registry().len(),
        "template-mcp starting (stdio transport)"
    );

    let transport = rmcp::transport::io::stdio();
    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
