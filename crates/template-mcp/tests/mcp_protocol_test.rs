//! MCP protocol integration test.
//!
//! Verifies that template tools survive the MCP protocol round-trip:
//! tool discovery via `list_tools` and tool invocation via `call_tool`.

use rmcp::model::{CallToolRequestParams, ClientInfo};
use rmcp::service::{RoleClient, RunningService};
use rmcp::{ClientHandler, ServiceExt};
use tokio::task::JoinHandle;

use template_mcp::config::ServerConfig;
use template_mcp::server::TemplateMcpServer;

#[derive(Debug, Clone, Default)]
struct DummyClient;

impl ClientHandler for DummyClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

fn fixtures_path() -> String {
    format!("{}/tests/fixtures/templates", env!("CARGO_MANIFEST_DIR"))
}

async fn connect() -> anyhow::Result<(
    RunningService<RoleClient, DummyClient>,
    JoinHandle<anyhow::Result<()>>,
)> {
    let server = TemplateMcpServer::bootstrap(&ServerConfig::with_templates_path(fixtures_path()))?;
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;
    Ok((client, server_handle))
}

fn call(name: &str) -> CallToolRequestParams {
    CallToolRequestParams {
        meta: None,
        name: name.to_string().into(),
        arguments: None,
        task: None,
    }
}

#[tokio::test]
async fn test_mcp_protocol_list_tools() -> anyhow::Result<()> {
    let (client, server_handle) = connect().await?;

    let tools = client.list_tools(None).await?;
    let tool_names: Vec<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();
    assert_eq!(
        tool_names,
        vec!["get_incident_review_template", "get_weekly_update_template"]
    );

    let weekly = &tools.tools[1];
    assert_eq!(weekly.description.as_deref(), Some("Weekly update"));

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_mcp_protocol_call_tool_with_template() -> anyhow::Result<()> {
    let (client, server_handle) = connect().await?;

    let result = client.call_tool(call("get_weekly_update_template")).await?;
    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .expect("Expected text content");

    let parsed: serde_json::Value = serde_json::from_str(text)?;
    assert_eq!(
        parsed,
        serde_json::json!({
            "instructions": "Step 1...\nStep 2...",
            "template": "# Update\n{summary}\n",
        })
    );

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_mcp_protocol_call_instruction_only_tool() -> anyhow::Result<()> {
    let (client, server_handle) = connect().await?;

    let result = client.call_tool(call("get_incident_review_template")).await?;
    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .expect("Expected text content");

    let parsed: serde_json::Value = serde_json::from_str(text)?;
    let object = parsed.as_object().expect("Expected JSON object");
    assert!(!object.contains_key("template"));
    assert_eq!(
        object["instructions"],
        "1. Ask for the incident ticket and timeline.\n\
         2. Identify the customer impact and its duration.\n   \
         - Quote numbers exactly as given.\n\
         3. List follow-up actions with owners.\n"
    );

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_mcp_protocol_unknown_tool_is_error() -> anyhow::Result<()> {
    let (client, server_handle) = connect().await?;

    let result = client.call_tool(call("get_missing_instructions_template")).await;
    assert!(result.is_err(), "skipped template must not be callable");

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}
