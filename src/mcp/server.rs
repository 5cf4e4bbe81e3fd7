use crate::client::GoogleClient;
use crate::errors::Result;
use crate::mcp::protocol::{
    CallToolParams, CallToolResult, McpError, McpRequest, McpResponse, INTERNAL_ERROR,
    INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION,
};
use crate::mcp::registry::{call_tool, tool_definitions, ToolCallError};
use crate::transport::{HttpTransport, Transport};
use log::{debug, info, warn};
use serde_json::{json, Value as JsonValue};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Serves the tools over line-delimited JSON-RPC, one request at a time.
pub struct McpServer<T: Transport = HttpTransport> {
    client: GoogleClient<T>,
}

impl<T: Transport> McpServer<T> {
    pub fn new(client: GoogleClient<T>) -> Self {
        McpServer { client }
    }

    pub fn client(&self) -> &GoogleClient<T> {
        &self.client
    }

    /// Serves stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Reads one JSON-RPC message per line from `reader` and writes one
    /// response per line to `writer`. Notifications get no response.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut frame = serde_json::to_string(&response)?;
                frame.push('\n');
                writer.write_all(frame.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        info!("Input closed, shutting down");
        Ok(())
    }

    pub async fn handle_line(&self, line: &str) -> Option<McpResponse> {
        match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(McpResponse::failure(
                JsonValue::Null,
                McpError::new(PARSE_ERROR, format!("Parse error: {}", e)),
            )),
        }
    }

    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        debug!("<- {}", request.method);
        if request.is_notification() {
            // Notifications (initialized, cancelled, ...) need no answer.
            return None;
        }
        let id = request.id.clone().unwrap_or_default();
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(McpResponse::failure(
                id,
                McpError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        let outcome = match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.call(request.params).await,
            other => Err(McpError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        };

        Some(match outcome {
            Ok(result) => McpResponse::success(id, result),
            Err(error) => McpResponse::failure(id, error),
        })
    }

    async fn call(&self, params: Option<JsonValue>) -> std::result::Result<JsonValue, McpError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(JsonValue::Null))
            .map_err(|e| McpError::new(INVALID_PARAMS, format!("Invalid tools/call params: {}", e)))?;
        let arguments = params
            .arguments
            .unwrap_or_else(|| JsonValue::Object(Default::default()));

        info!("Calling tool {}", params.name);
        let result = match call_tool(&self.client, &params.name, arguments).await {
            Ok(JsonValue::String(text)) => CallToolResult::text(text),
            Ok(value) => CallToolResult::text(
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
            ),
            Err(ToolCallError::UnknownTool(name)) => {
                return Err(McpError::new(
                    INVALID_PARAMS,
                    format!("Unknown tool: {}", name),
                ))
            }
            Err(ToolCallError::Failed(e)) => {
                warn!("Tool {} failed: {}", params.name, e);
                CallToolResult::error(e.to_string())
            }
        };
        serde_json::to_value(result).map_err(|e| McpError::new(INTERNAL_ERROR, e.to_string()))
    }
}
