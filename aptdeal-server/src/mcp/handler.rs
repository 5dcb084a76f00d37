// Copyright 2025 Aptdeal Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! MCP request dispatch.
//!
//! Routes JSON-RPC methods to their handlers. Business outcomes of the deal
//! tool are always answered as text content; only malformed protocol input
//! produces JSON-RPC errors, and unexpected internal failures are rendered
//! as an `Error:` text block rather than propagated.

use serde_json::json;
use tracing::{info, warn};

use crate::mcp::protocol::*;
use crate::tool::{tool_definitions, DealTool, DealToolArgs, TOOL_NAME};

/// Server identity advertised during initialization.
pub const SERVER_NAME: &str = "apartment-price-server";

/// MCP request handler.
pub struct McpHandler {
    tool: DealTool,
}

impl McpHandler {
    pub fn new(tool: DealTool) -> Self {
        Self { tool }
    }

    /// Handle one JSON-RPC message. Returns `None` for notifications,
    /// which must not be answered.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        info!(method = %request.method, "MCP request received");

        let Some(id) = request.id else {
            // Notification (e.g. notifications/initialized): nothing to send.
            return None;
        };

        let response = match request.method.as_str() {
            "ping" => JsonRpcResponse::success(id, json!({})),
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => {
                warn!(method = %request.method, "unknown MCP method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(&request.method))
            }
        };
        Some(response)
    }

    fn handle_initialize(&self, id: JsonRpcId) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        }
    }

    fn handle_tools_list(&self, id: JsonRpcId) -> JsonRpcResponse {
        let result = ListToolsResult {
            tools: tool_definitions(),
        };
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        }
    }

    async fn handle_tools_call(
        &self,
        id: JsonRpcId,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        let call_params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid tool call params: {}", e)),
                    )
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tool call params"),
                )
            }
        };

        if call_params.name != TOOL_NAME {
            return JsonRpcResponse::error(id, JsonRpcError::method_not_found(&call_params.name));
        }

        let args: DealToolArgs =
            match serde_json::from_value(serde_json::Value::Object(call_params.arguments)) {
                Ok(args) => args,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid tool arguments: {}", e)),
                    )
                }
            };

        info!(tool = TOOL_NAME, address = %args.address_or_region, "executing tool");

        let result = match self.tool.execute(args).await {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                // Catch-all for genuinely unexpected conditions: still a text
                // answer, never an unanswered request.
                warn!(error = %e, "tool execution failed unexpectedly");
                CallToolResult {
                    content: vec![ToolContent::Text {
                        text: format!("Error: {e}"),
                    }],
                    is_error: Some(true),
                }
            }
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        }
    }
}
