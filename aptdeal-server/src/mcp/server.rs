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

//! MCP server loop.
//!
//! Reads frames from the transport until the peer closes, dispatching each
//! to the handler. Undecodable frames are answered with a JSON-RPC parse
//! error instead of terminating the connection.

use tracing::{info, warn};

use crate::mcp::handler::McpHandler;
use crate::mcp::protocol::{JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::transport::{McpTransport, TransportError};

/// Serve requests until the transport reports end of input.
pub async fn run<T: McpTransport>(
    mut transport: T,
    handler: McpHandler,
) -> Result<(), TransportError> {
    while let Some(frame) = transport.recv().await? {
        let request: JsonRpcRequest = match serde_json::from_str(&frame) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC frame");
                let response = JsonRpcResponse::error(
                    JsonRpcId::Null,
                    JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
                );
                transport.send(&response).await?;
                continue;
            }
        };

        if let Some(response) = handler.handle_request(request).await {
            transport.send(&response).await?;
        }
    }
    info!("transport closed, shutting down");
    Ok(())
}
