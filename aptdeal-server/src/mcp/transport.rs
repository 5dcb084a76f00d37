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

//! MCP transport abstraction (stdio + in-process buffer).
//!
//! The stdio transport speaks newline-delimited JSON on stdin/stdout, as
//! MCP stdio clients expect. All logging goes to stderr; stdout carries
//! protocol frames only.

use crate::mcp::protocol::JsonRpcResponse;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc;

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Channel closed")]
    ChannelClosed,
}

/// Transport abstraction for MCP JSON-RPC messages. `recv` yields raw
/// frames so the server loop can answer parse failures itself; `Ok(None)`
/// means the peer closed the connection.
#[async_trait::async_trait]
pub trait McpTransport: Send {
    /// Receive the next raw JSON frame.
    async fn recv(&mut self) -> Result<Option<String>, TransportError>;
    /// Send a JSON-RPC response.
    async fn send(&mut self, response: &JsonRpcResponse) -> Result<(), TransportError>;
}

/// Stdio transport: one JSON message per line.
pub struct StdioTransport {
    reader: BufReader<tokio::io::Stdin>,
    writer: BufWriter<tokio::io::Stdout>,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            writer: BufWriter::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl McpTransport for StdioTransport {
    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self.reader.read_line(&mut line).await?;
            if read == 0 {
                return Ok(None);
            }
            let frame = line.trim();
            if !frame.is_empty() {
                return Ok(Some(frame.to_string()));
            }
        }
    }

    async fn send(&mut self, response: &JsonRpcResponse) -> Result<(), TransportError> {
        let payload = serde_json::to_string(response)?;
        self.writer.write_all(payload.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Channel-backed transport for tests and in-process use.
pub struct BufferTransport {
    input: mpsc::Receiver<String>,
    output: mpsc::Sender<JsonRpcResponse>,
}

impl BufferTransport {
    pub fn new(
        input: mpsc::Receiver<String>,
        output: mpsc::Sender<JsonRpcResponse>,
    ) -> Self {
        Self { input, output }
    }
}

#[async_trait::async_trait]
impl McpTransport for BufferTransport {
    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        Ok(self.input.recv().await)
    }

    async fn send(&mut self, response: &JsonRpcResponse) -> Result<(), TransportError> {
        self.output
            .send(response.clone())
            .await
            .map_err(|_| TransportError::ChannelClosed)
    }
}
