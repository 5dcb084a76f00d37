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

//! Model Context Protocol (MCP) server shell.
//!
//! Implements the subset of MCP this server needs: initialization, ping,
//! and the tools primitives, over JSON-RPC 2.0 with newline-delimited
//! framing on stdio. The actual lookup logic lives in [`crate::tool`] and
//! `aptdeal-core`; this module only speaks protocol.

pub mod handler;
pub mod protocol;
pub mod server;
pub mod transport;

pub use handler::{McpHandler, SERVER_NAME};
pub use protocol::*;
pub use server::run;
pub use transport::{BufferTransport, McpTransport, StdioTransport, TransportError};
