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

//! Aptdeal MCP server: apartment real-transaction-price lookup over stdio.

pub mod config;
pub mod mcp;
pub mod tool;
pub mod upstream;

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::mcp::{McpHandler, StdioTransport};
use crate::tool::DealTool;
use crate::upstream::{HttpUpstream, Upstream};

/// Build the tool from configuration and serve MCP over stdio until the
/// client disconnects.
pub async fn run_stdio_server(config: ServerConfig) -> anyhow::Result<()> {
    let upstream: Option<Arc<dyn Upstream>> = match &config.upstream.service_key {
        Some(key) => {
            info!("service key configured, querying the MOLIT registry");
            Some(Arc::new(HttpUpstream::new(&config.upstream, key.clone())?))
        }
        None => {
            warn!("no service key configured; the tool will serve disclosed sample data");
            None
        }
    };

    let handler = McpHandler::new(DealTool::new(upstream));
    mcp::server::run(StdioTransport::new(), handler).await?;
    Ok(())
}
