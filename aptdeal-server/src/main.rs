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

use anyhow::Result;
use aptdeal_server::{config::ServerConfig, run_stdio_server};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MOLIT open-API service key (overrides config file)
    #[arg(long, env = "MOLIT_SERVICE_KEY", hide_env_values = true)]
    service_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries MCP frames; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::load(args.config)?;
    if let Some(key) = args.service_key {
        if !key.is_empty() {
            config.upstream.service_key = Some(key);
        }
    }

    run_stdio_server(config).await
}
