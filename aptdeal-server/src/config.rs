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
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Aptdeal server configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// MOLIT open-API service key. Absence is a first-class state: the
    /// tool serves disclosed sample data instead of querying the registry.
    pub service_key: Option<String>,

    /// Base endpoint of the apartment-trade service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://openapi.molit.go.kr:8081/OpenAPI_ToolInstallPackage/service/rest/RTMSOBJSvc/getRTMSDataSvcAptTrade"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            service_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - MOLIT_SERVICE_KEY: MOLIT open-API service key
    /// - APTDEAL_BASE_URL: upstream base endpoint
    /// - APTDEAL_TIMEOUT_SECS: upstream HTTP timeout in seconds
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("MOLIT_SERVICE_KEY") {
            if !key.is_empty() {
                config.upstream.service_key = Some(key);
            }
        }

        if let Ok(url) = std::env::var("APTDEAL_BASE_URL") {
            config.upstream.base_url = url;
        }

        if let Ok(timeout) = std::env::var("APTDEAL_TIMEOUT_SECS") {
            if let Ok(val) = timeout.parse() {
                config.upstream.timeout_secs = val;
            }
        }

        config
    }

    /// Load configuration with priority: file > env > defaults
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(path) = config_file {
            if path.exists() {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            } else {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
        } else {
            Self::default()
        };

        config = Self::merge_with_env(config);

        Ok(config)
    }

    /// Merge config with environment variables (env fills gaps and
    /// overrides explicitly-set variables).
    fn merge_with_env(mut config: Self) -> Self {
        let env_config = Self::from_env();

        if env_config.upstream.service_key.is_some() {
            config.upstream.service_key = env_config.upstream.service_key;
        }
        if std::env::var("APTDEAL_BASE_URL").is_ok() {
            config.upstream.base_url = env_config.upstream.base_url;
        }
        if std::env::var("APTDEAL_TIMEOUT_SECS").is_ok() {
            config.upstream.timeout_secs = env_config.upstream.timeout_secs;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credential() {
        let config = ServerConfig::default();
        assert!(config.upstream.service_key.is_none());
        assert_eq!(config.upstream.timeout_secs, 10);
        assert!(config.upstream.base_url.contains("molit.go.kr"));
    }

    #[test]
    fn file_config_parses_partial_tables() {
        let config: ServerConfig =
            toml::from_str("[upstream]\nservice_key = \"abc123\"\n").unwrap();
        assert_eq!(config.upstream.service_key.as_deref(), Some("abc123"));
        // Unset fields keep their defaults.
        assert_eq!(config.upstream.timeout_secs, 10);
    }

    #[test]
    fn empty_env_key_stays_unconfigured() {
        std::env::set_var("MOLIT_SERVICE_KEY", "");
        let config = ServerConfig::from_env();
        assert!(config.upstream.service_key.is_none());
        std::env::remove_var("MOLIT_SERVICE_KEY");
    }
}
