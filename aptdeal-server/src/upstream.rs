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

//! Upstream client for the MOLIT apartment-trade API.
//!
//! One GET per invocation, first page only, no retries. Every failure mode
//! (transport, non-2xx status, undecodable body) is swallowed into the
//! typed [`UpstreamUnavailable`] signal and logged; nothing from this
//! module ever propagates a raw transport fault past its boundary.

use aptdeal_core::payload::{ApiResponse, Envelope};
use aptdeal_core::query::TransactionQuery;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;

/// Fixed page size: only the first page of results is ever retrieved.
const NUM_OF_ROWS: &str = "100";
const PAGE_NO: &str = "1";

/// The upstream could not be queried. The reason is for operator logs
/// only; callers react to the signal, not the text.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct UpstreamUnavailable {
    pub reason: String,
}

impl UpstreamUnavailable {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type UpstreamResult = Result<ApiResponse, UpstreamUnavailable>;

/// Seam for the registry call, so the tool can be driven by a stub in
/// tests.
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, query: &TransactionQuery) -> UpstreamResult;
}

/// Reqwest-backed client against the real registry endpoint.
pub struct HttpUpstream {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig, service_key: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            service_key,
        })
    }
}

#[async_trait::async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, query: &TransactionQuery) -> UpstreamResult {
        let deal_ymd = query.year_month();
        debug!(region = %query.region_code, %deal_ymd, "fetching apartment deals");

        let result = self
            .http
            .get(&self.base_url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("LAWD_CD", query.region_code.as_str()),
                ("DEAL_YMD", deal_ymd.as_str()),
                ("numOfRows", NUM_OF_ROWS),
                ("pageNo", PAGE_NO),
                ("_type", "json"),
            ])
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "upstream request failed");
                return Err(UpstreamUnavailable::new(format!("request failed: {e}")));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "upstream returned non-success status");
            return Err(UpstreamUnavailable::new(format!("HTTP status {status}")));
        }

        let envelope: Envelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "upstream payload could not be decoded");
                return Err(UpstreamUnavailable::new(format!("decode failed: {e}")));
            }
        };

        envelope
            .response
            .ok_or_else(|| UpstreamUnavailable::new("missing response envelope"))
    }
}
