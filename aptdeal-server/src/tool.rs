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

//! The `get_apartment_price` tool.
//!
//! Orchestrates matcher → query builder → upstream → normalizer, with the
//! three-way fallback decision:
//!
//! 1. no credential configured → sample data, disclosed as such (the
//!    upstream is never attempted);
//! 2. upstream success → real records; an empty result is reported as an
//!    informative no-data answer, never papered over with samples;
//! 3. upstream unavailable → sample data, disclosed as an API failure.
//!
//! Cases 1 and 3 carry distinct disclosure texts on purpose; collapsing
//! them loses diagnostic value for the caller.

use aptdeal_core::fallback::{self, FallbackReason};
use aptdeal_core::matcher;
use aptdeal_core::normalize::{self, ListingContext, DEFAULT_DISPLAY_LIMIT};
use aptdeal_core::query::TransactionQuery;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::mcp::protocol::Tool;
use crate::upstream::Upstream;

/// Tool name as registered with the MCP shell.
pub const TOOL_NAME: &str = "get_apartment_price";

/// Descriptors for all tools this server exposes.
pub fn tool_definitions() -> Vec<Tool> {
    vec![Tool {
        name: TOOL_NAME.to_string(),
        description: Some(
            "주소 또는 지역명으로 해당 월의 아파트 매매 실거래가를 조회합니다. \
             Resolves a Korean address or district name and returns apartment \
             sale transactions for the requested month from the MOLIT registry."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "address_or_region": {
                    "type": "string",
                    "description": "지역명 또는 주소 (예: '서초구', '서울특별시 강남구 테헤란로')"
                },
                "apartment_name": {
                    "type": "string",
                    "description": "아파트명 필터 (부분 일치, 선택)"
                },
                "year": {
                    "type": "string",
                    "description": "조회 연도, 4자리 (기본값: 올해)"
                },
                "month": {
                    "type": "string",
                    "description": "조회 월, 2자리 (기본값: 이번 달)"
                }
            },
            "required": ["address_or_region"]
        }),
    }]
}

/// Decoded `tools/call` arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct DealToolArgs {
    pub address_or_region: String,
    #[serde(default)]
    pub apartment_name: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
}

/// Tool executor. `upstream` is `None` when no credential is configured;
/// that state routes straight to the fallback without an API attempt.
pub struct DealTool {
    upstream: Option<Arc<dyn Upstream>>,
}

impl DealTool {
    pub fn new(upstream: Option<Arc<dyn Upstream>>) -> Self {
        Self { upstream }
    }

    /// Run one lookup and render the response text. Business outcomes
    /// (no match, no data, upstream failure) are all answers, not errors;
    /// `Err` is reserved for genuinely unexpected conditions and is turned
    /// into an `Error:` text block at the handler boundary.
    pub async fn execute(&self, args: DealToolArgs) -> anyhow::Result<String> {
        let Some(region) = matcher::resolve(&args.address_or_region) else {
            info!(input = %args.address_or_region, "no region matched");
            return Ok(matcher::no_match_message(&args.address_or_region));
        };

        let query = TransactionQuery::new(
            region.code.clone(),
            args.year.as_deref(),
            args.month.as_deref(),
        );
        let ctx = ListingContext {
            region_label: &region.matched_name,
            year: &query.year,
            month: &query.month,
        };
        info!(
            region = %region.matched_name,
            code = %region.code,
            period = %query.year_month(),
            "resolved region"
        );

        let Some(upstream) = &self.upstream else {
            return Ok(fallback::render(
                FallbackReason::MissingCredential,
                &ctx,
                args.apartment_name.as_deref(),
            ));
        };

        match upstream.fetch(&query).await {
            Ok(response) => {
                let records = normalize::records_from_response(response);
                if records.is_empty() {
                    return Ok(normalize::no_data_message(&ctx));
                }
                let total = records.len();
                let records = match &args.apartment_name {
                    Some(filter) => {
                        let kept = normalize::filter_by_name(records, filter);
                        if kept.is_empty() {
                            return Ok(normalize::no_match_for_filter_message(
                                &ctx, filter, total,
                            ));
                        }
                        kept
                    }
                    None => records,
                };
                Ok(normalize::render_listing(&records, &ctx, DEFAULT_DISPLAY_LIMIT))
            }
            Err(unavailable) => {
                warn!(reason = %unavailable, "upstream unavailable, serving sample data");
                Ok(fallback::render(
                    FallbackReason::UpstreamFailure,
                    &ctx,
                    args.apartment_name.as_deref(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{UpstreamResult, UpstreamUnavailable};
    use aptdeal_core::payload::Envelope;

    struct StubUpstream {
        outcome: fn() -> UpstreamResult,
    }

    #[async_trait::async_trait]
    impl Upstream for StubUpstream {
        async fn fetch(&self, _query: &TransactionQuery) -> UpstreamResult {
            (self.outcome)()
        }
    }

    fn args(address: &str) -> DealToolArgs {
        DealToolArgs {
            address_or_region: address.to_string(),
            apartment_name: None,
            year: Some("2024".to_string()),
            month: Some("06".to_string()),
        }
    }

    fn stub(outcome: fn() -> UpstreamResult) -> DealTool {
        DealTool::new(Some(Arc::new(StubUpstream { outcome })))
    }

    fn payload_response(json: &str) -> UpstreamResult {
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        Ok(envelope.response.unwrap())
    }

    #[tokio::test]
    async fn no_credential_serves_disclosed_samples() {
        let tool = DealTool::new(None);
        let text = tool.execute(args("서초구")).await.unwrap();
        assert!(text.contains("API 키가 설정되지 않아"));
        assert!(text.contains("1. 샘플아파트 1단지"));
        assert!(text.contains("2. 샘플아파트 2단지"));
        assert!(!text.contains("3."));
    }

    #[tokio::test]
    async fn single_object_payload_yields_one_formatted_record() {
        let tool = stub(|| {
            payload_response(
                r#"{"response":{"header":{"resultCode":"00"},"body":{"items":{"item":
                    {"아파트":"래미안","거래금액":"85,000","전용면적":84.97,"층":12,
                     "년":2024,"월":6,"일":15,"건축년도":2010}},"totalCount":1}}}"#,
            )
        });
        let mut call = args("서초구");
        call.apartment_name = Some("래미안".to_string());
        let text = tool.execute(call).await.unwrap();
        assert!(text.contains("1. 래미안"));
        assert!(text.contains("거래금액: 85,000만원"));
        assert!(!text.contains("샘플 데이터"));
    }

    #[tokio::test]
    async fn upstream_failure_disclosure_differs_from_no_credential() {
        let failing = stub(|| {
            Err(UpstreamUnavailable {
                reason: "simulated transport error".to_string(),
            })
        });
        let failed_text = failing.execute(args("서초구")).await.unwrap();
        assert!(failed_text.contains("API 호출에 실패하여"));

        let keyless = DealTool::new(None);
        let keyless_text = keyless.execute(args("서초구")).await.unwrap();
        assert_ne!(failed_text, keyless_text);
    }

    #[tokio::test]
    async fn empty_result_is_reported_not_replaced_by_samples() {
        let tool = stub(|| {
            payload_response(r#"{"response":{"body":{"items":"","totalCount":0}}}"#)
        });
        let text = tool.execute(args("서초구")).await.unwrap();
        assert!(text.contains("데이터가 없습니다"));
        assert!(!text.contains("샘플 데이터"));
    }

    #[tokio::test]
    async fn filter_excluding_everything_reports_total() {
        let tool = stub(|| {
            payload_response(
                r#"{"response":{"body":{"items":{"item":[
                    {"아파트":"반포자이","거래금액":"90,000"},
                    {"아파트":"아크로리버파크","거래금액":"110,000"}]}}}}"#,
            )
        });
        let mut call = args("서초구");
        call.apartment_name = Some("래미안".to_string());
        let text = tool.execute(call).await.unwrap();
        assert!(text.contains("'래미안'에 해당하는 거래가 없습니다"));
        assert!(text.contains("전체 2건"));
    }

    #[tokio::test]
    async fn unknown_address_gets_guidance() {
        let tool = DealTool::new(None);
        let text = tool.execute(args("부산 해운대구")).await.unwrap();
        assert!(text.contains("지원하는 지역을 찾지 못했습니다"));
    }
}
