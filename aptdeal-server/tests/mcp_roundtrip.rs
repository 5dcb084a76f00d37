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

//! End-to-end MCP round trips through the in-process buffer transport.

use aptdeal_core::payload::Envelope;
use aptdeal_core::query::TransactionQuery;
use aptdeal_server::mcp::{self, BufferTransport, JsonRpcResponse, McpHandler};
use aptdeal_server::tool::DealTool;
use aptdeal_server::upstream::{Upstream, UpstreamResult, UpstreamUnavailable};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;

struct StubUpstream {
    outcome: fn() -> UpstreamResult,
}

#[async_trait::async_trait]
impl Upstream for StubUpstream {
    async fn fetch(&self, _query: &TransactionQuery) -> UpstreamResult {
        (self.outcome)()
    }
}

struct Client {
    requests: mpsc::Sender<String>,
    responses: mpsc::Receiver<JsonRpcResponse>,
}

impl Client {
    async fn call(&mut self, frame: serde_json::Value) -> JsonRpcResponse {
        self.requests.send(frame.to_string()).await.unwrap();
        self.responses.recv().await.unwrap()
    }
}

fn spawn_server(upstream: Option<Arc<dyn Upstream>>) -> Client {
    let (req_tx, req_rx) = mpsc::channel(8);
    let (resp_tx, resp_rx) = mpsc::channel(8);
    let transport = BufferTransport::new(req_rx, resp_tx);
    let handler = McpHandler::new(DealTool::new(upstream));
    tokio::spawn(async move {
        mcp::server::run(transport, handler).await.unwrap();
    });
    Client {
        requests: req_tx,
        responses: resp_rx,
    }
}

fn call_frame(id: i64, address: &str, apartment: Option<&str>) -> serde_json::Value {
    let mut arguments = json!({
        "address_or_region": address,
        "year": "2024",
        "month": "06",
    });
    if let Some(name) = apartment {
        arguments["apartment_name"] = json!(name);
    }
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": "get_apartment_price", "arguments": arguments},
    })
}

fn response_text(response: &JsonRpcResponse) -> String {
    response.result.as_ref().unwrap()["content"][0]["text"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn initialize_then_list_then_call() {
    let mut client = spawn_server(None);

    let init = client
        .call(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": "2024-11-05", "capabilities": {},
                       "clientInfo": {"name": "test", "version": "0"}},
        }))
        .await;
    let init_result = init.result.unwrap();
    assert_eq!(init_result["serverInfo"]["name"], "apartment-price-server");

    let list = client
        .call(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await;
    assert_eq!(list.result.unwrap()["tools"][0]["name"], "get_apartment_price");

    let call = client.call(call_frame(3, "서초구", None)).await;
    let text = response_text(&call);
    assert!(text.contains("샘플 데이터"));
}

#[tokio::test]
async fn no_credential_scenario_discloses_and_lists_two_samples() {
    let mut client = spawn_server(None);
    let response = client.call(call_frame(1, "서초구", None)).await;
    let text = response_text(&response);
    assert!(text.contains("API 키가 설정되지 않아"));
    assert!(text.contains("1. 샘플아파트 1단지"));
    assert!(text.contains("2. 샘플아파트 2단지"));
}

#[tokio::test]
async fn single_object_payload_scenario() {
    let upstream: Arc<dyn Upstream> = Arc::new(StubUpstream {
        outcome: || {
            let envelope: Envelope = serde_json::from_str(
                r#"{"response":{"header":{"resultCode":"00"},"body":{"items":{"item":
                    {"아파트":"래미안","거래금액":"85,000","전용면적":84.97,"층":12,
                     "년":2024,"월":6,"일":15,"건축년도":2010}},"totalCount":1}}}"#,
            )
            .unwrap();
            Ok(envelope.response.unwrap())
        },
    });
    let mut client = spawn_server(Some(upstream));
    let response = client.call(call_frame(1, "서초구", Some("래미안"))).await;
    let text = response_text(&response);
    assert!(text.contains("1. 래미안"));
    assert!(text.contains("85,000만원"));
    assert!(!text.contains("샘플 데이터"));
}

#[tokio::test]
async fn upstream_failure_scenario_differs_from_keyless() {
    let failing: Arc<dyn Upstream> = Arc::new(StubUpstream {
        outcome: || {
            Err(UpstreamUnavailable {
                reason: "simulated transport error".to_string(),
            })
        },
    });
    let mut failed_client = spawn_server(Some(failing));
    let failed = failed_client.call(call_frame(1, "서초구", None)).await;
    let failed_text = response_text(&failed);
    assert!(failed_text.contains("API 호출에 실패하여"));

    let mut keyless_client = spawn_server(None);
    let keyless = keyless_client.call(call_frame(1, "서초구", None)).await;
    assert_ne!(failed_text, response_text(&keyless));
}

#[tokio::test]
async fn malformed_frame_gets_parse_error_and_keeps_serving() {
    let mut client = spawn_server(None);
    client.requests.send("not json".to_string()).await.unwrap();
    let parse_error = client.responses.recv().await.unwrap();
    assert_eq!(parse_error.error.unwrap().code, -32700);

    // Connection is still alive.
    let response = client
        .call(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}))
        .await;
    assert!(response.result.is_some());
}
