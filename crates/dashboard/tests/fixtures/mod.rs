// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! Test fixtures for the dashboard
//!
//! Mounts node API responses on a wiremock server and builds feeds wired to a
//! real `BraidPoolClient`.

use braidpool_client::{BraidPoolClient, BraidPoolConfig};
use dashboard::{DashboardConfig, TransactionFeed};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const NOW: u64 = 1_700_000_600;

pub fn node_transactions() -> Value {
    json!([
        {
            "txid": "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0",
            "category": "mempool",
            "size": 225,
            "fee": 0.000_022_5,
            "fee_rate": 10.0,
            "inputs": 1,
            "outputs": 2,
            "confirmations": 0,
            "timestamp": 1_700_000_000
        },
        {
            "txid": "0011223344556677889900112233445566778899",
            "category": "CONFIRMED",
            "size": 1_450,
            "fee": 0.000_145,
            "fee_rate": 100.0,
            "inputs": 3,
            "outputs": 1,
            "confirmations": 6,
            "timestamp": 1_699_990_000
        },
        { "hash": "record-without-txid" }
    ])
}

pub fn node_mempool_info() -> Value {
    json!({
        "count": 42,
        "vsize": 12_345,
        "total_fee": 0.01,
        "fee_histogram": [[1.0, 10], [10.0, 32]]
    })
}

pub async fn mount(mock_server: &MockServer, endpoint: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(template)
        .mount(mock_server)
        .await;
}

pub async fn healthy_node() -> MockServer {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/transactions",
        ResponseTemplate::new(200).set_body_json(node_transactions()),
    )
    .await;
    mount(
        &mock_server,
        "/mempool/info",
        ResponseTemplate::new(200).set_body_json(node_mempool_info()),
    )
    .await;
    mock_server
}

/// One-shot feed against the mock node, without retries
pub fn feed_for(
    mock_server: &MockServer,
    config: &DashboardConfig,
) -> TransactionFeed<BraidPoolClient> {
    let client_config = BraidPoolConfig::new(&mock_server.uri(), 2_000, 0)
        .expect("Failed to build client config");
    let client = BraidPoolClient::new(client_config).expect("Failed to create client");
    TransactionFeed::new(client, config)
}

pub fn one_shot_config() -> DashboardConfig {
    DashboardConfig {
        auto_refresh: false,
        ..DashboardConfig::default()
    }
}
