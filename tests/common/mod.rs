// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde_json::{json, Value};
use std::sync::Arc;
use vincere_bridge::config::Config;
use vincere_bridge::routes::create_router;
use vincere_bridge::services::{Bridge, TokenStore};
use vincere_bridge::AppState;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Provider key used by tests: tenant, client, refresh token, stale id token.
#[allow(dead_code)]
pub const PROVIDER_KEY: &str = "tenant-key:client-1:refresh-1:old-id";

/// Identity token issued by the mocked refresh endpoint.
#[allow(dead_code)]
pub const FRESH_ID_TOKEN: &str = "fresh-id";

/// Create a test app whose CRM and identity provider live on `server`.
#[allow(dead_code)]
pub fn create_test_app(server: &MockServer) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        api_url: format!("{}/api/v2/", server.uri()),
        token_url: format!("{}/oauth2/token", server.uri()),
        ..Config::test_default()
    };
    let bridge = Bridge::from_config(&config, TokenStore::new());

    let state = Arc::new(AppState { config, bridge });
    (create_router(state.clone()), state)
}

/// Refresh-token exchange answered with [`FRESH_ID_TOKEN`].
#[allow(dead_code)]
pub async fn mount_refresh(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_token": FRESH_ID_TOKEN,
            "expires_in": 3600
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Serve `items` from the `kind` listing in pages of 100, each page hit once.
#[allow(dead_code)]
pub async fn mount_listing(server: &MockServer, kind: &str, items: Vec<Value>) {
    let total = items.len();
    let pages = total.div_ceil(100).max(1);

    for page in 0..pages {
        let start = page * 100;
        let end = (start + 100).min(total);
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/{}/search", kind)))
            .and(query_param("start", start.to_string()))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": { "total": total, "items": items[start..end].to_vec() }
            })))
            .expect(1)
            .mount(server)
            .await;
    }
}

/// `n` listing records with numeric IDs starting at `first_id`.
#[allow(dead_code)]
pub fn records(first_id: u64, n: u64) -> Vec<Value> {
    (first_id..first_id + n)
        .map(|id| json!({ "id": id, "name": format!("Person {}", id) }))
        .collect()
}
