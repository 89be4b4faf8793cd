//! Admin listener started by the server.

use axum::{http::HeaderMap, http::StatusCode as AxumStatus, routing::get, Router};
use reqwest::StatusCode;
use std::time::Duration;

use edge_gate::EdgeConfig;

mod common;

async fn verify(headers: HeaderMap) -> AxumStatus {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer staff-token") => AxumStatus::OK,
        _ => AxumStatus::UNAUTHORIZED,
    }
}

fn admin_config(admin_port: u16, backend_url: String) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.admin.enabled = true;
    config.admin.api_key = "admin-secret".into();
    config.admin.bind_address = format!("127.0.0.1:{admin_port}");
    config.admin.remote_verify = true;
    config.backend_api.base_url = backend_url;
    config
}

async fn get_status(client: &reqwest::Client, admin_port: u16, token: &str) -> StatusCode {
    client
        .get(format!("http://127.0.0.1:{admin_port}/admin/stats"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_admin_key_and_remote_tokens() {
    let backend = common::start_router(
        Router::new().route("/api/admin/blog/auth/verify", get(verify)),
    )
    .await;
    let admin_port = common::free_port().await;
    let (_, shutdown) = common::start_gate(admin_config(admin_port, format!("http://{backend}"))).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let client = common::client();

    assert_eq!(get_status(&client, admin_port, "admin-secret").await, StatusCode::OK);
    assert_eq!(get_status(&client, admin_port, "staff-token").await, StatusCode::OK);
    assert_eq!(get_status(&client, admin_port, "forged").await, StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("http://127.0.0.1:{admin_port}/admin/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_verifier_admits_provisionally() {
    let unused = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let backend = unused.local_addr().unwrap();
    drop(unused);

    let admin_port = common::free_port().await;
    let (_, shutdown) = common::start_gate(admin_config(admin_port, format!("http://{backend}"))).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let client = common::client();

    assert_eq!(get_status(&client, admin_port, "any-token").await, StatusCode::OK);

    shutdown.trigger();
}

#[tokio::test]
async fn test_stats_reflect_gate_decisions() {
    let upstream = common::start_echo_upstream().await;
    let admin_port = common::free_port().await;
    let mut config = admin_config(admin_port, "http://127.0.0.1:9".into());
    config.admin.remote_verify = false;
    config.upstream.address = upstream.to_string();
    let (addr, shutdown) = common::start_gate(config).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let client = common::client();

    client
        .get(format!("http://{addr}/.env"))
        .header("User-Agent", "Mozilla/5.0")
        .send()
        .await
        .unwrap();
    client
        .get(format!("http://{addr}/"))
        .header("User-Agent", "Scrapy/2.11")
        .send()
        .await
        .unwrap();

    let stats: serde_json::Value = client
        .get(format!("http://127.0.0.1:{admin_port}/admin/stats"))
        .bearer_auth("admin-secret")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["not_found"], 1);
    assert_eq!(stats["forbidden"], 1);
    assert_eq!(stats["forwarded"], 0);

    shutdown.trigger();
}
