use bloglist_api::{
    create_memory_repository, create_memory_sessions, create_noop_metrics, create_prom_metrics,
    create_router_with, AppState,
};
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

mod common;
use common::TestServer;

// NOTE: Prometheus metrics use a global recorder shared by every server in
// this process, so the prom tests run serially.

async fn prom_server() -> TestServer {
    // ---
    let state = AppState::new(
        create_memory_repository(),
        create_memory_sessions(Duration::from_secs(3600)),
        create_prom_metrics().expect("prometheus metrics"),
    );
    TestServer::with_router(create_router_with(state)).await
}

#[tokio::test]
#[serial]
async fn metrics_endpoint_with_prometheus() {
    // ---
    let server = prom_server().await;

    // First, generate some traffic and domain events
    let _ = server.client.get(server.url("/health")).send().await.unwrap();
    let (_, token) = server.register_and_login("metered").await;
    server.add_blog(&token, "Counted", "Someone", 3).await;

    // Give metrics a moment to be recorded
    sleep(Duration::from_millis(50)).await;

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());

    let body = res.text().await.unwrap();
    assert!(body.contains("blogs_created_total"), "metrics were: {body}");
    assert!(body.contains("users_created_total"), "metrics were: {body}");
    assert!(body.contains("http_requests_total"), "metrics were: {body}");
    assert!(
        body.contains("path=\"/api/blogs\""),
        "requests should be labelled by route: {body}"
    );
}

#[tokio::test]
#[serial]
async fn blog_ids_do_not_leak_into_labels() {
    // ---
    let server = prom_server().await;
    let id = uuid::Uuid::new_v4();

    let _ = server
        .client
        .get(server.url(&format!("/api/blogs/{id}")))
        .send()
        .await
        .unwrap();

    let body = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(!body.contains(&id.to_string()));
    assert!(body.contains("path=\"/api/blogs/{id}\""), "metrics were: {body}");
}

#[tokio::test]
async fn metrics_endpoint_with_noop() {
    // ---
    let server = TestServer::new().await;

    let _ = server.client.get(server.url("/health")).send().await.unwrap();

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();

    // Should still return success even with noop metrics
    assert!(res.status().is_success());
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn metrics_endpoint_survives_load() {
    // ---
    let server = Arc::new(prom_server().await);

    // Generate some load
    let futures = (0..20).map(|i| {
        let server = Arc::clone(&server);
        async move {
            let endpoint = match i % 3 {
                0 => "/health",
                1 => "/api/stats",
                _ => "/metrics",
            };
            server.client.get(server.url(endpoint)).send().await
        }
    });

    let responses = futures::future::join_all(futures).await;

    for (i, response) in responses.into_iter().enumerate() {
        // ---
        let response = response.unwrap_or_else(|_| panic!("Request {i} should succeed"));
        assert!(
            response.status().is_success(),
            "Request {i} should return success"
        );
    }

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    assert!(!res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn metrics_content_type_is_prometheus_text() {
    // ---
    let state = AppState::new(
        create_memory_repository(),
        create_memory_sessions(Duration::from_secs(60)),
        create_noop_metrics().unwrap(),
    );
    let server = TestServer::with_router(create_router_with(state)).await;

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();

    let content_type = res.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/plain"), "got {content_type}");
}
