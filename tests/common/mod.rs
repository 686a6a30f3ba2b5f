// Test helpers are intentionally partially used
#![allow(dead_code)]

use bloglist_api::{
    create_memory_repository, create_memory_sessions, create_noop_metrics, create_router_with,
    AppState,
};
use axum::Router;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

// ============================================================================
// Test Setup
// ============================================================================

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    /// Starts a server over fresh in-memory storage. Each server has its own
    /// blogs and users.
    pub async fn new() -> Self {
        // ---
        let state = AppState::new(
            create_memory_repository(),
            create_memory_sessions(Duration::from_secs(3600)),
            create_noop_metrics().expect("noop metrics"),
        );
        Self::with_router(create_router_with(state)).await
    }

    pub async fn with_router(app: Router) -> Self {
        // ---
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    /// Registers `username` with password `secret` and returns the user JSON.
    pub async fn register(&self, username: &str) -> Value {
        // ---
        let res = self
            .client
            .post(self.url("/api/users"))
            .json(&json!({ "username": username, "name": format!("{username} Name"), "password": "secret" }))
            .send()
            .await
            .expect("register request");
        assert_eq!(res.status(), 201, "registering {username}");
        res.json::<Value>().await.unwrap()["data"].clone()
    }

    /// Logs `username` in with password `secret` and returns the token.
    pub async fn login(&self, username: &str) -> String {
        // ---
        let res = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": "secret" }))
            .send()
            .await
            .expect("login request");
        assert_eq!(res.status(), 200, "logging in {username}");
        let body: Value = res.json().await.unwrap();
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Registers and logs in, returning `(user_id, token)`.
    pub async fn register_and_login(&self, username: &str) -> (String, String) {
        // ---
        let user = self.register(username).await;
        let token = self.login(username).await;
        (user["id"].as_str().unwrap().to_string(), token)
    }

    pub async fn create_blog(&self, token: &str, blog: Value) -> Response {
        // ---
        self.client
            .post(self.url("/api/blogs"))
            .bearer_auth(token)
            .json(&blog)
            .send()
            .await
            .expect("create blog request")
    }

    /// Creates a blog and returns its JSON, asserting `201 Created`.
    pub async fn add_blog(&self, token: &str, title: &str, author: &str, likes: u64) -> Value {
        // ---
        let res = self
            .create_blog(
                token,
                json!({ "title": title, "author": author, "url": format!("https://blogs.example/{title}"), "likes": likes }),
            )
            .await;
        assert_eq!(res.status(), 201, "creating blog {title}");
        res.json::<Value>().await.unwrap()["data"].clone()
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        // ---
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status().as_u16();
        let body = res.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }
}
