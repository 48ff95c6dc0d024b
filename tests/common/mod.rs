//! Shared utilities for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use car_registry::{DocumentStore, HttpServer, MemoryStore, ServiceConfig, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A running server on an ephemeral port. Shuts down on drop.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_user(&self, name: &str, age: i64, email: &str) -> Value {
        let res = self
            .client
            .post(self.url("/user"))
            .json(&json!({ "name": name, "age": age, "email": email }))
            .send()
            .await
            .expect("server unreachable");
        assert_eq!(res.status(), 201, "user creation should succeed");
        res.json().await.unwrap()
    }

    pub async fn create_car(&self, brand: &str, carriage: i64) -> Value {
        let res = self
            .client
            .post(self.url("/car"))
            .json(&json!({ "brand": brand, "carriage": carriage }))
            .send()
            .await
            .expect("server unreachable");
        assert_eq!(res.status(), 201, "car creation should succeed");
        res.json().await.unwrap()
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status().as_u16();
        let body = res.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get_text(&self, path: &str) -> (u16, String) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        (res.status().as_u16(), res.text().await.unwrap())
    }

    pub async fn put_json(&self, path: &str, body: Value) -> (u16, String) {
        let res = self.client.put(self.url(path)).json(&body).send().await.unwrap();
        (res.status().as_u16(), res.text().await.unwrap())
    }

    pub async fn delete(&self, path: &str) -> (u16, String) {
        let res = self.client.delete(self.url(path)).send().await.unwrap();
        (res.status().as_u16(), res.text().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server over a fresh in-memory store.
pub async fn spawn_server() -> TestServer {
    spawn_server_with(Arc::new(MemoryStore::new())).await
}

/// Start a server over the given store.
pub async fn spawn_server_with(store: Arc<dyn DocumentStore>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&ServiceConfig::default(), store);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        base_url: format!("http://{}", addr),
        client,
        shutdown,
    }
}
