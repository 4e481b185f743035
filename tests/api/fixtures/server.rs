// tests/api/fixtures/server.rs

// dependencies
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use user_service::app::{build_state, router, serve};
use user_service::clock::ManualClock;
use user_service::config::RateLimitConfig;
use user_service::notify::{NotificationSink, notification_worker};

// A real server on an ephemeral port, driven by a manual clock
pub struct TestServer {
    pub base: String,
    pub clock: ManualClock,
    pub client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub async fn start(config: RateLimitConfig) -> Self {
        let clock = ManualClock::new(0);
        let (notifications, notify_rx) = NotificationSink::channel(16);
        tokio::spawn(notification_worker(notify_rx));

        let state = build_state(&config, "/api", Arc::new(clock.clone()), notifications);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(serve(listener, router(state), async move {
            let _ = shutdown_rx.await;
        }));

        Self {
            base: format!("http://{addr}"),
            clock,
            client: reqwest::Client::new(),
            _shutdown: shutdown_tx,
        }
    }

    // Limit high enough that CRUD tests never trip it
    pub async fn unlimited() -> Self {
        Self::start(RateLimitConfig::new(10_000, 1000)).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client.post(self.url(path)).json(body).send().await.unwrap()
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client.put(self.url(path)).json(body).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }

    pub async fn create_user(&self, email: &str, phone: &str) -> Value {
        let response = self.post_json("/api/user", &user_body(email, phone)).await;
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.unwrap()
    }
}

pub fn user_body(email: &str, phone: &str) -> Value {
    json!({
        "name": "John",
        "surname": "Doe",
        "email": email,
        "password": "password123",
        "phoneNumber": phone,
        "dateOfBirth": "1990-01-01"
    })
}
