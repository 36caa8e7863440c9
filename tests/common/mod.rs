use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode as AxumStatus;
use axum::routing::post;
use axum::{Json, Router};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

use imei_intake::config::Config;
use imei_intake::state::AppState;

/// A running test server with its own scratch directory for the CSV fallback.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub data_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON value to `/save`, return (body, status).
    pub async fn save(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/save"))
            .json(data)
            .send()
            .await
            .expect("save request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a raw body to `/save`, return (body, status).
    pub async fn save_raw(&self, body: &'static str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/save"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("save request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Contents of the CSV fallback, or None if it was never created.
    pub fn csv(&self) -> Option<String> {
        std::fs::read_to_string(&self.data_path).ok()
    }

    /// Data rows of the CSV fallback, header excluded.
    pub fn csv_rows(&self) -> Vec<csv::StringRecord> {
        let Ok(mut reader) = csv::Reader::from_path(&self.data_path) else {
            return Vec::new();
        };
        reader.records().map(|r| r.expect("bad csv row")).collect()
    }
}

pub fn test_config(dir: &TempDir, webhook_url: &str, forward_timeout: Duration) -> Config {
    Config {
        webhook_url: webhook_url.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        data_path: dir.path().join("data.csv"),
        static_dir: PathBuf::from("static"),
        forward_timeout,
        max_body_size: 1_048_576,
    }
}

/// Spawn the app with local CSV fallback (no webhook).
pub async fn spawn_app() -> TestApp {
    spawn_app_with("", Duration::from_secs(20)).await
}

/// Spawn the app forwarding to `webhook_url` (empty disables forwarding).
pub async fn spawn_app_with(webhook_url: &str, forward_timeout: Duration) -> TestApp {
    spawn_app_configured(webhook_url, forward_timeout, |_| {}).await
}

/// Spawn the app after letting `adjust` tweak the generated config.
pub async fn spawn_app_configured(
    webhook_url: &str,
    forward_timeout: Duration,
    adjust: impl FnOnce(&mut Config),
) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = test_config(&dir, webhook_url, forward_timeout);
    adjust(&mut config);
    let data_path = config.data_path.clone();

    let state = AppState::new(config).expect("Failed to build app state");
    let app = imei_intake::build_app(state);

    let addr = serve(app).await;

    TestApp {
        addr,
        client: Client::new(),
        data_path,
        _dir: dir,
    }
}

/// Stand-in for the spreadsheet webhook. Records every JSON body it receives.
pub struct FakeWebhook {
    pub addr: SocketAddr,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl FakeWebhook {
    pub fn url(&self) -> String {
        format!("http://{}/exec", self.addr)
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct WebhookBehavior {
    received: Arc<Mutex<Vec<Value>>>,
    status: AxumStatus,
    body: &'static str,
    delay: Duration,
}

/// Spawn a fake webhook answering `status` with `body` after `delay`.
pub async fn spawn_webhook(status: u16, body: &'static str, delay: Duration) -> FakeWebhook {
    let received = Arc::new(Mutex::new(Vec::new()));
    let behavior = WebhookBehavior {
        received: received.clone(),
        status: AxumStatus::from_u16(status).unwrap(),
        body,
        delay,
    };

    let app = Router::new()
        .route("/exec", post(webhook_handler))
        .with_state(behavior);

    FakeWebhook {
        addr: serve(app).await,
        received,
    }
}

async fn webhook_handler(
    State(behavior): State<WebhookBehavior>,
    Json(payload): Json<Value>,
) -> (AxumStatus, &'static str) {
    behavior.received.lock().unwrap().push(payload);
    tokio::time::sleep(behavior.delay).await;
    (behavior.status, behavior.body)
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    listener.local_addr().unwrap()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}
