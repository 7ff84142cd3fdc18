// Shared fixtures: an in-process stand-in for the prediction service and a
// throwaway public directory.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use eios_demo::config::Config;
use reqwest::Url;
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct Stub {
    pub status: StatusCode,
    pub predict: Value,
    pub extract: Value,
    pub delay: Duration,
    pub seen: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Stub {
    pub fn new(predict: Value, extract: Value) -> Self {
        Self {
            status: StatusCode::OK,
            predict,
            extract,
            delay: Duration::ZERO,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::new(Value::Null, Value::Null)
        }
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.seen.lock().unwrap().clone()
    }
}

async fn reply(stub: &Stub, path: &str, body: Value, canned: &Value) -> (StatusCode, Json<Value>) {
    stub.seen.lock().unwrap().push((path.to_string(), body));
    if !stub.delay.is_zero() {
        tokio::time::sleep(stub.delay).await;
    }
    (stub.status, Json(canned.clone()))
}

async fn predict(State(stub): State<Stub>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let canned = stub.predict.clone();
    reply(&stub, "/predict", body, &canned).await
}

async fn extract(State(stub): State<Stub>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let canned = stub.extract.clone();
    reply(&stub, "/extract", body, &canned).await
}

/// Serves `stub` on an ephemeral port and returns its base URL.
pub async fn spawn_stub(stub: Stub) -> Url {
    let app = Router::new()
        .route("/predict", post(predict))
        .route("/extract", post(extract))
        .with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// A base URL nothing is listening on.
pub async fn dead_server() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// Creates a fresh public directory holding `files`.
pub fn public_dir(name: &str, files: &[(&str, String)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("eios-demo-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    for (file, contents) in files {
        std::fs::write(dir.join(file), contents).unwrap();
    }
    dir
}

pub fn articles_csv(rows: usize) -> String {
    let mut csv = String::from("title,summary,translatedDescription,description,importDateUTC\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "Article {i},Summary {i},Translated {i},Description {i},2024-03-01T08:00:00.000Z\n"
        ));
    }
    csv
}

pub fn config(public_dir: PathBuf, prediction_server: Url) -> Config {
    Config {
        server_addr: "127.0.0.1:0".parse().unwrap(),
        public_dir,
        prediction_server,
        prediction_timeout: Duration::from_secs(5),
    }
}
