//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use dashboard_transporter::health::{BackendCandidates, BackendLocator};
use dashboard_transporter::http::TransporterClient;
use tokio::net::TcpListener;
use url::Url;

/// A request observed by a mock backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    /// Path and query as sent.
    pub uri: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

type Responder = Arc<dyn Fn(&Recorded) -> (StatusCode, String) + Send + Sync>;

/// Programmable backend recording every request it receives.
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    /// Start a backend on an ephemeral port; `responder` decides each reply.
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&Recorded) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responder: Responder = Arc::new(responder);

        let log = requests.clone();
        let app = Router::new().fallback(move |req: Request| {
            let log = log.clone();
            let responder = responder.clone();
            async move {
                let (parts, body) = req.into_parts();
                let bytes = axum::body::to_bytes(body, usize::MAX)
                    .await
                    .unwrap_or_default();
                let recorded = Recorded {
                    method: parts.method.to_string(),
                    path: parts.uri.path().to_string(),
                    uri: parts.uri.to_string(),
                    headers: parts.headers,
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                };
                let reply = responder(&recorded);
                log.lock().unwrap().push(recorded);
                reply
            }
        });

        let base_url = spawn_router(app).await;
        Self { base_url, requests }
    }

    /// A backend whose `/health` answers 200 and every other path with `routes`.
    pub async fn healthy<F>(routes: F) -> Self
    where
        F: Fn(&Recorded) -> (StatusCode, String) + Send + Sync + 'static,
    {
        Self::start(move |req| {
            if req.path == "/health" {
                (StatusCode::OK, "ok".into())
            } else {
                routes(req)
            }
        })
        .await
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received on `path`, ignoring the query.
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// Requests other than health probes.
    pub fn api_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path != "/health")
            .collect()
    }
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// Base URL with nothing listening behind it.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn json(status: StatusCode, value: serde_json::Value) -> (StatusCode, String) {
    (status, value.to_string())
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn locator<S: AsRef<str>>(candidates: &[S], origin: Option<&str>) -> Arc<BackendLocator> {
    Arc::new(BackendLocator::new(
        BackendCandidates::new(candidates),
        origin.map(|o| Url::parse(o).unwrap()),
        http_client(),
        Duration::from_secs(2),
    ))
}

pub fn client<S: AsRef<str>>(candidates: &[S]) -> TransporterClient {
    TransporterClient::new(http_client(), locator(candidates, None))
}
