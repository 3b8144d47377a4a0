//! Shared harness for relay integration tests.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use prediction_relay::{router, AppState, PredictionClient};
use reqwest::Url;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::fmt::MakeWriter;

/// A request as seen by the mock downstream.
#[derive(Debug, Clone)]
pub struct Captured {
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    captured: Arc<Mutex<Vec<Captured>>>,
}

/// Mock prediction service answering every `POST /predict` with a fixed
/// status and body, recording what it received.
pub struct MockDownstream {
    pub url: Url,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockDownstream {
    pub async fn start(status: u16, body: &'static str) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    /// Like [`MockDownstream::start`], but waits `delay` after recording a
    /// request before answering it.
    pub async fn start_delayed(status: u16, body: &'static str, delay: Duration) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            delay,
            captured: captured.clone(),
        };

        let app = Router::new()
            .route("/predict", post(mock_predict))
            .with_state(state);

        let addr = serve(app).await;
        let url = Url::parse(&format!("http://{}/predict", addr)).unwrap();

        Self { url, captured }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn mock_predict(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(&'static str, &'static str); 1], &'static str) {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .captured
        .lock()
        .unwrap()
        .push(Captured { content_type, body });
    tokio::time::sleep(state.delay).await;

    (
        state.status,
        [("content-type", "application/json")],
        state.body,
    )
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Starts the relay forwarding to `downstream`, returning its base URL.
pub async fn start_relay(downstream: Url) -> String {
    let state = AppState::new(PredictionClient::with_client(client(), downstream));
    let addr = serve(router(state)).await;
    format!("http://{}", addr)
}

/// A URL on which nothing is listening.
pub async fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/predict", addr)).unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Writer collecting formatted log output for assertions.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
