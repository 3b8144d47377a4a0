use reqwest::{header, Url};
use serde_json::Value;

use crate::error::RelayError;

/// Client for the downstream prediction service.
///
/// Holds one `reqwest::Client` for the life of the process and the single
/// endpoint every prediction is posted to.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    url: Url,
}

impl PredictionClient {
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Posts `payload` to the downstream endpoint exactly once and returns the
    /// decoded response body.
    pub async fn predict(&self, payload: &Value) -> Result<Value, RelayError> {
        let response = self
            .http
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = Some(decode_body(&bytes)).filter(|body| !is_falsy(body));
            return Err(RelayError::Status { status, body });
        }

        Ok(decode_body(&bytes))
    }
}

/// Decodes a response body as JSON, falling back to the raw text as a JSON
/// string when it is not valid JSON.
pub(crate) fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Error bodies that carry nothing worth reporting: `null`, `false`, zero,
/// and the empty string (which is also what an empty body decodes to).
fn is_falsy(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
