use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::error::Error as _;
use thiserror::Error;

/// Message placed in the `error` field of every failure envelope.
pub const PREDICTION_FAILURE: &str = "prediction failure";

/// Ways a forwarded prediction can fail.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The request never produced a usable response: connection refused,
    /// DNS failure, timeout, or a body that could not be read.
    #[error("downstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The downstream answered with a non-2xx status.
    #[error("downstream responded with status {status}")]
    Status {
        status: StatusCode,
        body: Option<Value>,
    },

    #[error("forwarding task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl RelayError {
    /// This error's message followed by every underlying cause, joined with
    /// `": "`, e.g. `... error sending request ...: tcp connect error: Connection refused`.
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        if let RelayError::Transport(_) | RelayError::Task(_) = self {
            // `#[from]` makes the wrapped error the source, and its text is
            // already part of our Display.
            source = source.and_then(|inner| inner.source());
        }
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// The value reported back to the caller as `details`: the downstream
    /// error body when there is one, otherwise the full error message.
    pub fn details(&self) -> Value {
        match self {
            RelayError::Status {
                body: Some(body), ..
            } => body.clone(),
            other => Value::String(other.message()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Value,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: PREDICTION_FAILURE.to_string(),
            details: self.details(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
