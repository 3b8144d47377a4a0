use axum::{extract::Request, middleware::Next, response::Response};
use chrono::{SecondsFormat, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global fmt subscriber filtered by `filter`.
pub fn init(filter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(filter)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(())
}

/// Access log: one line per inbound request, before it reaches a handler.
pub async fn log_request(request: Request, next: Next) -> Response {
    tracing::info!(
        timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        method = %request.method(),
        uri = %request.uri(),
        "incoming request"
    );

    next.run(request).await
}
