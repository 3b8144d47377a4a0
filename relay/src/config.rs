use clap::Parser;
use reqwest::Url;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DOWNSTREAM_URL: &str = "http://localhost:8000/predict";

/// Startup configuration for the relay.
///
/// Every value has a default matching the stock deployment, so the binary
/// runs with no flags and no environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "prediction-relay", version, about)]
pub struct RelayConfig {
    /// Interface to listen on
    #[arg(long, env = "RELAY_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "RELAY_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Prediction endpoint requests are forwarded to
    #[arg(long, env = "RELAY_DOWNSTREAM_URL", default_value = DEFAULT_DOWNSTREAM_URL)]
    pub downstream_url: Url,

    /// Tracing filter directive, e.g. `info` or `prediction_relay=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl RelayConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
