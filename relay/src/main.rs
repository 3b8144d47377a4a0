use clap::Parser;
use prediction_relay::{logging, router, AppState, PredictionClient, RelayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RelayConfig::parse();
    logging::init(&config.log_filter)?;

    let state = AppState::new(PredictionClient::new(config.downstream_url.clone()));
    let downstream = state.predictions.url().clone();
    let app = router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        downstream = %downstream,
        "prediction relay listening"
    );
    tracing::info!("Available endpoints:");
    tracing::info!("  - GET  /         - Welcome message");
    tracing::info!("  - POST /predict  - Forward a prediction request");

    axum::serve(listener, app).await?;

    Ok(())
}
