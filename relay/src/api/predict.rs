use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;

use crate::downstream::PredictionClient;
use crate::error::RelayError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: Value,
}

/// Forwards the request body to the prediction service and wraps its answer.
///
/// The outbound call and its logging run on their own task so that a caller
/// hanging up does not cancel a prediction already in flight.
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, RelayError> {
    tracing::info!(payload = %payload, "prediction request received");

    let client = state.predictions.clone();
    let prediction = tokio::spawn(async move { forward(&client, &payload).await })
        .await
        .map_err(|err| {
            let err = RelayError::from(err);
            tracing::error!(error = %err.message(), "prediction failed");
            err
        })??;

    Ok((StatusCode::OK, Json(PredictionResponse { prediction })))
}

async fn forward(client: &PredictionClient, payload: &Value) -> Result<Value, RelayError> {
    match client.predict(payload).await {
        Ok(prediction) => {
            tracing::info!(response = %prediction, "downstream responded");
            Ok(prediction)
        }
        Err(err) => {
            tracing::error!(error = %err.message(), "prediction failed");
            Err(err)
        }
    }
}
