//! Spending forecast handler

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{AppError, AppState};
use dompet_core::models::coerce_all;
use dompet_core::{SpendingForecast, SpendingInput, SpendingPoint};

/// POST /predict - Forecast daily spending after the last observed date
///
/// Model fitting is CPU-bound, so it runs on the blocking pool.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vec<SpendingInput>>, JsonRejection>,
) -> Result<Json<SpendingForecast>, AppError> {
    let Json(inputs) = payload?;
    if inputs.is_empty() {
        return Err(AppError::bad_request("No transaction data provided"));
    }

    let points: Vec<SpendingPoint> = coerce_all(inputs)?;
    let forecaster = state.forecaster.clone();
    let forecast = tokio::task::spawn_blocking(move || forecaster.forecast(&points)).await??;

    Ok(Json(forecast))
}
