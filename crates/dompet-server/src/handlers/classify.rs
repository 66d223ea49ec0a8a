//! Classification handler

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::{AppError, AppState};
use dompet_core::Classification;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /classify - Predict category and type of one description
pub async fn classify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<Classification>, AppError> {
    let Json(request) = payload?;

    let description = match request.description {
        Some(d) if !d.is_empty() => d,
        _ => return Err(AppError::bad_request("Missing description")),
    };

    let result = state.models.classify(&description)?;
    debug!(
        category = %result.predicted_category,
        kind = %result.predicted_type,
        "Classified description"
    );

    Ok(Json(result))
}
