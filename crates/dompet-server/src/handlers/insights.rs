//! Insight handler

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use dompet_core::models::coerce_all;
use dompet_core::{Budget, BudgetInput, Insight, Transaction, TransactionInput};

/// Request body for recommendations
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub transactions: Option<Vec<TransactionInput>>,
    #[serde(default)]
    pub budgets: Vec<BudgetInput>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub insights: Vec<Insight>,
}

/// POST /recommend - Insights for a month of transactions and budgets
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Json(request) = payload?;

    let transactions: Vec<Transaction> = coerce_all(request.transactions.unwrap_or_default())?;
    let budgets: Vec<Budget> = if transactions.is_empty() {
        vec![]
    } else {
        coerce_all(request.budgets)?
    };

    let insights = state.insights.recommend(&transactions, &budgets)?;
    Ok(Json(RecommendResponse { insights }))
}
