//! Rule evaluation endpoint for the calculation pipeline.

use crate::api::AppState;
use crate::domain::Context;
use crate::engine::RuleVerdict;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub rule_type: String,
    pub market: String,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub context: Context,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub evaluation_id: Uuid,
    pub as_of: NaiveDate,
    pub included: bool,
    pub excluded: bool,
    pub context: Context,
    pub verdicts: Vec<RuleVerdict>,
}

pub async fn evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    if request.rule_type.trim().is_empty() {
        return Err(AppError::BadRequest("ruleType is required".into()));
    }
    if request.market.trim().is_empty() {
        return Err(AppError::BadRequest("market is required".into()));
    }

    let evaluation_id = Uuid::new_v4();
    let as_of = request
        .as_of
        .unwrap_or_else(|| state.config.default_as_of());

    let rules = state
        .resolver
        .active_rules(&request.rule_type, &request.market, as_of)
        .await
        .map_err(|e| {
            tracing::error!(%evaluation_id, error = %e, "Rule set resolution failed");
            AppError::from(e)
        })?;

    let evaluation = state.engine.evaluate(
        rules.iter().map(Arc::as_ref),
        request.context,
        &request.market,
        as_of,
    );

    tracing::debug!(
        %evaluation_id,
        rule_type = %request.rule_type,
        market = %request.market,
        rules = rules.len(),
        included = evaluation.included,
        excluded = evaluation.excluded,
        "Evaluation complete"
    );

    Ok(Json(EvaluateResponse {
        evaluation_id,
        as_of,
        included: evaluation.included,
        excluded: evaluation.excluded,
        context: evaluation.context,
        verdicts: evaluation.verdicts,
    }))
}
