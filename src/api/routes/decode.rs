use axum::extract::State;

use crate::api::models::{ApiJson, DecodeRequest};
use crate::api::AppState;
use crate::errors::ClarityError;
use crate::pipeline::RouteOutcome;

/// Contract id or transaction id in, explorer lookup plus analysis out.
pub async fn decode(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DecodeRequest>,
) -> Result<RouteOutcome, ClarityError> {
    state.orchestrator.decode(req.input.as_deref()).await
}
