use axum::extract::State;

use crate::api::models::{ApiJson, ChatRequest, CodeRequest, ContractAnalysisRequest, GenerateRequest, TransactionRequest};
use crate::api::AppState;
use crate::errors::ClarityError;
use crate::pipeline::RouteOutcome;

pub async fn chat(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> Result<RouteOutcome, ClarityError> {
    state.orchestrator.chat(req.message.as_deref()).await
}

pub async fn generate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateRequest>,
) -> Result<RouteOutcome, ClarityError> {
    state.orchestrator.generate(req.description.as_deref(), req.features.as_deref().unwrap_or_default()).await
}

pub async fn generate_tests(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CodeRequest>,
) -> Result<RouteOutcome, ClarityError> {
    state.orchestrator.generate_tests(req.code.as_deref()).await
}

pub async fn summarize(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CodeRequest>,
) -> Result<RouteOutcome, ClarityError> {
    state.orchestrator.summarize(req.code.as_deref()).await
}

pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CodeRequest>,
) -> Result<RouteOutcome, ClarityError> {
    state.orchestrator.analyze(req.code.as_deref()).await
}

pub async fn analyze_transaction(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TransactionRequest>,
) -> Result<RouteOutcome, ClarityError> {
    state.orchestrator.analyze_transaction(req.transaction).await
}

pub async fn analyze_contract(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ContractAnalysisRequest>,
) -> Result<RouteOutcome, ClarityError> {
    state
        .orchestrator
        .analyze_contract(req.source.as_deref(), req.events.unwrap_or_default(), req.contract_id.as_deref())
        .await
}
