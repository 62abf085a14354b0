//! Request bodies. Every field is optional so missing input reaches the
//! handler and becomes a 400 with an `error` body.

use axum::extract::FromRequest;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ClarityError;

/// `Json` extractor whose rejection is a `ClarityError`, so bodies of the
/// wrong shape surface as 400 with an `error` body like any other bad input.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ClarityError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
}

/// Body shared by generate-tests, summarize and analyze.
#[derive(Debug, Default, Deserialize)]
pub struct CodeRequest {
    pub code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionRequest {
    pub transaction: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAnalysisRequest {
    pub source: Option<String>,
    pub events: Option<Vec<Value>>,
    pub contract_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecodeRequest {
    pub input: Option<String>,
}
