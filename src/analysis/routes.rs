//! Per-route policy and default payload table.
//!
//! The parser and the error path both read defaults from here so the two can
//! never drift apart.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::llm::CompletionParams;
use super::extract::JsonShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Chat,
    Generate,
    GenerateTests,
    Summarize,
    Analyze,
    AnalyzeTransaction,
    AnalyzeContract,
}

#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    /// `None` for routes that return provider text as-is.
    pub shape: Option<JsonShape>,
    pub params: CompletionParams,
    /// Whether a response without extractable JSON fails the request.
    pub parse_failure_is_fatal: bool,
    /// Status used when the gateway gives up.
    pub failure_status: StatusCode,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Chat,
        Route::Generate,
        Route::GenerateTests,
        Route::Summarize,
        Route::Analyze,
        Route::AnalyzeTransaction,
        Route::AnalyzeContract,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Route::Chat => "chat",
            Route::Generate => "generate",
            Route::GenerateTests => "generate-tests",
            Route::Summarize => "summarize",
            Route::Analyze => "analyze",
            Route::AnalyzeTransaction => "analyze-transaction",
            Route::AnalyzeContract => "analyze-contract",
        }
    }

    pub fn policy(self) -> RoutePolicy {
        let params = |temperature, max_tokens| CompletionParams { temperature, max_tokens, timeout: None };
        match self {
            Route::Chat => RoutePolicy {
                shape: None,
                params: params(0.7, 2000),
                parse_failure_is_fatal: false,
                failure_status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            Route::Generate => RoutePolicy {
                shape: None,
                params: params(0.2, 4000),
                parse_failure_is_fatal: false,
                failure_status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            Route::GenerateTests => RoutePolicy {
                shape: Some(JsonShape::Array),
                params: params(0.2, 4000),
                parse_failure_is_fatal: true,
                failure_status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            Route::Summarize => RoutePolicy {
                shape: Some(JsonShape::Object),
                params: params(0.1, 3000),
                parse_failure_is_fatal: true,
                failure_status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            Route::Analyze => RoutePolicy {
                shape: Some(JsonShape::Object),
                params: params(0.7, 2000),
                parse_failure_is_fatal: false,
                failure_status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            Route::AnalyzeTransaction => RoutePolicy {
                shape: Some(JsonShape::Object),
                params: params(0.1, 2000),
                parse_failure_is_fatal: false,
                failure_status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            Route::AnalyzeContract => RoutePolicy {
                shape: Some(JsonShape::Object),
                params: CompletionParams {
                    temperature: 0.1,
                    max_tokens: 4000,
                    timeout: Some(Duration::from_secs(30)),
                },
                parse_failure_is_fatal: false,
                failure_status: StatusCode::OK,
            },
        }
    }

    /// Schema-complete result used when the provider text yields nothing usable.
    pub fn default_payload(self) -> Value {
        match self {
            Route::Chat => json!({ "message": "" }),
            Route::Generate => json!({ "code": "" }),
            Route::GenerateTests => json!([]),
            Route::Summarize => json!({
                "overview": "",
                "purpose": "",
                "features": [],
                "functions": [],
                "stateVariables": [],
                "specialNotes": []
            }),
            Route::Analyze => json!({
                "overallRisk": "medium",
                "issues": [{
                    "severity": "medium",
                    "description": "Unable to perform complete security analysis",
                    "recommendation": "Manual review recommended"
                }]
            }),
            Route::AnalyzeTransaction => json!({
                "summary": "Unable to analyze transaction",
                "txType": "Unknown",
                "operation": "Unknown operation",
                "assets": [],
                "contracts": [],
                "details": {}
            }),
            Route::AnalyzeContract => json!({
                "summary": "Analysis completed with limited information",
                "description": "The contract was analyzed but detailed information could not be extracted. The contract appears to be a Clarity smart contract on the Stacks blockchain.",
                "securityScore": "50",
                "riskLevel": "MEDIUM",
                "features": ["Unknown features"],
                "functions": ["Unknown functions"],
                "security": {
                    "issues": [{
                        "severity": "MEDIUM",
                        "description": "Unable to perform complete security analysis",
                        "recommendation": "Manual review recommended"
                    }],
                    "bestPractices": {
                        "followed": [],
                        "missing": ["Complete analysis not available"]
                    }
                }
            }),
        }
    }

    /// Client-facing message for a request the route could not complete.
    pub fn generic_error(self) -> &'static str {
        match self {
            Route::Chat => "Failed to get AI response",
            Route::Generate => "Failed to generate contract",
            Route::GenerateTests => "Failed to generate tests",
            Route::Summarize => "Failed to generate contract summary",
            Route::Analyze => "Failed to perform security analysis",
            Route::AnalyzeTransaction => "Failed to analyze transaction",
            Route::AnalyzeContract => "Failed to analyze contract",
        }
    }

    /// Body returned when the pipeline fails: the route's default fields (or
    /// failure-specific ones) plus `error`.
    pub fn failure_payload(self, detail: &str) -> Value {
        let mut body = match self {
            Route::GenerateTests => json!({ "tests": [] }),
            Route::Analyze => json!({
                "overallRisk": "medium",
                "issues": [{ "severity": "medium", "description": detail }]
            }),
            Route::AnalyzeTransaction => json!({
                "summary": "Error during analysis",
                "txType": "Unknown",
                "operation": "Unknown",
                "assets": [],
                "contracts": [],
                "details": {
                    "error": "The system encountered an error while analyzing this transaction"
                }
            }),
            Route::AnalyzeContract => json!({
                "summary": "Potential security concerns detected",
                "description": "This contract contains patterns that may be concerning. Manual review by a security expert is strongly recommended before interacting with this contract.",
                "securityScore": "0",
                "riskLevel": "HIGH",
                "features": ["Multiple external contract calls", "Repetitive operation patterns"],
                "functions": [],
                "security": {
                    "issues": [{
                        "severity": "HIGH",
                        "description": "Analysis failed, but contract patterns suggest potential security concerns",
                        "recommendation": "Do not interact with this contract without thorough review by a security expert"
                    }],
                    "bestPractices": {
                        "followed": [],
                        "missing": ["Proper documentation", "Clear purpose"]
                    }
                }
            }),
            other => other.default_payload(),
        };

        let message = match self {
            Route::Analyze => self.generic_error(),
            _ => detail,
        };
        if let Value::Object(map) = &mut body {
            map.insert("error".to_string(), Value::String(message.to_string()));
        }
        body
    }
}
