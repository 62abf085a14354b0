use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};
use tracing::{error, info, warn};

use crate::analysis::normalize::{fill_overall_risk, normalize_issues, rewrap_security, strip_code_fences};
use crate::analysis::prefilter::short_circuit_payload;
use crate::analysis::{merge_over_default, parse_json_span, parse_or_default, pre_analyze, JsonShape, Route};
use crate::config::AppConfig;
use crate::errors::ClarityError;
use crate::explorer::{classify_input, BlockchainExplorer, HiroExplorer, InputKind};
use crate::llm::{DeepSeekProvider, LlmGateway};
use crate::prompts::{PromptBuilder, PromptVariables};

/// Status and JSON body produced by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub status: StatusCode,
    pub body: Value,
}

impl RouteOutcome {
    pub fn ok(body: Value) -> Self {
        Self { status: StatusCode::OK, body }
    }

    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for RouteOutcome {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Runs each route's pipeline:
/// validate, optional pre-filter, build prompt, call gateway, parse, shape.
///
/// Cheap to clone; shared across all requests.
#[derive(Clone)]
pub struct Orchestrator {
    gateway: LlmGateway,
    prompts: Arc<PromptBuilder>,
    explorer: Arc<dyn BlockchainExplorer>,
    events_limit: u32,
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, ClarityError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ClarityError::Validation(message.to_string()))
}

impl Orchestrator {
    pub fn new(
        gateway: LlmGateway,
        prompts: PromptBuilder,
        explorer: Arc<dyn BlockchainExplorer>,
        events_limit: u32,
    ) -> Self {
        Self { gateway, prompts: Arc::new(prompts), explorer, events_limit }
    }

    /// Wire the production provider, explorer and prompt set from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClarityError> {
        let gateway = LlmGateway::new(Arc::new(DeepSeekProvider::new(&config.provider)));
        let prompts = match config.prompts.directory.as_deref() {
            Some(dir) => PromptBuilder::with_override_dir(Path::new(dir))?,
            None => PromptBuilder::new(),
        };
        let explorer: Arc<dyn BlockchainExplorer> = Arc::new(HiroExplorer::new(&config.explorer));
        Ok(Self::new(gateway, prompts, explorer, config.explorer.events_limit))
    }

    pub fn provider_name(&self) -> &str {
        self.gateway.provider_name()
    }

    async fn call(&self, route: Route, vars: &PromptVariables) -> Result<String, ClarityError> {
        let messages = self.prompts.build(route, vars);
        self.gateway.complete(route.name(), messages, route.policy().params).await
    }

    /// Failure body for `route`. Parse errors surface their own message,
    /// everything else the route's generic one.
    fn failure(route: Route, err: &ClarityError) -> RouteOutcome {
        let classification = err.classify();
        error!(route = route.name(), error_type = classification.error_type, error = %err, "Route failed");

        let (status, detail) = match err {
            ClarityError::Parse(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            _ => (route.policy().failure_status, route.generic_error().to_string()),
        };
        RouteOutcome::new(status, route.failure_payload(&detail))
    }

    /// Parse provider text per the route's policy: fatal routes propagate
    /// `ClarityError::Parse`, the rest fall back to the default payload.
    fn parse(route: Route, text: &str) -> Result<Value, ClarityError> {
        let policy = route.policy();
        let shape = policy.shape.unwrap_or(JsonShape::Object);
        if policy.parse_failure_is_fatal {
            let parsed = parse_json_span(text, shape)?;
            Ok(merge_over_default(route.default_payload(), parsed))
        } else {
            Ok(parse_or_default(route.name(), text, shape, route.default_payload()))
        }
    }

    async fn run_json(&self, route: Route, vars: &PromptVariables) -> RouteOutcome {
        let parsed = match self.call(route, vars).await {
            Ok(text) => Self::parse(route, &text),
            Err(e) => Err(e),
        };
        match parsed {
            Ok(body) => RouteOutcome::ok(body),
            Err(e) => Self::failure(route, &e),
        }
    }

    pub async fn chat(&self, message: Option<&str>) -> Result<RouteOutcome, ClarityError> {
        let message = required(message, "Message is required")?;
        let vars = PromptVariables { message: Some(message.to_string()), ..Default::default() };

        Ok(match self.call(Route::Chat, &vars).await {
            Ok(reply) => RouteOutcome::ok(json!({ "message": reply })),
            Err(e) => Self::failure(Route::Chat, &e),
        })
    }

    pub async fn generate(
        &self,
        description: Option<&str>,
        features: &[String],
    ) -> Result<RouteOutcome, ClarityError> {
        let description = required(description, "Contract description is required")?;
        let vars = PromptVariables {
            description: Some(description.to_string()),
            features: features.to_vec(),
            ..Default::default()
        };

        Ok(match self.call(Route::Generate, &vars).await {
            Ok(code) => RouteOutcome::ok(json!({ "code": strip_code_fences(&code) })),
            Err(e) => Self::failure(Route::Generate, &e),
        })
    }

    pub async fn generate_tests(&self, code: Option<&str>) -> Result<RouteOutcome, ClarityError> {
        let code = required(code, "Contract code is required")?;
        let vars = PromptVariables { code: Some(code.to_string()), ..Default::default() };
        Ok(self.run_json(Route::GenerateTests, &vars).await)
    }

    pub async fn summarize(&self, code: Option<&str>) -> Result<RouteOutcome, ClarityError> {
        let code = required(code, "Contract code is required")?;
        let vars = PromptVariables { code: Some(code.to_string()), ..Default::default() };
        Ok(self.run_json(Route::Summarize, &vars).await)
    }

    pub async fn analyze(&self, code: Option<&str>) -> Result<RouteOutcome, ClarityError> {
        let route = Route::Analyze;
        let code = required(code, "Contract code is required")?;
        let vars = PromptVariables { code: Some(code.to_string()), ..Default::default() };

        let text = match self.call(route, &vars).await {
            Ok(text) => text,
            Err(e) => return Ok(Self::failure(route, &e)),
        };

        // Risk is derived before the merge so the default never masks it.
        let mut result = match parse_json_span(&text, JsonShape::Object) {
            Ok(mut parsed) => {
                fill_overall_risk(&mut parsed);
                merge_over_default(route.default_payload(), parsed)
            }
            Err(e) => {
                warn!(route = route.name(), error = %e, "Falling back to default payload");
                route.default_payload()
            }
        };
        normalize_issues(&mut result);

        Ok(RouteOutcome::ok(json!({
            "overallRisk": result["overallRisk"].clone(),
            "issues": result["issues"].clone(),
        })))
    }

    pub async fn analyze_transaction(&self, transaction: Option<Value>) -> Result<RouteOutcome, ClarityError> {
        let transaction = transaction
            .filter(Value::is_object)
            .ok_or_else(|| ClarityError::Validation("Transaction data is required".into()))?;
        let vars = PromptVariables { transaction: Some(transaction), ..Default::default() };
        Ok(self.run_json(Route::AnalyzeTransaction, &vars).await)
    }

    pub async fn analyze_contract(
        &self,
        source: Option<&str>,
        events: Vec<Value>,
        contract_id: Option<&str>,
    ) -> Result<RouteOutcome, ClarityError> {
        let route = Route::AnalyzeContract;
        let source = required(source, "Contract source code is required")?;

        let verdict = pre_analyze(source);
        if verdict.is_potentially_malicious {
            info!(
                contract_id = contract_id.unwrap_or("-"),
                repetitive_ops = verdict.repetitive_ops,
                suspicious_contracts = verdict.suspicious_contracts.len(),
                "Pre-filter flagged contract, skipping provider"
            );
            return Ok(RouteOutcome::ok(short_circuit_payload(source, &verdict)));
        }

        let vars = PromptVariables {
            code: Some(source.to_string()),
            events,
            contract_id: contract_id.map(str::to_string),
            ..Default::default()
        };

        let text = match self.call(route, &vars).await {
            Ok(text) => text,
            Err(e) => return Ok(Self::failure(route, &e)),
        };

        let mut result = parse_or_default(route.name(), &text, JsonShape::Object, route.default_payload());
        rewrap_security(&mut result);
        Ok(RouteOutcome::ok(result))
    }

    /// Resolve a contract id or transaction id through the explorer and run
    /// the matching analysis.
    pub async fn decode(&self, input: Option<&str>) -> Result<RouteOutcome, ClarityError> {
        let input = required(input, "Please enter a contract ID or transaction ID")?;
        match classify_input(input) {
            InputKind::Contract(contract_id) => self.decode_contract(&contract_id).await,
            InputKind::Transaction(tx_id) => self.decode_transaction(&tx_id).await,
            InputKind::Unknown => Err(ClarityError::Validation(
                "Invalid input format. Please enter a valid contract ID (address.contract-name) or transaction ID (0x...)".into(),
            )),
        }
    }

    async fn decode_contract(&self, contract_id: &str) -> Result<RouteOutcome, ClarityError> {
        let source = match self.explorer.contract_source(contract_id).await {
            Ok(found) => found.source,
            Err(e) => {
                warn!(contract_id, error = %e, "Contract source unavailable");
                return Ok(RouteOutcome::new(
                    StatusCode::NOT_FOUND,
                    json!({ "error": "Could not retrieve source code for contract" }),
                ));
            }
        };

        let events = self
            .explorer
            .contract_events(contract_id, self.events_limit)
            .await
            .unwrap_or_else(|e| {
                warn!(contract_id, error = %e, "Could not fetch contract events");
                Vec::new()
            });
        let activity = transaction_activity(&events);

        let mut outcome = self.analyze_contract(Some(source.as_str()), events, Some(contract_id)).await?;
        if let Value::Object(map) = &mut outcome.body {
            map.insert("contractId".to_string(), Value::String(contract_id.to_string()));
            map.insert("sourceCode".to_string(), Value::String(source));
            map.insert("transactionActivity".to_string(), Value::Array(activity));
        }
        Ok(outcome)
    }

    async fn decode_transaction(&self, tx_id: &str) -> Result<RouteOutcome, ClarityError> {
        let transaction = match self.explorer.transaction(tx_id).await {
            Ok(tx) => tx,
            Err(e) => {
                warn!(tx_id, error = %e, "Transaction unavailable");
                return Ok(RouteOutcome::new(
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Could not retrieve transaction details" }),
                ));
            }
        };

        let mut outcome = self.analyze_transaction(Some(transaction)).await?;
        if let Value::Object(map) = &mut outcome.body {
            map.insert("txId".to_string(), Value::String(tx_id.to_string()));
        }
        Ok(outcome)
    }
}

/// Explorer events reduced to `{type, description, timestamp}` rows.
fn transaction_activity(events: &[Value]) -> Vec<Value> {
    events
        .iter()
        .map(|event| {
            let data = event.get("data").filter(|d| !d.is_null()).cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            let timestamp = event["block_time"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
            json!({
                "type": event["event_type"].as_str().unwrap_or("Unknown event"),
                "description": data.to_string(),
                "timestamp": timestamp,
            })
        })
        .collect()
}
