use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::{debug, info};

use crate::analysis::Route;
use crate::errors::ClarityError;
use crate::llm::ChatMessage;
use super::templates;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").expect("valid regex"));

/// Number of contract events embedded in a contract-analysis prompt.
pub const PROMPT_EVENT_LIMIT: usize = 5;

/// Caller data available for template interpolation.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables {
    pub message: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub transaction: Option<Value>,
    pub events: Vec<Value>,
    pub contract_id: Option<String>,
}

/// Assembles the system + user message pair for each route.
///
/// System instructions come from the built-in table unless an override
/// directory supplies `<route>.txt`. Overrides are read once at construction.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    overrides: HashMap<Route, String>,
    override_dir: Option<PathBuf>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load system-instruction overrides from `dir`. Routes without a file keep
    /// the built-in text.
    pub fn with_override_dir(dir: &Path) -> Result<Self, ClarityError> {
        if !dir.is_dir() {
            return Err(ClarityError::Config(format!(
                "Prompt directory not found: {}",
                dir.display()
            )));
        }

        let mut overrides = HashMap::new();
        for route in Route::ALL {
            let file_path = dir.join(format!("{}.txt", route.name()));
            if !file_path.exists() {
                continue;
            }
            let content = std::fs::read_to_string(&file_path).map_err(|e| {
                ClarityError::Config(format!("Failed to read prompt {}: {}", file_path.display(), e))
            })?;
            debug!(route = route.name(), path = %file_path.display(), "Loaded prompt override");
            overrides.insert(route, content);
        }

        info!(dir = %dir.display(), overrides = overrides.len(), "Prompt overrides loaded");
        Ok(Self { overrides, override_dir: Some(dir.to_path_buf()) })
    }

    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    pub fn has_override(&self, route: Route) -> bool {
        self.overrides.contains_key(&route)
    }

    /// System instruction for `route`.
    pub fn system_prompt(&self, route: Route) -> &str {
        if let Some(text) = self.overrides.get(&route) {
            return text;
        }
        match route {
            Route::Chat => templates::ASSISTANT_SYSTEM,
            Route::Generate => templates::CONTRACT_GENERATION_SYSTEM,
            Route::GenerateTests => templates::TEST_GENERATION_SYSTEM,
            Route::Summarize => templates::CONTRACT_SUMMARY_SYSTEM,
            Route::Analyze => templates::SECURITY_ANALYSIS_SYSTEM,
            Route::AnalyzeTransaction => templates::TRANSACTION_ANALYSIS_SYSTEM,
            Route::AnalyzeContract => templates::CONTRACT_ANALYSIS_SYSTEM,
        }
    }

    fn user_template(route: Route) -> &'static str {
        match route {
            Route::Chat => templates::CHAT_USER,
            Route::Generate => templates::GENERATE_USER,
            Route::GenerateTests => templates::GENERATE_TESTS_USER,
            Route::Summarize => templates::SUMMARIZE_USER,
            Route::Analyze => templates::ANALYZE_USER,
            Route::AnalyzeTransaction => templates::ANALYZE_TRANSACTION_USER,
            Route::AnalyzeContract => templates::ANALYZE_CONTRACT_USER,
        }
    }

    /// Exactly one system message followed by exactly one user message.
    pub fn build(&self, route: Route, vars: &PromptVariables) -> Vec<ChatMessage> {
        let user = interpolate(Self::user_template(route), vars);
        debug!(route = route.name(), user_len = user.len(), "Built prompt");
        vec![ChatMessage::system(self.system_prompt(route)), ChatMessage::user(&user)]
    }
}

/// Replace `{{NAME}}` placeholders in one pass. Substituted text is never
/// rescanned, so caller data containing braces passes through verbatim.
/// Unknown names are left in place.
pub fn interpolate(template: &str, vars: &PromptVariables) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            render_variable(&caps[1], vars).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn render_variable(name: &str, vars: &PromptVariables) -> Option<String> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let rendered = match name {
        "MESSAGE" => text(&vars.message),
        "CODE" => text(&vars.code),
        "DESCRIPTION" => text(&vars.description),
        "FEATURES" => features_section(&vars.features),
        "TRANSACTION" => vars.transaction.as_ref().map(pretty).unwrap_or_default(),
        "EVENTS" => events_section(&vars.events),
        "CONTRACT_ID" => vars
            .contract_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!(" ({})", id))
            .unwrap_or_default(),
        _ => return None,
    };
    Some(rendered)
}

fn features_section(features: &[String]) -> String {
    if features.is_empty() {
        return String::new();
    }
    let list: Vec<String> = features.iter().map(|f| format!("- {}", f)).collect();
    format!("Features:\n{}", list.join("\n"))
}

fn events_section(events: &[Value]) -> String {
    if events.is_empty() {
        return String::new();
    }
    let recent: Vec<Value> = events.iter().take(PROMPT_EVENT_LIMIT).cloned().collect();
    format!(
        "Recent contract activity:\n{}",
        pretty(&Value::Array(recent))
    )
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
