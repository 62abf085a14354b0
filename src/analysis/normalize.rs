use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use super::extract::rewrap;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:clarity|solidity|lisp)?").expect("valid regex"));

/// Re-wrap `security` and `security.bestPractices` with empty defaults so a
/// partially filled section from the provider is still schema-complete.
pub fn rewrap_security(result: &mut Value) {
    let Value::Object(map) = result else { return };

    let mut security = rewrap(
        map.get("security"),
        json!({ "issues": [], "bestPractices": { "followed": [], "missing": [] } }),
    );
    let best_practices = rewrap(
        security.get("bestPractices"),
        json!({ "followed": [], "missing": [] }),
    );
    security["bestPractices"] = best_practices;
    map.insert("security".to_string(), security);
}

/// Highest severity present, `safe` when there are no issues.
pub fn derive_overall_risk(issues: &[Value]) -> &'static str {
    let has = |level: &str| {
        issues.iter().any(|i| {
            i["severity"].as_str().is_some_and(|s| s.eq_ignore_ascii_case(level))
        })
    };
    if has("high") {
        "high"
    } else if has("medium") {
        "medium"
    } else if !issues.is_empty() {
        "low"
    } else {
        "safe"
    }
}

/// Fill `overallRisk` from the issue list when the provider left it out.
pub fn fill_overall_risk(parsed: &mut Value) {
    let Value::Object(map) = parsed else { return };
    if map.get("overallRisk").is_some_and(|v| !v.is_null()) {
        return;
    }
    if let Some(Value::Array(issues)) = map.get("issues") {
        let risk = derive_overall_risk(issues);
        map.insert("overallRisk".to_string(), Value::String(risk.to_string()));
    }
}

/// Keep only the known issue fields and default a missing severity to `medium`.
pub fn normalize_issues(result: &mut Value) {
    let Some(Value::Array(issues)) = result.get_mut("issues") else { return };

    let normalized: Vec<Value> = issues
        .iter()
        .filter_map(Value::as_object)
        .map(|issue| {
            let mut out = Map::new();
            let severity = issue
                .get("severity")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("medium");
            out.insert("severity".to_string(), Value::String(severity.to_string()));
            for key in ["description", "line", "snippet", "impact", "recommendation"] {
                if let Some(v) = issue.get(key).filter(|v| !v.is_null()) {
                    out.insert(key.to_string(), v.clone());
                }
            }
            Value::Object(out)
        })
        .collect();
    *issues = normalized;
}

/// Strip markdown code fences from generated source.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}
