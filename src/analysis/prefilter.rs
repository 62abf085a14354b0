use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};

/// More than this many `swap-N` references marks the source as repetitive.
pub const REPETITIVE_SWAP_THRESHOLD: usize = 5;

static SWAP_OP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"swap-\d+").expect("valid regex"));
static CONTRACT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"contract-call\?\s+'([^'\s()]+)").expect("valid regex"));
static PUBLIC_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"define-public\s+\(([^)]+)").expect("valid regex"));

/// Outcome of the local heuristic scan. Derived from the source text alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreAnalysisVerdict {
    pub is_potentially_malicious: bool,
    pub repetitive_patterns: bool,
    /// External call targets, first-seen order, no duplicates.
    pub suspicious_contracts: Vec<String>,
    /// Number of `swap-N` references; only recorded once over the threshold.
    pub repetitive_ops: usize,
}

pub fn pre_analyze(source: &str) -> PreAnalysisVerdict {
    let mut verdict = PreAnalysisVerdict::default();

    let swaps = SWAP_OP.find_iter(source).count();
    if swaps > REPETITIVE_SWAP_THRESHOLD {
        verdict.repetitive_patterns = true;
        verdict.repetitive_ops = swaps;
    }

    let mut seen = HashSet::new();
    for cap in CONTRACT_CALL.captures_iter(source) {
        let target = cap[1].to_string();
        if seen.insert(target.clone()) {
            verdict.suspicious_contracts.push(target);
        }
    }

    verdict.is_potentially_malicious =
        verdict.repetitive_patterns && !verdict.suspicious_contracts.is_empty();
    verdict
}

/// Names (with leading parameters) of every `define-public` in the source.
pub fn public_functions(source: &str) -> Vec<String> {
    PUBLIC_FN
        .captures_iter(source)
        .map(|cap| cap[1].trim().to_string())
        .collect()
}

/// Fixed high-risk contract analysis returned instead of calling the provider.
pub fn short_circuit_payload(source: &str, verdict: &PreAnalysisVerdict) -> Value {
    let mut functions = public_functions(source);
    if functions.is_empty() {
        functions.push("Unknown functions".to_string());
    }

    json!({
        "summary": "Potential security risk detected in this contract",
        "description": format!(
            "This contract contains patterns commonly found in malicious contracts. It makes multiple \
             repetitive operations ({} similar calls detected) which may indicate an attempt to drain \
             funds or abuse a protocol.",
            verdict.repetitive_ops
        ),
        "securityScore": "10",
        "riskLevel": "HIGH",
        "features": ["Multiple repetitive operations", "External contract calls"],
        "functions": functions,
        "security": {
            "issues": [
                {
                    "severity": "HIGH",
                    "description": format!(
                        "{} repetitive swap operations detected, a common pattern in malicious contracts",
                        verdict.repetitive_ops
                    ),
                    "recommendation": "Review the contract carefully before interacting with it. Consider consulting a security expert."
                },
                {
                    "severity": "HIGH",
                    "description": format!(
                        "Suspicious external contract calls to {}",
                        verdict.suspicious_contracts.join(", ")
                    ),
                    "recommendation": "Verify the legitimacy of these external contracts"
                }
            ],
            "bestPractices": {
                "followed": [],
                "missing": [
                    "Avoid repetitive identical operations",
                    "Include proper documentation for contract purpose",
                    "Implement reasonable operation limits"
                ]
            }
        }
    })
}
