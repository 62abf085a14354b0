use std::path::Path;
use crate::errors::ClarityError;
use super::credentials::resolve_credential;
use super::types::AppConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::{info, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Parse a YAML configuration file. Environment overrides are not applied.
pub async fn parse_config(path: &Path) -> Result<AppConfig, ClarityError> {
    if !path.exists() {
        return Err(ClarityError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ClarityError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if yaml.is_null() {
        return Ok(AppConfig::default());
    }

    validate_schema(&yaml)?;

    let mut config: AppConfig = serde_yaml::from_value(yaml)?;
    resolve_references(&mut config);
    Ok(config)
}

/// Build the process configuration: defaults, then the optional file, then
/// the environment.
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig, ClarityError> {
    let mut config = match path {
        Some(p) => parse_config(p).await?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    if config.provider.has_credentials() {
        info!(url = %config.provider.api_url, model = %config.provider.model, "Provider configured");
    } else {
        warn!("DEEPSEEK_API_KEY or DEEPSEEK_API_URL is not set; AI routes will fail until configured");
    }
    Ok(config)
}

/// Overlay environment variables on top of file values. Empty variables are
/// ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("DEEPSEEK_API_KEY") {
        config.provider.api_key = v;
    }
    if let Some(v) = get("DEEPSEEK_API_URL") {
        config.provider.api_url = v;
    }
    if let Some(v) = get("DEEPSEEK_MODEL") {
        config.provider.model = v;
    }
    if let Some(v) = get("CLARITYAI_EXPLORER_URL") {
        config.explorer.base_url = v;
    }
    if let Some(v) = get("CLARITYAI_API_TOKEN") {
        config.server.api_token = Some(v);
    }
}

/// Resolve `$VAR` references in credential-bearing fields.
fn resolve_references(config: &mut AppConfig) {
    config.provider.api_key = resolve_credential(&config.provider.api_key);
    config.provider.api_url = resolve_credential(&config.provider.api_url);
    config.server.api_token = config
        .server
        .api_token
        .as_deref()
        .map(resolve_credential)
        .filter(|t| !t.is_empty());
}

/// Validate config against the JSON schema. Violations are advisory.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ClarityError> {
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| ClarityError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| ClarityError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ClarityError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}
