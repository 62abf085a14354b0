use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use crate::config::credentials::redact_credentials;
use crate::config::ProviderConfig;
use crate::errors::ClarityError;
use super::provider::LLMProvider;
use super::types::CompletionRequest;
use tracing::debug;

/// OpenAI-compatible chat-completions client (DeepSeek by default).
pub struct DeepSeekProvider {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl DeepSeekProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.trim().to_string(),
            api_url: config.api_url.trim().to_string(),
            model: config.model.clone(),
        }
    }

    fn redact(&self, text: &str) -> String {
        redact_credentials(text, &[self.api_key.as_str()])
    }
}

#[async_trait]
impl LLMProvider for DeepSeekProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ClarityError> {
        if self.api_key.is_empty() || self.api_url.is_empty() {
            return Err(ClarityError::Config(
                "DEEPSEEK_API_KEY or DEEPSEEK_API_URL is not set".into(),
            ));
        }

        let resp = self.client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let msg = self.redact(&e.to_string());
                if e.is_timeout() {
                    ClarityError::Timeout(msg)
                } else {
                    ClarityError::Transport(format!("Provider request failed: {}", msg))
                }
            })?;

        let status = resp.status();
        let body = resp.text().await
            .map_err(|e| ClarityError::Transport(format!("Failed to read provider response: {}", self.redact(&e.to_string()))))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(ClarityError::Provider {
                status: status.as_u16(),
                message: self.redact(&message),
            });
        }

        let data: Value = serde_json::from_str(&body).map_err(|e| ClarityError::Provider {
            status: status.as_u16(),
            message: format!("Unreadable provider response: {}", e),
        })?;

        let content = data["choices"][0]["message"]["content"].as_str()
            .ok_or_else(|| ClarityError::Provider {
                status: status.as_u16(),
                message: "No content in provider response".into(),
            })?
            .to_string();

        debug!(
            model = %self.model,
            prompt_tokens = data["usage"]["prompt_tokens"].as_u64(),
            completion_tokens = data["usage"]["completion_tokens"].as_u64(),
            content_len = content.len(),
            "Provider completion"
        );

        Ok(content)
    }

    fn provider_name(&self) -> &str { "deepseek" }
    fn model_name(&self) -> &str { &self.model }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::{ChatMessage, CompletionParams};

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let provider = DeepSeekProvider::new(&ProviderConfig::default());
        let request = CompletionRequest::new(
            "deepseek-chat",
            vec![ChatMessage::user("hello")],
            CompletionParams::default(),
        );
        let result = provider.complete(&request).await;
        assert!(matches!(result, Err(ClarityError::Config(_))));
    }

    #[test]
    fn test_redacts_api_key() {
        let config = ProviderConfig { api_key: "sk-secret-key".into(), ..ProviderConfig::default() };
        let provider = DeepSeekProvider::new(&config);
        assert_eq!(provider.redact("token sk-secret-key leaked"), "token [REDACTED] leaked");
    }
}
