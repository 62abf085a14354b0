use std::sync::Arc;
use crate::errors::{with_retry, ClarityError, RetryConfig};
use super::provider::LLMProvider;
use super::types::{ChatMessage, CompletionParams, CompletionRequest};
use tracing::{debug, info};

/// Sends assembled prompts to the provider with bounded retries.
///
/// Holds no mutable state, so one instance is shared by every request.
#[derive(Clone)]
pub struct LlmGateway {
    provider: Arc<dyn LLMProvider>,
    retry: RetryConfig,
}

impl LlmGateway {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider, retry: RetryConfig::default() }
    }

    pub fn with_retry_config(provider: Arc<dyn LLMProvider>, retry: RetryConfig) -> Self {
        Self { provider, retry }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Run one completion. Each attempt gets `params.timeout` on its own; a
    /// timed-out attempt counts as a retryable failure.
    pub async fn complete(
        &self,
        operation: &str,
        messages: Vec<ChatMessage>,
        params: CompletionParams,
    ) -> Result<String, ClarityError> {
        let request = CompletionRequest::new(self.provider.model_name(), messages, params);
        let mut attempt = 0u32;

        let content = with_retry(operation, &self.retry, || {
            attempt += 1;
            let request = &request;
            let attempt = attempt;
            async move {
                debug!(operation, attempt, provider = self.provider.provider_name(), "Calling provider");
                match request.timeout {
                    Some(limit) => match tokio::time::timeout(limit, self.provider.complete(request)).await {
                        Ok(result) => result,
                        Err(_) => Err(ClarityError::Timeout(format!(
                            "provider did not answer within {}ms", limit.as_millis()
                        ))),
                    },
                    None => self.provider.complete(request).await,
                }
            }
        }).await?;

        info!(operation, response_len = content.len(), "Provider response received");
        Ok(content)
    }
}
