use async_trait::async_trait;
use crate::errors::ClarityError;
use super::types::CompletionRequest;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send one chat completion and return the assistant's raw text.
    ///
    /// Implementations must fail with `ClarityError::Config` before touching
    /// the network when credentials are missing.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ClarityError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
