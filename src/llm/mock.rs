//! Scripted provider used by tests and local demos. Never touches the network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use crate::errors::ClarityError;
use super::provider::LLMProvider;
use super::types::CompletionRequest;

#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    /// Fail as if the provider answered with this HTTP status.
    Status(u16),
    /// Fail as if no credentials were configured.
    Unconfigured,
    /// Answer after sleeping.
    Delayed(Duration, String),
}

/// Replies are consumed in order; the last one repeats once the script runs out.
pub struct MockProvider {
    script: Mutex<VecDeque<MockReply>>,
    fallback: MockReply,
    call_count: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockProvider {
    pub fn scripted(replies: Vec<MockReply>) -> Self {
        let fallback = replies.last().cloned().unwrap_or(MockReply::Text(String::new()));
        Self {
            script: Mutex::new(replies.into()),
            fallback,
            call_count: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::scripted(vec![MockReply::Text(text.to_string())])
    }

    pub fn failing(status: u16) -> Self {
        Self::scripted(vec![MockReply::Status(status)])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }

    fn next_reply(&self) -> MockReply {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ClarityError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match self.next_reply() {
            MockReply::Text(text) => Ok(text),
            MockReply::Status(status) => Err(ClarityError::Provider {
                status,
                message: "scripted failure".into(),
            }),
            MockReply::Unconfigured => Err(ClarityError::Config(
                "DEEPSEEK_API_KEY or DEEPSEEK_API_URL is not set".into(),
            )),
            MockReply::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }

    fn provider_name(&self) -> &str { "mock" }
    fn model_name(&self) -> &str { "mock-model" }
}
