pub mod provider;
pub mod deepseek;
pub mod gateway;
pub mod mock;
pub mod types;

pub use provider::LLMProvider;
pub use deepseek::DeepSeekProvider;
pub use gateway::LlmGateway;
pub use types::{ChatMessage, CompletionParams, CompletionRequest, Role};
