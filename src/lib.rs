pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod llm;
pub mod pipeline;
pub mod prompts;
