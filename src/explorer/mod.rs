//! Stacks explorer API: contract source, contract events and transactions.

pub mod client;
pub mod identify;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ClarityError;

pub use client::HiroExplorer;
pub use identify::{classify_input, InputKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSource {
    pub source: String,
    pub publish_height: Option<u64>,
}

/// Read-only view of the chain. Every failure is `ClarityError::UpstreamData`.
#[async_trait]
pub trait BlockchainExplorer: Send + Sync {
    async fn contract_source(&self, contract_id: &str) -> Result<ContractSource, ClarityError>;

    /// Most recent events for the contract, newest first.
    async fn contract_events(&self, contract_id: &str, limit: u32) -> Result<Vec<Value>, ClarityError>;

    async fn transaction(&self, tx_id: &str) -> Result<Value, ClarityError>;
}
