//! In-memory explorer for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ClarityError;
use super::{BlockchainExplorer, ContractSource};

#[derive(Default)]
pub struct MockExplorer {
    sources: HashMap<String, String>,
    events: HashMap<String, Vec<Value>>,
    transactions: HashMap<String, Value>,
    events_unavailable: bool,
    source_calls: AtomicUsize,
    event_calls: AtomicUsize,
    transaction_calls: AtomicUsize,
}

impl MockExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contract(mut self, contract_id: &str, source: &str) -> Self {
        self.sources.insert(contract_id.to_string(), source.to_string());
        self
    }

    pub fn with_events(mut self, contract_id: &str, events: Vec<Value>) -> Self {
        self.events.insert(contract_id.to_string(), events);
        self
    }

    pub fn with_transaction(mut self, tx_id: &str, tx: Value) -> Self {
        self.transactions.insert(tx_id.to_string(), tx);
        self
    }

    /// Make every events lookup fail.
    pub fn events_unavailable(mut self) -> Self {
        self.events_unavailable = true;
        self
    }

    pub fn source_calls(&self) -> usize {
        self.source_calls.load(Ordering::SeqCst)
    }

    pub fn event_calls(&self) -> usize {
        self.event_calls.load(Ordering::SeqCst)
    }

    pub fn transaction_calls(&self) -> usize {
        self.transaction_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlockchainExplorer for MockExplorer {
    async fn contract_source(&self, contract_id: &str) -> Result<ContractSource, ClarityError> {
        self.source_calls.fetch_add(1, Ordering::SeqCst);
        self.sources
            .get(contract_id)
            .map(|source| ContractSource { source: source.clone(), publish_height: Some(1) })
            .ok_or_else(|| ClarityError::UpstreamData(format!("No source code published for {}", contract_id)))
    }

    async fn contract_events(&self, contract_id: &str, limit: u32) -> Result<Vec<Value>, ClarityError> {
        self.event_calls.fetch_add(1, Ordering::SeqCst);
        if self.events_unavailable {
            return Err(ClarityError::UpstreamData("Explorer returned 503".into()));
        }
        let events = self.events.get(contract_id).cloned().unwrap_or_default();
        Ok(events.into_iter().take(limit as usize).collect())
    }

    async fn transaction(&self, tx_id: &str) -> Result<Value, ClarityError> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        self.transactions
            .get(tx_id)
            .cloned()
            .ok_or_else(|| ClarityError::UpstreamData(format!("Explorer returned 404 for {}", tx_id)))
    }
}
