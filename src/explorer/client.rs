use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ExplorerConfig;
use crate::errors::ClarityError;
use super::identify::split_contract_id;
use super::{BlockchainExplorer, ContractSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct SourceResponse {
    source: Option<String>,
    publish_height: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// Client for the Hiro Stacks API.
pub struct HiroExplorer {
    client: Client,
    base_url: String,
}

impl HiroExplorer {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClarityError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Explorer request");

        let resp = self.client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ClarityError::UpstreamData(format!("Explorer request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClarityError::UpstreamData(format!(
                "Explorer returned {} for {}",
                status.as_u16(),
                path
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ClarityError::UpstreamData(format!("Unreadable explorer response: {}", e)))
    }
}

#[async_trait]
impl BlockchainExplorer for HiroExplorer {
    async fn contract_source(&self, contract_id: &str) -> Result<ContractSource, ClarityError> {
        let (address, name) = split_contract_id(contract_id).ok_or_else(|| {
            ClarityError::UpstreamData(format!("Malformed contract id: {}", contract_id))
        })?;
        let data: SourceResponse = self
            .get_json(&format!("/v2/contracts/source/{}/{}", address, name))
            .await?;

        match data.source.filter(|s| !s.trim().is_empty()) {
            Some(source) => Ok(ContractSource { source, publish_height: data.publish_height }),
            None => Err(ClarityError::UpstreamData(format!(
                "No source code published for {}",
                contract_id
            ))),
        }
    }

    async fn contract_events(&self, contract_id: &str, limit: u32) -> Result<Vec<Value>, ClarityError> {
        let data: EventsResponse = self
            .get_json(&format!("/extended/v1/contract/{}/events?limit={}", contract_id, limit))
            .await?;
        debug!(contract_id, events = data.results.len(), "Fetched contract events");
        Ok(data.results)
    }

    async fn transaction(&self, tx_id: &str) -> Result<Value, ClarityError> {
        self.get_json(&format!("/extended/v1/tx/{}", tx_id)).await
    }
}
