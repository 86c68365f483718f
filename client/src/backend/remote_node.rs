// Resource Trade
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! [backend::Backend] implementation for a remote full node
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::{Duration, Instant};
use url::Url;

use crate::backend;
use crate::interface::*;

/// Error codes the node uses when an account or one of its resources does not exist.
const NOT_FOUND_ERROR_CODES: [&str; 2] = ["resource_not_found", "account_not_found"];

/// Connection parameters for a [RemoteNode].
#[derive(Clone, Debug)]
pub struct RemoteNodeConfig {
    /// Base URL of the node REST API, for example `https://fullnode.devnet.aptoslabs.com/v1`.
    pub node_url: Url,
    /// Pause between two polls for a transaction outcome.
    pub poll_interval: Duration,
    /// Give up waiting for a transaction outcome after this long.
    pub confirmation_timeout: Duration,
}

impl RemoteNodeConfig {
    pub fn new(node_url: Url) -> Self {
        RemoteNodeConfig {
            node_url,
            poll_interval: Duration::from_millis(500),
            confirmation_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct RemoteNode {
    http: reqwest::Client,
    config: RemoteNodeConfig,
    chain_id: u8,
}

/// Body of error responses.
#[derive(Debug, Deserialize)]
struct NodeError {
    message: String,
    #[serde(default)]
    error_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LedgerInfo {
    chain_id: u8,
}

#[derive(Debug, Deserialize)]
struct ResourceResponse {
    data: serde_json::Value,
}

/// Transaction states we care about. Committed transactions of other kinds are never ours.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TransactionResponse {
    PendingTransaction,
    UserTransaction(backend::CommittedTransaction),
    #[serde(other)]
    Other,
}

impl RemoteNode {
    /// Connect to the node and learn the chain id.
    pub async fn create(config: RemoteNodeConfig) -> Result<Self, Error> {
        let http = reqwest::Client::new();
        let url = endpoint(&config.node_url, "");
        let response = http.get(&url).send().await?;
        let ledger_info: LedgerInfo = decode(response).await?;
        log::info!(
            "Connected to node {} on chain {}",
            config.node_url,
            ledger_info.chain_id
        );
        Ok(RemoteNode {
            http,
            config,
            chain_id: ledger_info.chain_id,
        })
    }

    /// Fetch the transaction once. Returns `None` while it is unknown or pending.
    async fn fetch_transaction(
        &self,
        path: &str,
    ) -> Result<Option<backend::CommittedTransaction>, Error> {
        let response = self
            .http
            .get(&endpoint(&self.config.node_url, path))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        match decode(response).await? {
            TransactionResponse::UserTransaction(committed) => Ok(Some(committed)),
            TransactionResponse::PendingTransaction => Ok(None),
            TransactionResponse::Other => Err("Transaction is not a user transaction".into()),
        }
    }
}

#[async_trait::async_trait]
impl backend::Backend for RemoteNode {
    async fn fetch_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> Result<Option<serde_json::Value>, Error> {
        let path = format!("accounts/{}/resource/{}", address, resource_type);
        let response = self
            .http
            .get(&endpoint(&self.config.node_url, &path))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            let status = response.status().as_u16();
            let error: NodeError = response.json().await?;
            return if is_not_found(&error) {
                Ok(None)
            } else {
                Err(Error::Node {
                    status,
                    message: error.message,
                })
            };
        }
        let resource: ResourceResponse = decode(response).await?;
        Ok(Some(resource.data))
    }

    async fn await_transaction(
        &self,
        tx_hash: &TxHash,
    ) -> Result<backend::CommittedTransaction, Error> {
        let started = Instant::now();

        // The node holds this request until the transaction leaves the mempool or a short
        // server side timeout passes.
        let wait_path = format!("transactions/wait_by_hash/{}", tx_hash);
        if let Some(committed) = self.fetch_transaction(&wait_path).await? {
            return Ok(committed);
        }

        let poll_path = format!("transactions/by_hash/{}", tx_hash);
        loop {
            if started.elapsed() >= self.config.confirmation_timeout {
                return Err(Error::ConfirmationFailed {
                    tx_hash: tx_hash.clone(),
                    reason: format!(
                        "not committed within {:?}",
                        self.config.confirmation_timeout
                    ),
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
            if let Some(committed) = self.fetch_transaction(&poll_path).await? {
                log::debug!(
                    "Transaction {} committed at version {}",
                    tx_hash,
                    committed.version
                );
                return Ok(committed);
            }
        }
    }

    fn chain_id(&self) -> u8 {
        self.chain_id
    }
}

fn endpoint(node_url: &Url, path: &str) -> String {
    format!("{}/{}", node_url.as_str().trim_end_matches('/'), path)
}

fn is_not_found(error: &NodeError) -> bool {
    match &error.error_code {
        Some(code) => NOT_FOUND_ERROR_CODES.contains(&code.as_str()),
        None => error.message.contains("not found"),
    }
}

/// Decode a successful response or turn an error status into [Error::Node].
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.text().await?;
    let message = match serde_json::from_str::<NodeError>(&body) {
        Ok(error) => error.message,
        Err(_) => body,
    };
    Err(Error::Node {
        status: status.as_u16(),
        message,
    })
}
