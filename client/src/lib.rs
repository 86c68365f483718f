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

//! Client for the resource trade ledger module.
//!
//! [Client] implements [ClientT] on top of a [backend::Backend]. Use [Client::create] to talk to
//! a full node or [Client::with_emulator] to run the game in memory. The emulator is useful for
//! developing and testing.
use std::sync::Arc;

use resource_trade_core::state::{GAME_STATE, PLAYER_INVENTORY};

pub mod backend;
mod entry_function;
mod error;
mod interface;
mod transaction;
mod wallet;

pub use crate::backend::{Emulator, EmulatorWallet, JournalEntry, RemoteNodeConfig};
pub use crate::interface::*;

use crate::backend::Backend as _;

/// Client to interact with the game module on the ledger.
///
/// Implements [ClientT] for interacting with the ledger.
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn backend::Backend + Send + Sync>,
    module: ModuleId,
}

impl Client {
    /// Connects to the node REST API at `node_url` and returns a [Client].
    ///
    /// The returned client must be driven by a tokio runtime. See [Client::create_with_executor]
    /// for a client that works with any executor.
    ///
    /// Fails if it cannot connect to a node.
    pub async fn create(node_url: url::Url, module: ModuleId) -> Result<Self, Error> {
        let backend = backend::RemoteNode::create(RemoteNodeConfig::new(node_url)).await?;
        Ok(Self::new(backend, module))
    }

    /// Same as [Client::create] but the client runs its own tokio runtime.
    pub async fn create_with_executor(
        config: RemoteNodeConfig,
        module: ModuleId,
    ) -> Result<Self, Error> {
        let backend = backend::RemoteNodeWithExecutor::create(config).await?;
        Ok(Self::new(backend, module))
    }

    /// Create a client that talks to the given emulator.
    pub fn with_emulator(emulator: &Emulator) -> Self {
        Self::new(emulator.clone(), emulator.module().clone())
    }

    /// Create a new client from a [backend::Backend] implementation.
    pub fn new(backend: impl backend::Backend + Send + Sync + 'static, module: ModuleId) -> Self {
        Client {
            backend: Arc::new(backend),
            module,
        }
    }

    async fn read_record<T: serde::de::DeserializeOwned>(
        &self,
        address: &AccountAddress,
        resource_name: &str,
    ) -> Result<T, Error> {
        let data = self.read_resource(address, resource_name).await?;
        Ok(serde_json::from_value(data)?)
    }
}

#[async_trait::async_trait]
impl ClientT for Client {
    async fn submit_transaction(
        &self,
        wallet: &dyn Wallet,
        transaction: Transaction,
    ) -> Result<Response<TransactionIncluded, Error>, Error> {
        let tx_hash = wallet.sign_and_submit_transaction(&transaction).await?;
        log::debug!(
            "Submitted {} from {} as {}",
            transaction.function_name(),
            transaction.sender,
            tx_hash
        );
        let backend = self.backend.clone();
        Ok(Box::pin(async move {
            let committed = backend.await_transaction(&tx_hash).await?;
            Ok(TransactionIncluded::from(committed))
        }))
    }

    async fn sign_and_submit_message<Message_: Message>(
        &self,
        wallet: &dyn Wallet,
        message: Message_,
    ) -> Result<Response<TransactionIncluded, Error>, Error> {
        let sender = wallet.account().ok_or(Error::WalletNotConnected)?;
        let transaction = Transaction::new(sender, &self.module, &message);
        self.submit_transaction(wallet, transaction).await
    }

    async fn read_resource(
        &self,
        address: &AccountAddress,
        resource_name: &str,
    ) -> Result<serde_json::Value, Error> {
        let resource_type = self.module.qualify(resource_name);
        match self.backend.fetch_resource(address, &resource_type).await? {
            Some(data) => Ok(data),
            None => Err(Error::ResourceNotFound {
                address: address.clone(),
                resource_type,
            }),
        }
    }

    async fn get_player_inventory(
        &self,
        account: &AccountAddress,
    ) -> Result<PlayerInventory, Error> {
        self.read_record(account, PLAYER_INVENTORY).await
    }

    async fn get_game_state(&self) -> Result<GameState, Error> {
        self.read_record(&self.module.address, GAME_STATE).await
    }

    fn chain_id(&self) -> u8 {
        self.backend.chain_id()
    }

    fn module(&self) -> &ModuleId {
        &self.module
    }
}
