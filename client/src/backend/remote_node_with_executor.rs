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

//! Provides [RemoteNodeWithExecutor] backend
use std::sync::Arc;
use tokio::task::JoinError;

use crate::backend::{self, Backend as _};
use crate::interface::*;

/// Client backend that wraps [crate::backend::RemoteNode] but spawns all futures in
/// its own executor using [tokio::runtime::Runtime].
///
/// This allows the client to be used from executors other than tokio. The backend must not be
/// dropped from within a tokio runtime.
#[derive(Clone)]
pub struct RemoteNodeWithExecutor {
    backend: backend::RemoteNode,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl RemoteNodeWithExecutor {
    pub async fn create(config: backend::RemoteNodeConfig) -> Result<Self, Error> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|error| Error::from(format!("Failed to start tokio runtime: {}", error)))?;
        let backend = runtime
            .spawn(backend::RemoteNode::create(config))
            .await
            .map_err(join_error)??;
        Ok(RemoteNodeWithExecutor {
            backend,
            runtime: Arc::new(runtime),
        })
    }
}

#[async_trait::async_trait]
impl backend::Backend for RemoteNodeWithExecutor {
    async fn fetch_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> Result<Option<serde_json::Value>, Error> {
        let backend = self.backend.clone();
        let address = address.clone();
        let resource_type = resource_type.to_string();
        self.runtime
            .spawn(async move { backend.fetch_resource(&address, &resource_type).await })
            .await
            .map_err(join_error)?
    }

    async fn await_transaction(
        &self,
        tx_hash: &TxHash,
    ) -> Result<backend::CommittedTransaction, Error> {
        let backend = self.backend.clone();
        let tx_hash = tx_hash.clone();
        self.runtime
            .spawn(async move { backend.await_transaction(&tx_hash).await })
            .await
            .map_err(join_error)?
    }

    fn chain_id(&self) -> u8 {
        self.backend.chain_id()
    }
}

fn join_error(error: JoinError) -> Error {
    Error::from(format!("Node request task failed: {}", error))
}
