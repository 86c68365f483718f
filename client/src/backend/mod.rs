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

//! Define trait for client backends and provide emulator and remote node implementation
use serde::Deserialize;

use crate::interface::*;

mod emulator;
mod remote_node;
mod remote_node_with_executor;

pub use emulator::{Emulator, EmulatorWallet, JournalEntry, EMULATOR_CHAIN_ID};
pub use remote_node::{RemoteNode, RemoteNodeConfig};
pub use remote_node_with_executor::RemoteNodeWithExecutor;

/// Indicator that a transaction has been committed to the ledger and has run in the VM.
///
/// Obtained after a transaction has been submitted and processed.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct CommittedTransaction {
    #[serde(rename = "hash")]
    pub tx_hash: TxHash,
    #[serde(with = "resource_trade_core::u64_string")]
    pub version: u64,
    pub success: bool,
    /// `Executed successfully` or a description of the failure.
    pub vm_status: String,
}

impl From<CommittedTransaction> for TransactionIncluded {
    fn from(committed: CommittedTransaction) -> Self {
        let result = if committed.success {
            Ok(())
        } else {
            Err(TransactionError::from_vm_status(&committed.vm_status))
        };
        TransactionIncluded {
            tx_hash: committed.tx_hash,
            version: committed.version,
            result,
        }
    }
}

/// Backend for talking to the ledger.
///
/// The interface is low-level and agnostic of the game module. Submitting transactions is the
/// job of the [Wallet], the backend only observes their outcome.
#[async_trait::async_trait]
pub trait Backend {
    /// Fetch the data of a resource stored under `address`. `resource_type` is fully qualified.
    ///
    /// Returns `None` if the account or the resource does not exist.
    async fn fetch_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> Result<Option<serde_json::Value>, Error>;

    /// Wait until the transaction is committed and return its outcome.
    async fn await_transaction(&self, tx_hash: &TxHash) -> Result<CommittedTransaction, Error>;

    /// Get the id of the chain. This must be obtained on backend creation.
    fn chain_id(&self) -> u8;
}
