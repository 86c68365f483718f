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

use std::sync::Arc;

use resource_trade_client::{
    AccountAddress, Error as ClientError, MalformedInput, TransactionError, TxHash,
};

use crate::IntentTag;

/// Error returned by the engine operations.
///
/// Client errors are shared through an [Arc] so that the outcome of a single reconciliation can
/// be handed to every caller waiting for it.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    /// The wallet has no connected account
    #[error("Wallet is not connected")]
    WalletNotConnected,

    /// The input was rejected before anything was submitted
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),

    /// The same kind of intent is still in flight
    #[error("{0} is already pending")]
    AlreadyPending(IntentTag),

    /// The wallet or the node refused the transaction
    #[error("Transaction was rejected: {0}")]
    TransactionRejected(Arc<ClientError>),

    /// The transaction was submitted but its outcome is unknown
    #[error("Failed to confirm transaction: {0}")]
    ConfirmationFailed(Arc<ClientError>),

    /// The transaction was committed but aborted
    #[error("Transaction {tx_hash} failed: {error}")]
    TransactionFailed {
        tx_hash: TxHash,
        error: TransactionError,
    },

    /// Reading ledger state failed for another reason than a missing resource
    #[error("Failed to read ledger state: {0}")]
    ReadFailed(Arc<ClientError>),

    /// The inventory is still missing after it was initialized
    #[error("No player inventory for {0}")]
    InventoryMissing(AccountAddress),

    /// The reconciliation this call was waiting for was dropped before it completed
    #[error("Inventory reconciliation for {0} was abandoned")]
    Abandoned(AccountAddress),
}
