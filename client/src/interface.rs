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

//! Provide an abstract trait for the ledger client and the necessary types.
//!
//! The [ClientT] trait defines methods to submit entry function calls of the game module as well
//! as methods to read the ledger state.
use futures::future::BoxFuture;

pub use resource_trade_core::*;

pub use crate::entry_function::Message;
pub use crate::error::Error;
pub use crate::transaction::{Transaction, TransactionPayload, TxHash};
pub use crate::wallet::Wallet;

/// Result of a transaction being committed to the ledger.
///
/// Returned after submitting a transaction and waiting for its confirmation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionIncluded {
    pub tx_hash: TxHash,
    /// The ledger version that committed the transaction.
    pub version: u64,
    /// Whether the entry function applied or aborted.
    pub result: Result<(), TransactionError>,
}

/// Return type for all [ClientT] methods.
pub type Response<T, Error> = BoxFuture<'static, Result<T, Error>>;

/// Trait for ledger clients sending transactions and looking up state.
#[async_trait::async_trait]
pub trait ClientT {
    /// Submit a transaction through the given wallet.
    ///
    /// ```no_run
    /// # use resource_trade_client::*;
    /// # async fn example(client: Client, wallet: &dyn Wallet, tx: Transaction) -> Result<(), Error> {
    ///
    /// // Have the wallet sign the transaction and submit it to the node.
    /// //
    /// // This call fails if the wallet rejects the transaction or the node does not accept it.
    /// let tx_included_fut = client.submit_transaction(wallet, tx).await?;
    ///
    /// // We can now wait for the transaction to be committed.
    /// //
    /// // This will error if we fail to learn the outcome of the transaction in time. It will not
    /// // error if the transaction aborted. See TransactionIncluded::result for that.
    /// let tx_included = tx_included_fut.await?;
    ///
    /// Ok(())
    /// # }
    /// ```
    async fn submit_transaction(
        &self,
        wallet: &dyn Wallet,
        transaction: Transaction,
    ) -> Result<Response<TransactionIncluded, Error>, Error>;

    /// Build a transaction for the account of the wallet and submit it.
    ///
    /// Same as [ClientT::submit_transaction] but takes care of building the payload.
    async fn sign_and_submit_message<Message_: Message>(
        &self,
        wallet: &dyn Wallet,
        message: Message_,
    ) -> Result<Response<TransactionIncluded, Error>, Error>;

    /// Read the data of resource `resource_name` of the game module stored under `address`.
    ///
    /// Returns [Error::ResourceNotFound] if the account does not hold the resource.
    async fn read_resource(
        &self,
        address: &AccountAddress,
        resource_name: &str,
    ) -> Result<serde_json::Value, Error>;

    async fn get_player_inventory(&self, account: &AccountAddress)
        -> Result<PlayerInventory, Error>;

    /// Read the shared [GameState] published at the module address.
    async fn get_game_state(&self) -> Result<GameState, Error>;

    /// Return the id of the chain we are communicating with.
    fn chain_id(&self) -> u8;

    /// The game module this client talks to.
    fn module(&self) -> &ModuleId;
}
