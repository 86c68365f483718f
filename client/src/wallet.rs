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

use resource_trade_core::AccountAddress;

use crate::error::Error;
use crate::transaction::{Transaction, TxHash};

/// Account holder that signs and submits transactions.
///
/// The client never sees key material. The wallet decides whether to sign a transaction and
/// submits it to the ledger itself.
#[async_trait::async_trait]
pub trait Wallet: Send + Sync {
    /// The connected account, if any.
    fn account(&self) -> Option<AccountAddress>;

    fn is_connected(&self) -> bool {
        self.account().is_some()
    }

    /// Sign the transaction with the connected account and submit it to the ledger.
    ///
    /// Returns the hash of the submitted transaction. Fails with [Error::WalletRejected] if the
    /// user declines.
    async fn sign_and_submit_transaction(&self, transaction: &Transaction)
        -> Result<TxHash, Error>;
}
