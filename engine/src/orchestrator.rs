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

//! Provides the [Orchestrator] that takes an intent from submission to a settled outcome.
use std::future::Future;
use std::sync::Arc;

use resource_trade_client::{ClientT, TxHash, Wallet};

use crate::{Error, Intent, Notice, Store};

/// A transaction that was committed and applied.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Confirmed {
    pub tx_hash: TxHash,
    pub version: u64,
}

/// Submits intents through a wallet and settles their outcome in the [Store].
#[derive(Clone)]
pub struct Orchestrator<C> {
    client: C,
    store: Arc<Store>,
}

impl<C: ClientT> Orchestrator<C> {
    pub fn new(client: C, store: Arc<Store>) -> Self {
        Orchestrator { client, store }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Run `intent` to completion.
    ///
    /// 1. Validate the intent. Malformed input is never submitted.
    /// 2. Mark the intent pending. Fails with [Error::AlreadyPending] if it is pending already.
    /// 3. Submit it through `wallet` and wait for the confirmation.
    /// 4. On success run `on_confirmed` to refresh the affected state.
    /// 5. Clear the pending flag and queue a success or failure notice.
    ///
    /// The pending flag is also cleared when the returned future is dropped early.
    pub async fn run<I, F, Fut>(
        &self,
        wallet: &dyn Wallet,
        intent: I,
        on_confirmed: F,
    ) -> Result<Confirmed, Error>
    where
        I: Intent,
        F: FnOnce(Confirmed) -> Fut,
        Fut: Future<Output = ()>,
    {
        intent.validate()?;
        if !wallet.is_connected() {
            return Err(Error::WalletNotConnected);
        }
        let pending = self
            .store
            .begin(I::TAG)
            .ok_or(Error::AlreadyPending(I::TAG))?;

        log::debug!("Submitting {}", I::TAG);
        match self.submit_and_confirm(wallet, intent).await {
            Ok(confirmed) => {
                log::info!("{} confirmed in {}", I::TAG, confirmed.tx_hash);
                on_confirmed(confirmed.clone()).await;
                drop(pending);
                self.store.notify(Notice::success(I::TAG.success_notice()));
                Ok(confirmed)
            }
            Err(error) => {
                log::error!("{} failed: {}", I::TAG, error);
                drop(pending);
                self.store.notify(Notice::failure(I::TAG.failure_notice()));
                Err(error)
            }
        }
    }

    async fn submit_and_confirm<I: Intent>(
        &self,
        wallet: &dyn Wallet,
        intent: I,
    ) -> Result<Confirmed, Error> {
        let tx_included_fut = self
            .client
            .sign_and_submit_message(wallet, intent)
            .await
            .map_err(|error| Error::TransactionRejected(Arc::new(error)))?;
        let tx_included = tx_included_fut
            .await
            .map_err(|error| Error::ConfirmationFailed(Arc::new(error)))?;
        match tx_included.result {
            Ok(()) => Ok(Confirmed {
                tx_hash: tx_included.tx_hash,
                version: tx_included.version,
            }),
            Err(error) => Err(Error::TransactionFailed {
                tx_hash: tx_included.tx_hash,
                error,
            }),
        }
    }
}
