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

//! Provides the [InventoryReconciler] that creates missing inventories on first use.
use futures::lock::Mutex;
use std::sync::Arc;

use resource_trade_client::{
    message, AccountAddress, ClientT, Error as ClientError, PlayerInventory, Wallet,
};

use crate::{Error, Notice, Orchestrator, RetryPolicy, SingleFlight, Store};

const CHECK_FAILED_NOTICE: &str = "Failed to check player inventory.";
const FETCH_FAILED_NOTICE: &str = "Failed to fetch resources.";

/// Loads the inventory of the connected account and initializes it if the account has none.
pub struct InventoryReconciler<C> {
    orchestrator: Orchestrator<C>,
    read_retry: RetryPolicy,
    flights: SingleFlight<AccountAddress, Result<PlayerInventory, Error>>,
    /// Serializes initializations of different accounts, which share one pending flag.
    init_lock: Mutex<()>,
}

impl<C: ClientT> InventoryReconciler<C> {
    pub fn new(orchestrator: Orchestrator<C>, read_retry: RetryPolicy) -> Self {
        InventoryReconciler {
            orchestrator,
            read_retry,
            flights: SingleFlight::new(),
            init_lock: Mutex::new(()),
        }
    }

    fn store(&self) -> &Arc<Store> {
        self.orchestrator.store()
    }

    /// Make sure the account of `wallet` has an inventory and store it in the view.
    ///
    /// If the inventory does not exist it is initialized with a transaction and read again.
    /// Concurrent calls for the same account share one reconciliation, so at most one
    /// initialization is submitted.
    pub async fn ensure_and_load(&self, wallet: &dyn Wallet) -> Result<PlayerInventory, Error> {
        let account = wallet.account().ok_or(Error::WalletNotConnected)?;
        self.flights
            .run(account.clone(), || self.reconcile(wallet, account.clone()))
            .await
            .unwrap_or_else(|_| Err(Error::Abandoned(account.clone())))
    }

    /// Read the inventory of `account` and store it in the view.
    ///
    /// Returns `Ok(None)` without a notice if the account has no inventory yet.
    pub async fn refresh(
        &self,
        account: &AccountAddress,
    ) -> Result<Option<PlayerInventory>, Error> {
        match self.read(account).await {
            Ok(inventory) => {
                self.store().set_inventory(account, inventory.clone());
                Ok(Some(inventory))
            }
            Err(error) if error.is_not_found() => {
                log::info!("PlayerInventory of {} not found", account);
                Ok(None)
            }
            Err(error) => {
                log::error!("Error fetching resources of {}: {}", account, error);
                self.store().notify(Notice::failure(FETCH_FAILED_NOTICE));
                Err(Error::ReadFailed(Arc::new(error)))
            }
        }
    }

    async fn reconcile(
        &self,
        wallet: &dyn Wallet,
        account: AccountAddress,
    ) -> Result<PlayerInventory, Error> {
        match self.read(&account).await {
            Ok(inventory) => {
                self.store().set_inventory(&account, inventory.clone());
                return Ok(inventory);
            }
            Err(error) if error.is_not_found() => {
                log::info!("No inventory for {}, initializing", account);
            }
            Err(error) => {
                log::error!("Error checking player inventory of {}: {}", account, error);
                self.store().notify(Notice::failure(CHECK_FAILED_NOTICE));
                return Err(Error::ReadFailed(Arc::new(error)));
            }
        }

        {
            let _init = self.init_lock.lock().await;
            self.orchestrator
                .run(wallet, message::InitPlayerInventory, |_| async {})
                .await?;
        }

        self.refresh(&account).await?.ok_or_else(|| {
            log::warn!("PlayerInventory of {} still missing after initialization", account);
            Error::InventoryMissing(account.clone())
        })
    }

    async fn read(&self, account: &AccountAddress) -> Result<PlayerInventory, ClientError> {
        let client = self.orchestrator.client();
        self.read_retry
            .retry(
                move || client.get_player_inventory(account),
                |error: &ClientError| !error.is_not_found(),
            )
            .await
    }
}
