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

//! Provides [GameSession], the entry point for a presentation layer.
use std::sync::Arc;

use resource_trade_client::{
    message, AccountAddress, ClientT, Error as ClientError, PlayerInventory, Wallet,
};

use crate::projector::{self, TradeOffer};
use crate::{
    Config, Confirmed, Error, InventoryReconciler, Notice, Orchestrator, Store, TradeOfferForm,
    ViewState,
};

const OFFERS_FAILED_NOTICE: &str = "Failed to fetch trade offers.";

/// State and operations of one player session.
///
/// The wallet is passed to every operation that needs to sign. The view follows the account of
/// the wallet passed to [GameSession::connect].
pub struct GameSession<C> {
    orchestrator: Orchestrator<C>,
    reconciler: InventoryReconciler<C>,
    config: Config,
}

impl<C: ClientT + Clone> GameSession<C> {
    /// Create a session for `client`.
    ///
    /// The client decides which module is used. A different [Config::module] is logged and
    /// otherwise ignored.
    pub fn new(client: C, config: Config) -> Self {
        if config.module != *client.module() {
            log::warn!(
                "Configured module {} differs from client module {}, using {}",
                config.module,
                client.module(),
                client.module()
            );
        }
        let orchestrator = Orchestrator::new(client, Arc::new(Store::new()));
        let reconciler = InventoryReconciler::new(orchestrator.clone(), config.read_retry);
        GameSession {
            orchestrator,
            reconciler,
            config,
        }
    }

    pub fn client(&self) -> &C {
        self.orchestrator.client()
    }

    pub fn store(&self) -> &Arc<Store> {
        self.orchestrator.store()
    }

    /// The current view snapshot.
    pub fn view(&self) -> Arc<ViewState> {
        self.store().view()
    }

    pub fn take_notices(&self) -> Vec<Notice> {
        self.store().take_notices()
    }

    /// Switch to the account of `wallet`, load or initialize its inventory and load the offers.
    ///
    /// Offers are loaded even if the inventory could not be loaded. The first error is returned.
    pub async fn connect(&self, wallet: &dyn Wallet) -> Result<Arc<ViewState>, Error> {
        let account = wallet.account().ok_or(Error::WalletNotConnected)?;
        log::info!("Connecting {}", account);
        self.store().connect(account);

        let inventory = self.reconciler.ensure_and_load(wallet).await;
        let offers = self.refresh_offers().await;
        inventory?;
        offers?;
        Ok(self.view())
    }

    pub fn disconnect(&self) {
        self.store().disconnect();
    }

    /// Read the inventory of `account` into the view. `Ok(None)` if it has none yet.
    pub async fn refresh_inventory(
        &self,
        account: &AccountAddress,
    ) -> Result<Option<PlayerInventory>, Error> {
        self.reconciler.refresh(account).await
    }

    /// Read the game state and project its offers into the view.
    ///
    /// A game state that was never published lists no offers.
    pub async fn refresh_offers(&self) -> Result<Vec<TradeOffer>, Error> {
        let client = self.client();
        let read = self
            .config
            .read_retry
            .retry(
                move || client.get_game_state(),
                |error: &ClientError| !error.is_not_found(),
            )
            .await;
        let game_state = match read {
            Ok(game_state) => Some(game_state),
            Err(error) if error.is_not_found() => {
                log::info!("GameState not found, listing no offers");
                None
            }
            Err(error) => {
                log::error!("Error fetching trade offers: {}", error);
                self.store().notify(Notice::failure(OFFERS_FAILED_NOTICE));
                return Err(Error::ReadFailed(Arc::new(error)));
            }
        };
        let offers = projector::project(game_state.as_ref());
        self.store().set_offers(offers.clone());
        Ok(offers)
    }

    /// Gather resources and refresh the inventory once the transaction is confirmed.
    pub async fn gather_resources(&self, wallet: &dyn Wallet) -> Result<Confirmed, Error> {
        let account = wallet.account().ok_or(Error::WalletNotConnected)?;
        self.orchestrator
            .run(wallet, message::GatherResources, move |_| async move {
                if let Err(error) = self.refresh_inventory(&account).await {
                    log::debug!("Inventory not refreshed after gathering: {}", error);
                }
            })
            .await
    }

    /// Create a trade offer and refresh inventory and offers once the transaction is confirmed.
    pub async fn create_trade_offer(
        &self,
        wallet: &dyn Wallet,
        form: TradeOfferForm,
    ) -> Result<Confirmed, Error> {
        let offer = form.into_message()?;
        let account = wallet.account().ok_or(Error::WalletNotConnected)?;
        self.orchestrator
            .run(wallet, offer, move |_| async move {
                if let Err(error) = self.refresh_inventory(&account).await {
                    log::debug!("Inventory not refreshed after creating offer: {}", error);
                }
                if let Err(error) = self.refresh_offers().await {
                    log::debug!("Offers not refreshed after creating offer: {}", error);
                }
            })
            .await
    }
}
