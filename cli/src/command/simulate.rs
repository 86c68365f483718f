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

//! Play a scripted session against the in-memory ledger.

use super::*;
use resource_trade_engine::{GameSession, TradeOfferForm};

#[derive(StructOpt, Clone)]
/// Connect a player to an emulated ledger, gather resources and create a trade offer.
pub struct Simulate {
    /// Account address of the simulated player
    #[structopt(long, default_value = "0xa11ce", value_name = "address")]
    account: AccountAddress,

    /// How often resources are gathered before the offer is created
    #[structopt(long, default_value = "1")]
    gathers: u32,

    /// Resource to offer
    #[structopt(long, default_value = "wood", value_name = "resource")]
    offer: ResourceKind,

    #[structopt(long, default_value = "10", value_name = "amount")]
    offer_amount: u64,

    /// Resource to request in exchange
    #[structopt(long, default_value = "gold", value_name = "resource")]
    request: ResourceKind,

    #[structopt(long, default_value = "5", value_name = "amount")]
    request_amount: u64,

    #[structopt(flatten)]
    game_options: GameOptions,
}

impl Simulate {
    fn offer_form(&self) -> TradeOfferForm {
        TradeOfferForm {
            offered_resource: Some(self.offer),
            offered_amount: Some(self.offer_amount),
            requested_resource: Some(self.request),
            requested_amount: Some(self.request_amount),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl CommandT for Simulate {
    async fn run(&self) -> Result<(), CommandError> {
        let config = self.game_options.config();
        let emulator = Emulator::with_module(config.module.clone());
        let session = GameSession::new(Client::with_emulator(&emulator), config);
        let wallet = emulator.wallet(self.account.clone());

        println!("Connecting {}...", self.account.short());
        let connected = session.connect(&wallet).await;
        print_notices(&session);
        connected?;

        for _ in 0..self.gathers {
            let gathered = session.gather_resources(&wallet).await;
            print_notices(&session);
            gathered?;
        }

        let created = session.create_trade_offer(&wallet, self.offer_form()).await;
        print_notices(&session);
        created?;

        let view = session.view();
        if let Some(inventory) = &view.inventory {
            print_inventory(&self.account, inventory);
        }
        print_offers(&view.offers);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[async_std::test]
    async fn default_simulation() {
        let simulate = Simulate::from_iter_safe(vec!["simulate"]).unwrap();
        simulate.run().await.unwrap();
    }

    #[async_std::test]
    async fn offer_beyond_holdings() {
        let simulate =
            Simulate::from_iter_safe(vec!["simulate", "--gathers", "0", "--offer-amount", "1"])
                .unwrap();
        match simulate.run().await {
            Err(CommandError::SessionError(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
