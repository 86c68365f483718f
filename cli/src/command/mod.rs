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

//! Define the commands supported by the CLI.

use crate::{print_notices, CommandError, CommandT, GameOptions, NetworkOptions};
use resource_trade_client::*;
use structopt::StructOpt;

pub mod market;
pub mod player;
pub mod simulate;

fn print_inventory(account: &AccountAddress, inventory: &PlayerInventory) {
    println!("account: {}", account);
    for kind in ResourceKind::ALL.iter() {
        println!("{}: {}", kind, inventory.amount(*kind));
    }
    println!("last_gathered: {}", inventory.last_gathered);
}

fn print_offers(offers: &[resource_trade_engine::TradeOffer]) {
    println!("TRADE OFFERS ({})", offers.len());
    for offer in offers {
        println!("#{} {} {}", offer.id, offer.creator.short(), offer.describe());
    }
}
