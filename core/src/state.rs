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

//! Records stored by the game module.
use serde::{Deserialize, Serialize};

use crate::{AccountAddress, ResourceKind, Timestamp};

/// Name of the per account inventory resource.
pub const PLAYER_INVENTORY: &str = "PlayerInventory";

/// Name of the shared resource published at the module address.
pub const GAME_STATE: &str = "GameState";

/// Resources held by a single account.
///
/// Every account has at most one inventory. It is created by
/// [crate::message::InitPlayerInventory] and only changed by the ledger.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerInventory {
    #[serde(with = "crate::u64_string")]
    pub wood: u64,
    #[serde(with = "crate::u64_string")]
    pub stone: u64,
    #[serde(with = "crate::u64_string")]
    pub gold: u64,
    /// Time of the last successful [crate::message::GatherResources]. Zero if the player never
    /// gathered.
    #[serde(default, with = "crate::u64_string")]
    pub last_gathered: Timestamp,
}

impl PlayerInventory {
    pub fn amount(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Gold => self.gold,
        }
    }

    pub fn amount_mut(&mut self, kind: ResourceKind) -> &mut u64 {
        match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Gold => &mut self.gold,
        }
    }
}

/// An open offer as stored in [GameState::trade_offers].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TradeOfferRecord {
    pub creator: AccountAddress,
    pub offered_resource: ResourceKind,
    #[serde(with = "crate::u64_string")]
    pub offered_amount: u64,
    pub requested_resource: ResourceKind,
    #[serde(with = "crate::u64_string")]
    pub requested_amount: u64,
}

/// State shared by all players. Published once at the module address.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Open offers in the order they were created. A state without offers may omit the field.
    #[serde(default)]
    pub trade_offers: Vec<TradeOfferRecord>,
}
